//! SortLab CLI
//!
//! Records and plays back sorting traces in the terminal.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod render;

use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use console::{Term, style};
use sortlab_core::{Algorithm, CoreResult, Sequence, Speed};
use sortlab_playback::{ScheduleId, Session, SessionConfig, Signal, TokioScheduler};
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sortlab")]
#[command(about = "SortLab - step-by-step sorting algorithm playback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available algorithms
    Algorithms,
    /// Record a trace and print every step
    Record {
        /// Algorithm to record
        #[arg(short, long, default_value = "bubble")]
        algorithm: Algorithm,
        /// Print the trace as JSON
        #[arg(long)]
        json: bool,
        /// Values to sort
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Play one algorithm
    Play(SessionArgs),
    /// Play algorithms side by side
    Compare {
        #[command(flatten)]
        session: SessionArgs,
        /// Second algorithm of the pair
        #[arg(long, conflicts_with = "all")]
        with: Option<Algorithm>,
        /// Compare every algorithm
        #[arg(long)]
        all: bool,
    },
}

#[derive(Args)]
struct SessionArgs {
    /// Algorithm to play
    #[arg(short, long)]
    algorithm: Option<Algorithm>,
    /// Speed multiplier (1, 2, 5 or 10)
    #[arg(short, long, value_parser = parse_speed)]
    speed: Option<Speed>,
    /// Sort a random sequence
    #[arg(long, conflicts_with = "values")]
    random: bool,
    /// Seed for --random
    #[arg(long)]
    seed: Option<u64>,
    /// Session config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Values to sort; the configured sequence when empty
    #[arg(allow_hyphen_values = true)]
    values: Vec<String>,
}

fn parse_speed(text: &str) -> CoreResult<Speed> {
    let multiplier = text
        .trim_start_matches('x')
        .parse::<u32>()
        .map_err(|e| sortlab_core::CoreError::Validation {
            field: "speed".to_string(),
            reason: e.to_string(),
        })?;
    Speed::new(multiplier)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sortlab=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Algorithms => {
            for algorithm in Algorithm::ALL {
                println!("{} ({})", style(algorithm.name()).bold(), algorithm.slug());
                for line in algorithm.summary() {
                    println!("  {line}");
                }
            }
            Ok(())
        }
        Commands::Record {
            algorithm,
            json,
            values,
        } => {
            let sequence = Sequence::from_entries(&values)?;
            let trace = sortlab_record::record(algorithm, &sequence);
            if json {
                println!("{}", serde_json::to_string_pretty(&trace)?);
            } else {
                for (i, step) in trace.steps().iter().enumerate() {
                    println!("{i:>4}  {}", render::inline(step));
                }
            }
            Ok(())
        }
        Commands::Play(args) => {
            let (session, ticks) = build_session(&args)?;
            drive(session, ticks).await
        }
        Commands::Compare {
            session: args,
            with,
            all,
        } => {
            let (mut session, ticks) = build_session(&args)?;
            if all {
                session.enable_multi_compare();
            } else {
                session.enable_pairwise_compare();
                if let Some(second) = with {
                    session.select_second_algorithm(second)?;
                }
            }
            drive(session, ticks).await
        }
    }
}

fn build_session(
    args: &SessionArgs,
) -> Result<(Session<TokioScheduler>, UnboundedReceiver<ScheduleId>)> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(algorithm) = args.algorithm {
        config = config.with_algorithm(algorithm);
    }
    if let Some(speed) = args.speed {
        config = config.with_speed(speed);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let (scheduler, ticks) = TokioScheduler::channel();
    let mut session = Session::new(config, scheduler)?;

    if args.random {
        session.randomize()?;
    } else if !args.values.is_empty() {
        session.set_entries(&args.values)?;
    }
    Ok((session, ticks))
}

async fn drive(
    mut session: Session<TokioScheduler>,
    mut ticks: UnboundedReceiver<ScheduleId>,
) -> Result<()> {
    let term = Term::stdout();
    let mut drawn = draw(&term, &session, 0)?;

    session.start();
    tracing::info!(
        sequence = %session.selection().sequence,
        speed = %session.selection().speed,
        "playback started"
    );

    loop {
        tokio::select! {
            tick = ticks.recv() => {
                let id = tick.ok_or_else(|| eyre!("tick channel closed"))?;
                if session.on_tick(id) {
                    drawn = draw(&term, &session, drawn)?;
                }
                let signals = session.drain_signals();
                for signal in &signals {
                    term.write_line(&style(signal).green().to_string())?;
                }
                if signals
                    .iter()
                    .any(|s| matches!(s, Signal::StepCompleted { .. } | Signal::AllCompleted))
                {
                    return Ok(());
                }
            }
            _ = tokio::signal::ctrl_c() => {
                session.stop();
                term.write_line("Stopped")?;
                return Ok(());
            }
        }
    }
}

/// Redraw every frame, clearing the previous drawing on a terminal
fn draw(term: &Term, session: &Session<TokioScheduler>, previous: usize) -> Result<usize> {
    if term.is_term() && previous > 0 {
        term.clear_last_lines(previous)?;
    }

    let mut lines = 0;
    for frame in session.frames() {
        for line in render::frame(&frame) {
            term.write_line(&line)?;
            lines += 1;
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_speed() {
        assert_eq!(parse_speed("5").unwrap(), Speed::X5);
        assert_eq!(parse_speed("x10").unwrap(), Speed::X10);
        assert!(parse_speed("0").is_err());
        assert!(parse_speed("3").is_err());
        assert!(parse_speed("2000000000").is_err());
        assert!(parse_speed("fast").is_err());
    }

    #[test]
    fn test_compare_args() {
        let cli = Cli::try_parse_from(["sortlab", "compare", "--with", "quick", "3", "1", "2"]).unwrap();
        match cli.command {
            Commands::Compare { session, with, all } => {
                assert_eq!(with, Some(Algorithm::Quick));
                assert!(!all);
                assert_eq!(session.values, vec!["3", "1", "2"]);
            }
            _ => panic!("expected compare"),
        }

        assert!(Cli::try_parse_from(["sortlab", "compare", "--all", "--with", "quick"]).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_plays_on_tokio_ticks() {
        let args = SessionArgs {
            algorithm: Some(Algorithm::Insertion),
            speed: Some(Speed::X10),
            random: false,
            seed: Some(1),
            config: None,
            values: vec!["2".to_string(), "1".to_string()],
        };
        let (mut session, mut ticks) = build_session(&args).unwrap();
        session.start();

        while session.is_playing() {
            let id = ticks.recv().await.unwrap();
            session.on_tick(id);
        }
        assert_eq!(session.frames()[0].step.snapshot, vec![1, 2]);
        assert_eq!(
            session.drain_signals(),
            vec![Signal::StepCompleted {
                algorithm: Algorithm::Insertion
            }]
        );
    }
}
