//! Text rendering of steps and frames.

use console::style;
use sortlab_core::{Step, Value};
use sortlab_playback::Frame;

const BAR_WIDTH: usize = 40;

/// One bar per value, highlighted indices in yellow
pub fn bars(step: &Step) -> Vec<String> {
    let max = step.snapshot.iter().copied().max().unwrap_or(0).max(1);
    let label_width = max.to_string().len();

    step.snapshot
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let bar = "█".repeat(bar_len(value, max));
            let line = format!("{value:>label_width$} {bar}");
            if step.is_highlighted(i) {
                style(line).yellow().bold().to_string()
            } else {
                style(line).cyan().to_string()
            }
        })
        .collect()
}

fn bar_len(value: Value, max: Value) -> usize {
    // at least one cell so zeros stay visible
    ((value as usize * BAR_WIDTH) / max as usize).max(1)
}

/// Single-line rendering, highlighted values in brackets
pub fn inline(step: &Step) -> String {
    let parts: Vec<String> = step
        .snapshot
        .iter()
        .enumerate()
        .map(|(i, value)| {
            if step.is_highlighted(i) {
                style(format!("[{value}]")).yellow().bold().to_string()
            } else {
                value.to_string()
            }
        })
        .collect();
    parts.join(" ")
}

/// Header line plus bars for one frame
pub fn frame(frame: &Frame<'_>) -> Vec<String> {
    let header = format!(
        "{}  {} ({}%)",
        style(frame.algorithm.name()).bold(),
        frame.progress,
        frame.progress.percent()
    );
    let mut lines = vec![header];
    lines.extend(bars(frame.step));
    lines
}
