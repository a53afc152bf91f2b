//! The algorithm catalogue.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sorting algorithm that can be recorded and played back
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Adjacent compare-and-swap passes
    #[default]
    Bubble,
    /// Repeated minimum selection
    Selection,
    /// Shift-and-insert into a sorted prefix
    Insertion,
    /// Lomuto partition around the last element
    Quick,
    /// Gapped insertion with halving gaps
    Shell,
    /// LSD base-10 counting passes
    Radix,
}

impl Algorithm {
    /// Every algorithm, in catalogue order
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Quick,
        Algorithm::Shell,
        Algorithm::Radix,
    ];

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble sort",
            Algorithm::Selection => "Selection sort",
            Algorithm::Insertion => "Insertion sort",
            Algorithm::Quick => "Quick sort",
            Algorithm::Shell => "Shell sort",
            Algorithm::Radix => "Radix sort",
        }
    }

    /// Short machine name, as accepted on the command line
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Quick => "quick",
            Algorithm::Shell => "shell",
            Algorithm::Radix => "radix",
        }
    }

    /// Three-line description of how the algorithm proceeds
    #[must_use]
    pub const fn summary(self) -> [&'static str; 3] {
        match self {
            Algorithm::Bubble => [
                "Compare adjacent elements, swapping them if they are in the wrong order",
                "Repeat until no more swaps are needed",
                "The largest elements bubble to the end with each pass",
            ],
            Algorithm::Selection => [
                "Find the minimum element in the unsorted part",
                "Swap it with the element at the beginning of the unsorted part",
                "Move the boundary between sorted and unsorted parts one element to the right",
            ],
            Algorithm::Insertion => [
                "Start with the second element, treating the first as sorted",
                "Compare with the elements in the sorted part",
                "Shift larger elements right and insert the current element in the gap",
            ],
            Algorithm::Quick => [
                "Select the last element of the range as pivot",
                "Partition: elements not greater than the pivot move left of it",
                "Recursively sort the left range, then the right range",
            ],
            Algorithm::Shell => [
                "Start with a gap of half the length and halve it each pass",
                "Insertion-sort elements that are gap positions apart",
                "The final pass with gap 1 finishes a nearly sorted array",
            ],
            Algorithm::Radix => [
                "Sort numbers digit by digit, least significant first",
                "Use a stable counting sort for each digit position",
                "Stop once every digit of the largest value is processed",
            ],
        }
    }

    /// Position in [`Algorithm::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|a| *a == self).unwrap_or(0)
    }

    /// Next algorithm in catalogue order, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CoreError;

    /// Accepts the slug ("quick"), the display name ("Quick sort") or a
    /// hyphenated form ("quick-sort"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        let stem = normalized.strip_suffix(" sort").unwrap_or(&normalized);
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.slug() == stem)
            .ok_or_else(|| CoreError::UnknownAlgorithm {
                name: s.to_string(),
            })
    }
}
