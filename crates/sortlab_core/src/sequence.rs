//! Input sequences.
//!
//! A `Sequence` is the validated array the user sorts. It is never edited in
//! place; every edit builds a new sequence and goes through the same bounds
//! check, so a rejected edit leaves the previous value untouched.

use crate::error::BoundsViolation;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Element type of every sequence and snapshot
pub type Value = u32;

/// Validated input sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub struct Sequence(Vec<Value>);

impl Sequence {
    /// Minimum number of values
    pub const MIN_LEN: usize = 2;
    /// Maximum number of values
    pub const MAX_LEN: usize = 15;
    /// Largest accepted value
    pub const MAX_VALUE: Value = 99;

    /// Create a sequence, checking length and value bounds
    ///
    /// # Errors
    ///
    /// Returns a bounds violation if the length or any value is out of range
    pub fn new(values: Vec<Value>) -> Result<Self, BoundsViolation> {
        Self::check(&values)?;
        Ok(Self(values))
    }

    /// Check values against the sequence domain without building one
    ///
    /// # Errors
    ///
    /// Returns the first bounds violation found
    pub fn check(values: &[Value]) -> Result<(), BoundsViolation> {
        if values.len() < Self::MIN_LEN {
            return Err(BoundsViolation::TooShort {
                len: values.len(),
                min: Self::MIN_LEN,
            });
        }
        if values.len() > Self::MAX_LEN {
            return Err(BoundsViolation::TooLong {
                len: values.len(),
                max: Self::MAX_LEN,
            });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| **v > Self::MAX_VALUE)
        {
            return Err(BoundsViolation::ValueOutOfRange {
                index,
                value,
                max: Self::MAX_VALUE,
            });
        }
        Ok(())
    }

    /// Coerce free-form entry text to a value.
    ///
    /// Non-numeric text becomes 0. Negative numbers clamp to 0 and numbers
    /// above [`Sequence::MAX_VALUE`] clamp to it.
    #[must_use]
    pub fn coerce_entry(text: &str) -> Value {
        match text.trim().parse::<i64>() {
            Ok(n) => n.clamp(0, i64::from(Self::MAX_VALUE)) as Value,
            Err(_) => 0,
        }
    }

    /// Build a sequence from entry texts, coercing each one
    ///
    /// # Errors
    ///
    /// Returns a bounds violation if the entry count is out of range
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self, BoundsViolation> {
        Self::new(entries.iter().map(|e| Self::coerce_entry(e.as_ref())).collect())
    }

    /// Copy with the value at `index` replaced
    ///
    /// # Errors
    ///
    /// Returns a bounds violation if `index` is past the end or `value` is too large
    pub fn with_value(&self, index: usize, value: Value) -> Result<Self, BoundsViolation> {
        if index >= self.0.len() {
            return Err(BoundsViolation::NoSuchIndex { index });
        }
        let mut values = self.0.clone();
        values[index] = value;
        Self::new(values)
    }

    /// Copy with `value` appended
    ///
    /// # Errors
    ///
    /// Returns [`BoundsViolation::TooLong`] at the maximum length
    pub fn pushed(&self, value: Value) -> Result<Self, BoundsViolation> {
        let mut values = self.0.clone();
        values.push(value);
        Self::new(values)
    }

    /// Copy with the value at `index` removed
    ///
    /// # Errors
    ///
    /// Returns [`BoundsViolation::TooShort`] at the minimum length
    pub fn removed(&self, index: usize) -> Result<Self, BoundsViolation> {
        if index >= self.0.len() {
            return Err(BoundsViolation::NoSuchIndex { index });
        }
        let mut values = self.0.clone();
        values.remove(index);
        Self::new(values)
    }

    /// Get the values
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Consume into the underlying values
    #[must_use]
    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl Deref for Sequence {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl TryFrom<Vec<Value>> for Sequence {
    type Error = BoundsViolation;

    fn try_from(values: Vec<Value>) -> Result<Self, BoundsViolation> {
        Self::new(values)
    }
}

impl From<Sequence> for Vec<Value> {
    fn from(seq: Sequence) -> Self {
        seq.0
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sequence_bounds() {
        assert!(Sequence::new(vec![1, 2]).is_ok());
        assert!(Sequence::new(vec![0; 15]).is_ok());

        assert_eq!(
            Sequence::new(vec![1]),
            Err(BoundsViolation::TooShort { len: 1, min: 2 })
        );
        assert_eq!(
            Sequence::new(vec![0; 16]),
            Err(BoundsViolation::TooLong { len: 16, max: 15 })
        );
        assert!(matches!(
            Sequence::new(vec![1, 100]),
            Err(BoundsViolation::ValueOutOfRange { index: 1, value: 100, .. })
        ));
    }

    #[test]
    fn test_coerce_entry() {
        assert_eq!(Sequence::coerce_entry("42"), 42);
        assert_eq!(Sequence::coerce_entry(" 7 "), 7);
        assert_eq!(Sequence::coerce_entry("abc"), 0);
        assert_eq!(Sequence::coerce_entry(""), 0);
        assert_eq!(Sequence::coerce_entry("-5"), 0);
        assert_eq!(Sequence::coerce_entry("250"), 99);
    }

    #[test]
    fn test_from_entries() {
        let seq = Sequence::from_entries(&["3", "x", "12"]).unwrap();
        assert_eq!(seq.as_slice(), &[3, 0, 12]);
    }

    #[test]
    fn test_edits_do_not_touch_original() {
        let seq = Sequence::new(vec![3, 1]).unwrap();

        assert!(seq.removed(0).is_err());
        assert_eq!(seq.pushed(9).unwrap().as_slice(), &[3, 1, 9]);
        assert_eq!(seq.with_value(1, 8).unwrap().as_slice(), &[3, 8]);
        assert!(seq.with_value(5, 8).is_err());
        assert_eq!(seq.as_slice(), &[3, 1]);

        let full = Sequence::new(vec![1; 15]).unwrap();
        assert!(matches!(full.pushed(0), Err(BoundsViolation::TooLong { .. })));
        assert_eq!(seq.removed(4), Err(BoundsViolation::NoSuchIndex { index: 4 }));
    }

    #[test]
    fn test_serde_rejects_out_of_bounds() {
        let seq: Sequence = serde_json::from_str("[3, 1, 2]").unwrap();
        assert_eq!(seq.to_string(), "[3, 1, 2]");
        assert!(serde_json::from_str::<Sequence>("[3]").is_err());
    }

    proptest! {
        #[test]
        fn prop_coerce_entry_in_range(n in any::<i64>()) {
            let value = Sequence::coerce_entry(&n.to_string());
            prop_assert!(value <= Sequence::MAX_VALUE);
            if (0..=99).contains(&n) {
                prop_assert_eq!(i64::from(value), n);
            } else if n < 0 {
                prop_assert_eq!(value, 0);
            } else {
                prop_assert_eq!(value, Sequence::MAX_VALUE);
            }
        }

        #[test]
        fn prop_check_matches_domain(values in prop::collection::vec(0u32..=120, 0..=20)) {
            let in_domain = (Sequence::MIN_LEN..=Sequence::MAX_LEN).contains(&values.len())
                && values.iter().all(|v| *v <= Sequence::MAX_VALUE);
            prop_assert_eq!(Sequence::check(&values).is_ok(), in_domain);
            prop_assert_eq!(Sequence::new(values).is_ok(), in_domain);
        }

        #[test]
        fn prop_from_entries_never_out_of_range(entries in prop::collection::vec(".{0,4}", 2..=15)) {
            let seq = Sequence::from_entries(entries.as_slice()).unwrap();
            prop_assert_eq!(seq.len(), entries.len());
            prop_assert!(seq.iter().all(|v| *v <= Sequence::MAX_VALUE));
        }
    }
}
