//! Numeric-as-text values.
//!
//! Stat fields keep exactly what the user typed. Parsing happens on read:
//! text that is not a number reads back as `NaN` and is still rendered
//! verbatim. Nothing here rejects input.

use serde::{Deserialize, Serialize};

/// A stat value stored as the raw text the user entered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumericText(String);

impl NumericText {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The text as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed value; `NaN` when the text is not a number.
    #[must_use]
    pub fn value(&self) -> f64 {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            return f64::NAN;
        }
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    }

    /// Parsed value if it is a finite whole number.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        let v = self.value();
        (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
    }

    /// True when the text parses as a finite number.
    #[must_use]
    pub fn is_number(&self) -> bool {
        self.value().is_finite()
    }
}

impl From<&str> for NumericText {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NumericText {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for NumericText {
    fn from(v: i64) -> Self {
        Self(v.to_string())
    }
}

impl From<i32> for NumericText {
    fn from(v: i32) -> Self {
        Self(v.to_string())
    }
}

impl std::fmt::Display for NumericText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_text_parses() {
        let hp = NumericText::from("140");
        assert_eq!(hp.value(), 140.0);
        assert_eq!(hp.as_int(), Some(140));
        assert!(hp.is_number());
    }

    #[test]
    fn test_invalid_text_is_nan_but_kept() {
        let hp = NumericText::from("abc");
        assert!(hp.value().is_nan());
        assert_eq!(hp.as_int(), None);
        assert_eq!(hp.as_str(), "abc");
        assert_eq!(hp.to_string(), "abc");
    }

    #[test]
    fn test_empty_is_nan() {
        assert!(NumericText::default().value().is_nan());
    }

    #[test]
    fn test_fraction_is_not_int() {
        let v = NumericText::from("2.5");
        assert_eq!(v.value(), 2.5);
        assert_eq!(v.as_int(), None);
    }

    #[test]
    fn test_from_int() {
        assert_eq!(NumericText::from(6i32).as_str(), "6");
        assert_eq!(NumericText::from(-3i64).as_int(), Some(-3));
    }
}
