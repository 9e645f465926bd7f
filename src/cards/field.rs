//! Dynamically-typed field values for `update_field`.
//!
//! The input surface hands the store whatever the control produced: text
//! from a text box, a number from a slider, a bool from a checkbox. Each
//! card field coerces the value to its own type here.
//!
//! ## Coercion rules
//!
//! - Text fields accept `Text`, `Int` and `Energy` (rendered as the key).
//! - Bool fields accept `Bool` and the texts `"true"`/`"false"`.
//! - Integer fields accept `Int` and text that parses as a whole number.
//! - Energy fields accept `Energy` and any text; unknown keys become colorless.
//! - Numeric-text fields accept `Text` (stored verbatim) and `Int`.

use serde::{Deserialize, Serialize};

use crate::core::{EditError, EnergyType, NumericText};

use super::battle::BattleKind;
use super::collectible::Stage;

/// Value handed to `update_field`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Bool(bool),
    Energy(EnergyType),
    Stage(Stage),
    Kind(BattleKind),
}

impl FieldValue {
    /// Short name of the carried type, for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Int(_) => "int",
            FieldValue::Bool(_) => "bool",
            FieldValue::Energy(_) => "energy",
            FieldValue::Stage(_) => "stage",
            FieldValue::Kind(_) => "card kind",
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_energy(&self) -> Option<EnergyType> {
        match self {
            FieldValue::Energy(e) => Some(*e),
            _ => None,
        }
    }

    fn mismatch(&self, field: &'static str, expected: &'static str) -> EditError {
        EditError::TypeMismatch {
            field,
            expected,
            got: self.type_name(),
        }
    }

    pub(crate) fn into_text(self, field: &'static str) -> Result<String, EditError> {
        match self {
            FieldValue::Text(s) => Ok(s),
            FieldValue::Int(v) => Ok(v.to_string()),
            FieldValue::Energy(e) => Ok(e.key().to_string()),
            other => Err(other.mismatch(field, "text")),
        }
    }

    pub(crate) fn into_bool(self, field: &'static str) -> Result<bool, EditError> {
        match self {
            FieldValue::Bool(b) => Ok(b),
            FieldValue::Text(ref s) if s == "true" => Ok(true),
            FieldValue::Text(ref s) if s == "false" => Ok(false),
            other => Err(other.mismatch(field, "bool")),
        }
    }

    pub(crate) fn into_int(self, field: &'static str) -> Result<i64, EditError> {
        match self {
            FieldValue::Int(v) => Ok(v),
            FieldValue::Text(text) => NumericText::new(text.as_str())
                .as_int()
                .ok_or(EditError::InvalidNumber { field, text }),
            other => Err(other.mismatch(field, "int")),
        }
    }

    pub(crate) fn into_energy(self, field: &'static str) -> Result<EnergyType, EditError> {
        match self {
            FieldValue::Energy(e) => Ok(e),
            FieldValue::Text(s) => Ok(EnergyType::from_key_or_default(&s)),
            other => Err(other.mismatch(field, "energy")),
        }
    }

    pub(crate) fn into_numeric_text(self, field: &'static str) -> Result<NumericText, EditError> {
        match self {
            FieldValue::Text(s) => Ok(NumericText::from(s)),
            FieldValue::Int(v) => Ok(NumericText::from(v)),
            other => Err(other.mismatch(field, "number")),
        }
    }

    pub(crate) fn into_stage(self, field: &'static str) -> Result<Stage, EditError> {
        match self {
            FieldValue::Stage(s) => Ok(s),
            FieldValue::Text(s) => Ok(Stage::parse_or_default(&s)),
            other => Err(other.mismatch(field, "stage")),
        }
    }

    pub(crate) fn into_kind(self, field: &'static str) -> Result<BattleKind, EditError> {
        match self {
            FieldValue::Kind(k) => Ok(k),
            FieldValue::Text(s) => Ok(BattleKind::parse_or_default(&s)),
            other => Err(other.mismatch(field, "card kind")),
        }
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<EnergyType> for FieldValue {
    fn from(v: EnergyType) -> Self {
        FieldValue::Energy(v)
    }
}

impl From<Stage> for FieldValue {
    fn from(v: Stage) -> Self {
        FieldValue::Stage(v)
    }
}

impl From<BattleKind> for FieldValue {
    fn from(v: BattleKind) -> Self {
        FieldValue::Kind(v)
    }
}

impl From<&NumericText> for FieldValue {
    fn from(v: &NumericText) -> Self {
        FieldValue::Text(v.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let val = FieldValue::Int(5);
        assert_eq!(val.as_int(), Some(5));
        assert_eq!(val.as_bool(), None);

        let val: FieldValue = "Pikachu".into();
        assert_eq!(val.as_text(), Some("Pikachu"));
        assert_eq!(val.type_name(), "text");
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(FieldValue::Int(60).into_text("name").unwrap(), "60");
        assert_eq!(
            FieldValue::Energy(EnergyType::Fire).into_text("name").unwrap(),
            "FIRE"
        );
        assert!(FieldValue::Bool(true).into_text("name").is_err());
    }

    #[test]
    fn test_int_coercion() {
        assert_eq!(FieldValue::from("3").into_int("rarity").unwrap(), 3);
        assert_eq!(
            FieldValue::from("three").into_int("rarity"),
            Err(EditError::InvalidNumber {
                field: "rarity",
                text: "three".into()
            })
        );
    }

    #[test]
    fn test_energy_coercion_falls_back() {
        assert_eq!(
            FieldValue::from("PLASMA").into_energy("type").unwrap(),
            EnergyType::Colorless
        );
        assert_eq!(
            FieldValue::from("WATER").into_energy("type").unwrap(),
            EnergyType::Water
        );
    }

    #[test]
    fn test_numeric_text_keeps_garbage() {
        let hp = FieldValue::from("12a").into_numeric_text("hp").unwrap();
        assert_eq!(hp.as_str(), "12a");
        assert!(hp.value().is_nan());
    }

    #[test]
    fn test_bool_from_text() {
        assert!(FieldValue::from("true").into_bool("is_ex").unwrap());
        assert!(!FieldValue::from("false").into_bool("is_ex").unwrap());
        assert!(FieldValue::from("yes").into_bool("is_ex").is_err());
    }
}
