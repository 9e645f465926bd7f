//! Card records for both variants.
//!
//! ## Key Types
//!
//! - `CollectibleCard`: variant A (energy types, attacks, ability, rarity)
//! - `BattleCard`: variant B (unit/skill, cost/attack/hp, keyword text)
//! - `Attack`, `AttackPatch`: variant A attack rows and partial updates
//! - `FieldValue`: dynamically typed value for `update_field`
//!
//! Both records implement [`CardRecord`], which is all the store needs.

pub mod attack;
pub mod battle;
pub mod collectible;
pub mod field;

pub use attack::{Attack, AttackPatch, EnergyCost};
pub use battle::{BattleCard, BattleField, BattleKind, DEFAULT_TRIBE};
pub use collectible::{CollectibleCard, CollectibleField, Stage};
pub use field::FieldValue;

use crate::core::{EditError, EditorConfig};

/// A card record the store can update field by field.
pub trait CardRecord: Clone + PartialEq + std::fmt::Debug {
    /// Key enum naming the record's top-level attributes.
    type Field: Copy + std::fmt::Debug;

    /// Replace one attribute, coercing `value` to the field's type.
    ///
    /// On `Err` the record is unchanged.
    fn set_field(
        &mut self,
        field: Self::Field,
        value: FieldValue,
        config: &EditorConfig,
    ) -> Result<(), EditError>;

    /// Read one attribute back as a `FieldValue`.
    fn get_field(&self, field: Self::Field) -> FieldValue;
}
