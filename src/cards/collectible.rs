//! Variant A: collectible-style card.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{AttackId, EditError, EditorConfig, EnergyType, NumericText};

use super::attack::Attack;
use super::field::FieldValue;
use super::CardRecord;

/// Evolution stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Base,
    Stage1,
    Stage2,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Base, Stage::Stage1, Stage::Stage2];

    /// Printed label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Stage::Base => "たね",
            Stage::Stage1 => "1進化",
            Stage::Stage2 => "2進化",
        }
    }

    /// Accepts either the key (`base`, `stage1`, `stage2`) or the label.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "base" | "たね" => Some(Stage::Base),
            "stage1" | "1進化" => Some(Stage::Stage1),
            "stage2" | "2進化" => Some(Stage::Stage2),
            _ => None,
        }
    }

    #[must_use]
    pub fn parse_or_default(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|| {
            log::debug!("unrecognized stage {text:?}, using base");
            Self::default()
        })
    }

    /// Evolved stages show a pre-evolution slot.
    #[must_use]
    pub fn is_evolved(self) -> bool {
        self != Stage::Base
    }
}

/// Top-level editable attributes of a collectible card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleField {
    Name,
    Hp,
    PrimaryType,
    Stage,
    IsEx,
    IsRare,
    Rarity,
    HasAbility,
    AbilityName,
    AbilityDescription,
    Weakness,
    RetreatCost,
    BaseTextColor,
    SubTextColor,
    CardBackgroundColor,
}

impl CollectibleField {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CollectibleField::Name => "name",
            CollectibleField::Hp => "hp",
            CollectibleField::PrimaryType => "primary_type",
            CollectibleField::Stage => "stage",
            CollectibleField::IsEx => "is_ex",
            CollectibleField::IsRare => "is_rare",
            CollectibleField::Rarity => "rarity",
            CollectibleField::HasAbility => "has_ability",
            CollectibleField::AbilityName => "ability_name",
            CollectibleField::AbilityDescription => "ability_description",
            CollectibleField::Weakness => "weakness",
            CollectibleField::RetreatCost => "retreat_cost",
            CollectibleField::BaseTextColor => "base_text_color",
            CollectibleField::SubTextColor => "sub_text_color",
            CollectibleField::CardBackgroundColor => "card_background_color",
        }
    }
}

/// Variant A card record.
///
/// Attacks live in an `im::Vector` so the replace-with-copy store can
/// snapshot the record cheaply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectibleCard {
    pub name: String,
    pub hp: NumericText,
    pub primary_type: EnergyType,
    pub stage: Stage,
    pub is_ex: bool,
    pub is_rare: bool,
    /// Diamonds, 1..=5.
    pub rarity: u8,
    pub has_ability: bool,
    pub ability_name: String,
    pub ability_description: String,
    pub attacks: Vector<Attack>,
    pub weakness: EnergyType,
    /// Colorless icons, 0..=4.
    pub retreat_cost: u8,
    pub base_text_color: String,
    pub sub_text_color: String,
    pub card_background_color: String,
}

impl Default for CollectibleCard {
    fn default() -> Self {
        let opening_attack = Attack::empty(AttackId(1))
            .with_name("アルティメットフォース")
            .with_damage("70+")
            .with_description("自分のベンチポケモンの数×20ダメージ追加。")
            .with_energy(&[EnergyType::Colorless; 3]);

        Self {
            name: "アルセウス".into(),
            hp: NumericText::from("140"),
            primary_type: EnergyType::Colorless,
            stage: Stage::Base,
            is_ex: true,
            is_rare: true,
            rarity: 4,
            has_ability: true,
            ability_name: "しんわのかがやき".into(),
            ability_description: "このポケモンは特殊状態にならない。".into(),
            attacks: Vector::unit(opening_attack),
            weakness: EnergyType::Fighting,
            retreat_cost: 2,
            base_text_color: "#1a1a1a".into(),
            sub_text_color: "#666666".into(),
            card_background_color: "#f2f2f2".into(),
        }
    }
}

impl CollectibleCard {
    /// Find an attack by id.
    #[must_use]
    pub fn attack(&self, id: AttackId) -> Option<&Attack> {
        self.attacks.iter().find(|a| a.id == id)
    }

    /// Position of an attack by id.
    #[must_use]
    pub fn attack_index(&self, id: AttackId) -> Option<usize> {
        self.attacks.iter().position(|a| a.id == id)
    }
}

fn clamp_u8(value: i64, min: f64, max: f64) -> u8 {
    (value as f64).clamp(min, max) as u8
}

impl CardRecord for CollectibleCard {
    type Field = CollectibleField;

    fn set_field(
        &mut self,
        field: CollectibleField,
        value: FieldValue,
        config: &EditorConfig,
    ) -> Result<(), EditError> {
        let key = field.name();
        match field {
            CollectibleField::Name => self.name = value.into_text(key)?,
            CollectibleField::Hp => self.hp = value.into_numeric_text(key)?,
            CollectibleField::PrimaryType => self.primary_type = value.into_energy(key)?,
            CollectibleField::Stage => self.stage = value.into_stage(key)?,
            CollectibleField::IsEx => self.is_ex = value.into_bool(key)?,
            CollectibleField::IsRare => self.is_rare = value.into_bool(key)?,
            CollectibleField::Rarity => {
                let v = value.into_int(key)?;
                self.rarity = clamp_u8(v, config.rarity.min, config.rarity.max);
            }
            CollectibleField::HasAbility => self.has_ability = value.into_bool(key)?,
            CollectibleField::AbilityName => self.ability_name = value.into_text(key)?,
            CollectibleField::AbilityDescription => {
                self.ability_description = value.into_text(key)?;
            }
            CollectibleField::Weakness => self.weakness = value.into_energy(key)?,
            CollectibleField::RetreatCost => {
                let v = value.into_int(key)?;
                self.retreat_cost = clamp_u8(v, config.retreat.min, config.retreat.max);
            }
            CollectibleField::BaseTextColor => self.base_text_color = value.into_text(key)?,
            CollectibleField::SubTextColor => self.sub_text_color = value.into_text(key)?,
            CollectibleField::CardBackgroundColor => {
                self.card_background_color = value.into_text(key)?;
            }
        }
        Ok(())
    }

    fn get_field(&self, field: CollectibleField) -> FieldValue {
        match field {
            CollectibleField::Name => FieldValue::Text(self.name.clone()),
            CollectibleField::Hp => FieldValue::from(&self.hp),
            CollectibleField::PrimaryType => FieldValue::Energy(self.primary_type),
            CollectibleField::Stage => FieldValue::Stage(self.stage),
            CollectibleField::IsEx => FieldValue::Bool(self.is_ex),
            CollectibleField::IsRare => FieldValue::Bool(self.is_rare),
            CollectibleField::Rarity => FieldValue::Int(self.rarity.into()),
            CollectibleField::HasAbility => FieldValue::Bool(self.has_ability),
            CollectibleField::AbilityName => FieldValue::Text(self.ability_name.clone()),
            CollectibleField::AbilityDescription => {
                FieldValue::Text(self.ability_description.clone())
            }
            CollectibleField::Weakness => FieldValue::Energy(self.weakness),
            CollectibleField::RetreatCost => FieldValue::Int(self.retreat_cost.into()),
            CollectibleField::BaseTextColor => FieldValue::Text(self.base_text_color.clone()),
            CollectibleField::SubTextColor => FieldValue::Text(self.sub_text_color.clone()),
            CollectibleField::CardBackgroundColor => {
                FieldValue::Text(self.card_background_color.clone())
            }
        }
    }
}
