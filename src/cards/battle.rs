//! Variant B: battle-card style.
//!
//! Unit cards carry tribe, attack and hp; skill cards do not show them.
//! The values are kept when switching kind so switching back restores them.

use serde::{Deserialize, Serialize};

use crate::core::{EditError, EditorConfig, NumericText};

use super::field::FieldValue;
use super::CardRecord;

/// Card kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleKind {
    #[default]
    Unit,
    Skill,
}

impl BattleKind {
    pub const ALL: [BattleKind; 2] = [BattleKind::Unit, BattleKind::Skill];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            BattleKind::Unit => "unit",
            BattleKind::Skill => "skill",
        }
    }

    /// Selector label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BattleKind::Unit => "ユニット",
            BattleKind::Skill => "特技",
        }
    }

    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "unit" => Some(BattleKind::Unit),
            "skill" => Some(BattleKind::Skill),
            _ => None,
        }
    }

    #[must_use]
    pub fn parse_or_default(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|| {
            log::debug!("unrecognized card kind {text:?}, using unit");
            Self::default()
        })
    }

    /// Extra magnification applied to the art layer so it lines up with
    /// this kind's frame.
    #[must_use]
    pub fn correction_factor(self) -> f64 {
        match self {
            BattleKind::Unit => 1.2,
            BattleKind::Skill => 1.04,
        }
    }

    /// Scale of the frame art, anchored at the top-left corner.
    #[must_use]
    pub fn frame_scale(self) -> f64 {
        match self {
            BattleKind::Unit => 1.07,
            BattleKind::Skill => 1.0,
        }
    }

    /// Frame art location.
    #[must_use]
    pub fn frame_image(self) -> &'static str {
        match self {
            BattleKind::Unit => "https://onjmin.github.io/gen-poke/images/dqr/unit-48px.png",
            BattleKind::Skill => "https://onjmin.github.io/gen-poke/images/dqr/skill-52px.png",
        }
    }

    #[must_use]
    pub fn is_unit(self) -> bool {
        self == BattleKind::Unit
    }
}

/// Top-level editable attributes of a battle card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleField {
    Kind,
    Name,
    Tribe,
    Cost,
    Attack,
    Hp,
    Description,
    FontSize,
}

impl BattleField {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BattleField::Kind => "kind",
            BattleField::Name => "name",
            BattleField::Tribe => "tribe",
            BattleField::Cost => "cost",
            BattleField::Attack => "attack",
            BattleField::Hp => "hp",
            BattleField::Description => "description",
            BattleField::FontSize => "font_size",
        }
    }

    /// Fields that only exist on unit cards.
    #[must_use]
    pub fn is_unit_only(self) -> bool {
        matches!(self, BattleField::Tribe | BattleField::Attack | BattleField::Hp)
    }
}

/// Default tribe, restored by the editor's reset.
pub const DEFAULT_TRIBE: &str = "冒険者";

/// Variant B card record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleCard {
    pub kind: BattleKind,
    pub name: String,
    /// At most `tribe_max_chars` characters.
    pub tribe: String,
    pub cost: NumericText,
    pub attack: NumericText,
    pub hp: NumericText,
    /// Newline-significant text with `[keyword]` tokens.
    pub description: String,
    /// Description font size in px, 10..=30.
    pub font_size: u8,
}

impl Default for BattleCard {
    fn default() -> Self {
        Self {
            kind: BattleKind::Unit,
            name: "魔女グレイツェル".into(),
            tribe: DEFAULT_TRIBE.into(),
            cost: NumericText::from(6i32),
            attack: NumericText::from(5i32),
            hp: NumericText::from(5i32),
            description: "[おうえん]　[召喚時]：\nランダムな敵1体を\n次のターン終了時まで\n攻撃不能にする\n\n[スキルブースト]：+1体".into(),
            font_size: 16,
        }
    }
}

/// Keep the first `max` characters.
pub(crate) fn truncate_chars(text: String, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text,
    }
}

impl CardRecord for BattleCard {
    type Field = BattleField;

    fn set_field(
        &mut self,
        field: BattleField,
        value: FieldValue,
        config: &EditorConfig,
    ) -> Result<(), EditError> {
        let key = field.name();
        match field {
            BattleField::Kind => self.kind = value.into_kind(key)?,
            BattleField::Name => self.name = value.into_text(key)?,
            BattleField::Tribe => {
                self.tribe = truncate_chars(value.into_text(key)?, config.tribe_max_chars);
            }
            BattleField::Cost => self.cost = value.into_numeric_text(key)?,
            BattleField::Attack => self.attack = value.into_numeric_text(key)?,
            BattleField::Hp => self.hp = value.into_numeric_text(key)?,
            BattleField::Description => self.description = value.into_text(key)?,
            BattleField::FontSize => {
                let v = value.into_int(key)? as f64;
                self.font_size = config.font_size.clamp(v) as u8;
            }
        }
        Ok(())
    }

    fn get_field(&self, field: BattleField) -> FieldValue {
        match field {
            BattleField::Kind => FieldValue::Kind(self.kind),
            BattleField::Name => FieldValue::Text(self.name.clone()),
            BattleField::Tribe => FieldValue::Text(self.tribe.clone()),
            BattleField::Cost => FieldValue::from(&self.cost),
            BattleField::Attack => FieldValue::from(&self.attack),
            BattleField::Hp => FieldValue::from(&self.hp),
            BattleField::Description => FieldValue::Text(self.description.clone()),
            BattleField::FontSize => FieldValue::Int(self.font_size.into()),
        }
    }
}
