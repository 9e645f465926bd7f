//! Energy/element types and their shared lookup table.
//!
//! Every place that needs to know about energy types (field coercion,
//! inline `:TOKEN:` markup, icon rendering, selector options) reads the
//! same immutable [`ENERGY_TABLE`]. Table order is display order.
//!
//! ## Fallback
//!
//! Unrecognized keys never fail: [`EnergyType::from_key_or_default`]
//! maps them to [`EnergyType::Colorless`].
//!
//! ```
//! use rust_cardsmith::core::EnergyType;
//!
//! assert_eq!(EnergyType::parse("FIRE"), Some(EnergyType::Fire));
//! assert_eq!(EnergyType::parse("fire"), None); // keys are case-sensitive
//! assert_eq!(EnergyType::from_key_or_default("PLASMA"), EnergyType::Colorless);
//! assert_eq!(EnergyType::from_token(":WATER:"), Some(EnergyType::Water));
//! ```

use serde::{Deserialize, Serialize};

/// One of the nine energy/element types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnergyType {
    Grass,
    Fire,
    Water,
    Lightning,
    Psychic,
    Fighting,
    Darkness,
    Metal,
    #[default]
    Colorless,
}

/// Static description of one energy type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnergyInfo {
    /// The type this row describes.
    pub energy: EnergyType,
    /// Uppercase key used in selectors and inline tokens.
    pub key: &'static str,
    /// Short display label.
    pub label: &'static str,
    /// Icon background colour.
    pub color: &'static str,
    /// Inline markup token (`:KEY:`).
    pub token: &'static str,
    /// Icon glyph drawn on top of the coloured disc, if any.
    pub glyph: Option<&'static str>,
}

/// The fixed, closed set of energy types.
pub static ENERGY_TABLE: [EnergyInfo; 9] = [
    EnergyInfo { energy: EnergyType::Grass, key: "GRASS", label: "草", color: "#77cc55", token: ":GRASS:", glyph: Some("leaf") },
    EnergyInfo { energy: EnergyType::Fire, key: "FIRE", label: "炎", color: "#ff4422", token: ":FIRE:", glyph: Some("flame") },
    EnergyInfo { energy: EnergyType::Water, key: "WATER", label: "水", color: "#3399ff", token: ":WATER:", glyph: Some("droplets") },
    EnergyInfo { energy: EnergyType::Lightning, key: "LIGHTNING", label: "雷", color: "#ffcc33", token: ":LIGHTNING:", glyph: Some("zap") },
    EnergyInfo { energy: EnergyType::Psychic, key: "PSYCHIC", label: "超", color: "#ff66aa", token: ":PSYCHIC:", glyph: Some("moon") },
    EnergyInfo { energy: EnergyType::Fighting, key: "FIGHTING", label: "闘", color: "#ff9944", token: ":FIGHTING:", glyph: Some("fist") },
    EnergyInfo { energy: EnergyType::Darkness, key: "DARKNESS", label: "悪", color: "#778899", token: ":DARKNESS:", glyph: Some("moon-inverted") },
    EnergyInfo { energy: EnergyType::Metal, key: "METAL", label: "鋼", color: "#99aabb", token: ":METAL:", glyph: None },
    EnergyInfo { energy: EnergyType::Colorless, key: "COLORLESS", label: "無", color: "#dde0e2", token: ":COLORLESS:", glyph: Some("circle") },
];

impl EnergyType {
    /// All types in table order.
    pub const ALL: [EnergyType; 9] = [
        EnergyType::Grass,
        EnergyType::Fire,
        EnergyType::Water,
        EnergyType::Lightning,
        EnergyType::Psychic,
        EnergyType::Fighting,
        EnergyType::Darkness,
        EnergyType::Metal,
        EnergyType::Colorless,
    ];

    /// Table row for this type.
    #[must_use]
    pub fn info(self) -> &'static EnergyInfo {
        &ENERGY_TABLE[self as usize]
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        self.info().key
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.info().label
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        self.info().color
    }

    #[must_use]
    pub fn token(self) -> &'static str {
        self.info().token
    }

    /// Look up a type by its exact uppercase key.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        ENERGY_TABLE.iter().find(|row| row.key == key).map(|row| row.energy)
    }

    /// Look up a type by key, falling back to `Colorless`.
    #[must_use]
    pub fn from_key_or_default(key: &str) -> Self {
        Self::parse(key).unwrap_or_else(|| {
            log::debug!("unrecognized energy key {key:?}, using colorless");
            Self::default()
        })
    }

    /// Look up a type by its full inline token, colons included.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        ENERGY_TABLE.iter().find(|row| row.token == token).map(|row| row.energy)
    }
}

impl std::fmt::Display for EnergyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_discriminants() {
        for (i, energy) in EnergyType::ALL.iter().enumerate() {
            assert_eq!(ENERGY_TABLE[i].energy, *energy);
            assert_eq!(energy.info().energy, *energy);
        }
    }

    #[test]
    fn test_tokens_wrap_keys() {
        for row in &ENERGY_TABLE {
            assert_eq!(row.token, format!(":{}:", row.key));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(EnergyType::parse("LIGHTNING"), Some(EnergyType::Lightning));
        assert_eq!(EnergyType::parse("Lightning"), None);
        assert_eq!(EnergyType::parse(""), None);
    }

    #[test]
    fn test_fallback_is_colorless() {
        assert_eq!(EnergyType::from_key_or_default("DRAGON"), EnergyType::Colorless);
        assert_eq!(EnergyType::from_key_or_default("GRASS"), EnergyType::Grass);
    }

    #[test]
    fn test_metal_has_no_glyph() {
        assert_eq!(EnergyType::Metal.info().glyph, None);
        assert_eq!(EnergyType::Darkness.info().glyph, Some("moon-inverted"));
    }

    #[test]
    fn test_serialization_uses_keys() {
        let json = serde_json::to_string(&EnergyType::Lightning).unwrap();
        assert_eq!(json, "\"LIGHTNING\"");
        let back: EnergyType = serde_json::from_str("\"COLORLESS\"").unwrap();
        assert_eq!(back, EnergyType::Colorless);
    }
}
