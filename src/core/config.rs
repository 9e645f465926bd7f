//! Editor configuration.
//!
//! `EditorConfig` carries the list caps and slider ranges that both the
//! input surface and the programmatic setters enforce. Defaults match the
//! shipped editors; hosts can deserialize an override.

use serde::{Deserialize, Serialize};

/// Inclusive numeric range with a UI step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Clamp a finite value into the range.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Configuration shared by both card editors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Maximum attacks per card (variant A).
    pub max_attacks: usize,

    /// Maximum energy icons per attack cost.
    pub max_energy: usize,

    /// Rarity diamonds.
    pub rarity: SliderRange,

    /// Retreat cost icons.
    pub retreat: SliderRange,

    /// Percentage-convention position (x and y).
    pub percent_position: SliderRange,

    /// Percentage-convention scale.
    pub percent_scale: SliderRange,

    /// Pixel-convention offset (x and y).
    pub pixel_offset: SliderRange,

    /// Pixel-convention scale multiplier.
    pub pixel_scale: SliderRange,

    /// Description font size (variant B).
    pub font_size: SliderRange,

    /// Tribe length limit in characters (variant B).
    pub tribe_max_chars: usize,

    /// Seed for attack id allocation.
    pub id_seed: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_attacks: 2,
            max_energy: 4,
            rarity: SliderRange::new(1.0, 5.0, 1.0),
            retreat: SliderRange::new(0.0, 4.0, 1.0),
            percent_position: SliderRange::new(0.0, 100.0, 1.0),
            percent_scale: SliderRange::new(10.0, 800.0, 1.0),
            pixel_offset: SliderRange::new(-500.0, 500.0, 1.0),
            pixel_scale: SliderRange::new(0.1, 5.0, 0.01),
            font_size: SliderRange::new(10.0, 30.0, 1.0),
            tribe_max_chars: 5,
            id_seed: 42,
        }
    }
}

impl EditorConfig {
    /// Set the attack cap.
    #[must_use]
    pub fn with_max_attacks(mut self, max: usize) -> Self {
        self.max_attacks = max;
        self
    }

    /// Set the energy cost cap.
    #[must_use]
    pub fn with_max_energy(mut self, max: usize) -> Self {
        self.max_energy = max;
        self
    }

    /// Set the id seed.
    #[must_use]
    pub fn with_id_seed(mut self, seed: u64) -> Self {
        self.id_seed = seed;
        self
    }
}
