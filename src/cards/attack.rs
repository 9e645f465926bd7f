//! Attacks (variant A).
//!
//! An attack's energy cost is an ordered list: the order is the icon
//! display order. The list is capped; pushes past the cap are dropped.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{AttackId, EnergyType};

/// Ordered energy cost. Inline capacity covers the default cap.
pub type EnergyCost = SmallVec<[EnergyType; 4]>;

/// One attack row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    /// Stable identity across reorders and edits.
    pub id: AttackId,

    pub name: String,

    /// Free text; may carry a suffix such as `+` or `×`.
    pub damage: String,

    /// Free text with inline `:TYPE:` tokens.
    pub description: String,

    /// Energy cost in display order.
    pub energy: EnergyCost,
}

impl Attack {
    /// A blank attack with no cost.
    #[must_use]
    pub fn empty(id: AttackId) -> Self {
        Self {
            id,
            name: String::new(),
            damage: String::new(),
            description: String::new(),
            energy: EnergyCost::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: impl Into<String>) -> Self {
        self.damage = damage.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_energy(mut self, energy: &[EnergyType]) -> Self {
        self.energy = EnergyCost::from_slice(energy);
        self
    }

    /// Append one energy icon unless the cost is already at `cap`.
    ///
    /// Returns whether the icon was added.
    pub fn push_energy(&mut self, energy: EnergyType, cap: usize) -> bool {
        if self.energy.len() >= cap {
            return false;
        }
        self.energy.push(energy);
        true
    }

    /// Remove the icon at `index`; out-of-range indices are ignored.
    ///
    /// Returns whether an icon was removed.
    pub fn remove_energy_at(&mut self, index: usize) -> bool {
        if index >= self.energy.len() {
            return false;
        }
        self.energy.remove(index);
        true
    }
}

/// Partial update for an attack. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackPatch {
    pub name: Option<String>,
    pub damage: Option<String>,
    pub description: Option<String>,
    pub energy: Option<EnergyCost>,
}

impl AttackPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn damage(mut self, damage: impl Into<String>) -> Self {
        self.damage = Some(damage.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn energy(mut self, energy: &[EnergyType]) -> Self {
        self.energy = Some(EnergyCost::from_slice(energy));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.damage.is_none()
            && self.description.is_none()
            && self.energy.is_none()
    }

    /// Apply the patch. A replacement energy list is truncated to `cap`.
    pub fn apply(&self, attack: &mut Attack, cap: usize) {
        if let Some(name) = &self.name {
            attack.name.clone_from(name);
        }
        if let Some(damage) = &self.damage {
            attack.damage.clone_from(damage);
        }
        if let Some(description) = &self.description {
            attack.description.clone_from(description);
        }
        if let Some(energy) = &self.energy {
            attack.energy = energy.iter().copied().take(cap).collect();
        }
    }
}
