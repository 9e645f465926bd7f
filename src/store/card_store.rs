//! Card State Store.
//!
//! A `CardStore` holds one card record behind an `Arc`. Every mutation
//! clones the current record, edits the clone, and swaps it in, so a
//! snapshot taken before a mutation never observes it. Cloning is cheap
//! because list fields are `im` persistent vectors.
//!
//! Operations that find nothing to do (unknown attack id, list at its
//! cap, out-of-range index) leave the current record and revision alone.
//!
//! ```
//! use rust_cardsmith::cards::{CollectibleCard, CollectibleField};
//! use rust_cardsmith::core::EditorConfig;
//! use rust_cardsmith::store::CardStore;
//!
//! let mut store = CardStore::new(CollectibleCard::default(), EditorConfig::default());
//! let before = store.snapshot();
//!
//! store.update_field(CollectibleField::Name, "Pikachu").unwrap();
//!
//! assert_eq!(store.state().name, "Pikachu");
//! assert_eq!(before.name, "アルセウス"); // old snapshot untouched
//! ```

use std::sync::Arc;

use crate::cards::{Attack, AttackPatch, CardRecord, CollectibleCard, FieldValue};
use crate::core::{AttackId, EditError, EditorConfig, EnergyType, IdStream};

/// Replace-with-copy store for one card record.
#[derive(Clone, Debug)]
pub struct CardStore<C: CardRecord> {
    current: Arc<C>,
    revision: u64,
    config: EditorConfig,
    ids: IdStream,
}

impl<C: CardRecord> CardStore<C> {
    /// Create a store seeded with `initial`.
    #[must_use]
    pub fn new(initial: C, config: EditorConfig) -> Self {
        let ids = IdStream::new(config.id_seed);
        Self {
            current: Arc::new(initial),
            revision: 0,
            config,
            ids,
        }
    }

    /// The current record.
    #[must_use]
    pub fn state(&self) -> &C {
        &self.current
    }

    /// A shared handle to the current record.
    #[must_use]
    pub fn snapshot(&self) -> Arc<C> {
        Arc::clone(&self.current)
    }

    /// Number of mutations applied so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Apply `edit` to a copy of the current record and swap it in if
    /// `edit` reports a change.
    fn replace_with(&mut self, edit: impl FnOnce(&mut C, &EditorConfig) -> bool) -> bool {
        let mut next = C::clone(&self.current);
        if !edit(&mut next, &self.config) {
            return false;
        }
        self.current = Arc::new(next);
        self.revision += 1;
        true
    }

    /// Replace one top-level attribute.
    ///
    /// Numeric-as-text fields keep unparsable input verbatim; a value that
    /// cannot be coerced at all is refused and the record is unchanged.
    pub fn update_field(
        &mut self,
        field: C::Field,
        value: impl Into<FieldValue>,
    ) -> Result<(), EditError> {
        let value = value.into();
        let mut result = Ok(());
        self.replace_with(|card, config| match card.set_field(field, value, config) {
            Ok(()) => true,
            Err(err) => {
                result = Err(err);
                false
            }
        });
        match &result {
            Ok(()) => log::debug!("updated {field:?} (revision {})", self.revision),
            Err(err) => log::warn!("refused update of {field:?}: {err}"),
        }
        result
    }

    /// Replace the whole record.
    pub fn replace(&mut self, card: C) {
        self.replace_with(|current, _| {
            *current = card;
            true
        });
    }
}

impl CardStore<CollectibleCard> {
    /// Merge `patch` into the attack with `id`. No-op if `id` is unknown.
    pub fn update_attack(&mut self, id: AttackId, patch: &AttackPatch) -> bool {
        let applied = self.replace_with(|card, config| {
            let Some(index) = card.attack_index(id) else {
                return false;
            };
            let mut attack = card.attacks[index].clone();
            patch.apply(&mut attack, config.max_energy);
            card.attacks.set(index, attack);
            true
        });
        if !applied {
            log::debug!("update_attack: {id} not found");
        }
        applied
    }

    /// Append a blank attack with a fresh id. No-op at the attack cap.
    ///
    /// Returns the new id when an attack was added.
    pub fn add_attack(&mut self) -> Option<AttackId> {
        if self.current.attacks.len() >= self.config.max_attacks {
            log::debug!("add_attack: already at cap of {}", self.config.max_attacks);
            return None;
        }
        let current = Arc::clone(&self.current);
        let id = self.ids.next_id(|candidate| current.attack(candidate).is_some());
        self.replace_with(|card, _| {
            card.attacks.push_back(Attack::empty(id));
            true
        });
        Some(id)
    }

    /// Remove the attack with `id`. No-op if not found.
    pub fn remove_attack(&mut self, id: AttackId) -> bool {
        self.replace_with(|card, _| match card.attack_index(id) {
            Some(index) => {
                card.attacks.remove(index);
                true
            }
            None => false,
        })
    }

    /// Append `energy` to an attack's cost. No-op at the energy cap or
    /// when `attack_id` is unknown.
    pub fn add_energy(&mut self, attack_id: AttackId, energy: EnergyType) -> bool {
        self.replace_with(|card, config| {
            let Some(index) = card.attack_index(attack_id) else {
                return false;
            };
            let mut attack = card.attacks[index].clone();
            if !attack.push_energy(energy, config.max_energy) {
                return false;
            }
            card.attacks.set(index, attack);
            true
        })
    }

    /// Remove the energy icon at `index`. Out-of-range indices and unknown
    /// attacks are ignored.
    pub fn remove_energy_at(&mut self, attack_id: AttackId, index: usize) -> bool {
        self.replace_with(|card, _| {
            let Some(position) = card.attack_index(attack_id) else {
                return false;
            };
            let mut attack = card.attacks[position].clone();
            if !attack.remove_energy_at(index) {
                return false;
            }
            card.attacks.set(position, attack);
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BattleCard, BattleField, CollectibleField};

    fn store() -> CardStore<CollectibleCard> {
        CardStore::new(CollectibleCard::default(), EditorConfig::default())
    }

    #[test]
    fn test_update_field_bumps_revision() {
        let mut store = store();
        store.update_field(CollectibleField::Hp, "60").unwrap();
        assert_eq!(store.revision(), 1);
        assert_eq!(store.state().hp.as_str(), "60");
    }

    #[test]
    fn test_refused_update_keeps_revision() {
        let mut store = store();
        assert!(store.update_field(CollectibleField::IsRare, "maybe").is_err());
        assert_eq!(store.revision(), 0);
        assert!(store.state().is_rare);
    }

    #[test]
    fn test_snapshot_isolated_from_mutation() {
        let mut store = store();
        let snap = store.snapshot();
        let id = store.state().attacks[0].id;
        store.add_energy(id, EnergyType::Fire);
        assert_eq!(snap.attacks[0].energy.len(), 3);
        assert_eq!(store.state().attacks[0].energy.len(), 4);
    }

    #[test]
    fn test_add_attack_caps_at_two() {
        let mut store = store();
        assert!(store.add_attack().is_some());
        let revision = store.revision();
        assert_eq!(store.add_attack(), None);
        assert_eq!(store.state().attacks.len(), 2);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_added_ids_are_unique() {
        let mut store = store();
        let first = store.state().attacks[0].id;
        let id = store.add_attack().unwrap();
        assert_ne!(id, first);
    }

    #[test]
    fn test_update_attack_unknown_id() {
        let mut store = store();
        assert!(!store.update_attack(AttackId(999), &AttackPatch::new().name("x")));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_update_attack_merges() {
        let mut store = store();
        let id = store.state().attacks[0].id;
        assert!(store.update_attack(id, &AttackPatch::new().name("Gigaton")));
        let attack = store.state().attack(id).unwrap();
        assert_eq!(attack.name, "Gigaton");
        assert_eq!(attack.damage, "70+");
    }

    #[test]
    fn test_remove_attack() {
        let mut store = store();
        let id = store.state().attacks[0].id;
        assert!(store.remove_attack(id));
        assert!(store.state().attacks.is_empty());
        assert!(!store.remove_attack(id));
    }

    #[test]
    fn test_energy_cap_and_removal() {
        let mut store = store();
        let id = store.state().attacks[0].id;
        assert!(store.add_energy(id, EnergyType::Water));
        assert!(!store.add_energy(id, EnergyType::Water));
        assert!(!store.remove_energy_at(id, 4));
        assert!(store.remove_energy_at(id, 3));
        assert_eq!(store.state().attacks[0].energy.len(), 3);
    }

    #[test]
    fn test_battle_store() {
        let mut store = CardStore::new(BattleCard::default(), EditorConfig::default());
        store.update_field(BattleField::Name, "Slime").unwrap();
        assert_eq!(store.state().name, "Slime");
    }

    #[test]
    fn test_replace() {
        let mut store = store();
        let mut card = CollectibleCard::default();
        card.name = "Mew".into();
        store.replace(card);
        assert_eq!(store.state().name, "Mew");
        assert_eq!(store.revision(), 1);
    }
}
