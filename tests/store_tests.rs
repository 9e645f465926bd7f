//! Card store integration tests.
//!
//! These tests drive the store through its public API only and check the
//! invariants callers rely on: caps, identity of attacks across edits, and
//! snapshot isolation.

use im::Vector;

use rust_cardsmith::cards::{AttackPatch, BattleCard, BattleField, CollectibleCard, CollectibleField};
use rust_cardsmith::core::{AttackId, EditorConfig, EnergyType};
use rust_cardsmith::store::CardStore;

fn collectible() -> CardStore<CollectibleCard> {
    CardStore::new(CollectibleCard::default(), EditorConfig::default())
}

// =============================================================================
// Attack List Tests
// =============================================================================

/// Test that adding and then removing an attack restores the original card.
#[test]
fn test_add_then_remove_restores_card() {
    let mut store = collectible();
    let initial = store.snapshot();

    let id = store.add_attack().unwrap();
    assert_eq!(store.state().attacks.len(), 2);
    assert!(store.remove_attack(id));

    assert_eq!(*store.state(), *initial);
    assert!(store.revision() > 0);
}

/// Test that filling an empty attack list to the cap and emptying it again
/// restores the original card.
#[test]
fn test_empty_list_fill_and_drain_round_trip() {
    let initial = CollectibleCard {
        attacks: Vector::new(),
        ..CollectibleCard::default()
    };
    let mut store = CardStore::new(initial.clone(), EditorConfig::default());

    let first = store.add_attack().unwrap();
    let second = store.add_attack().unwrap();
    assert_ne!(first, second);
    assert!(store.add_attack().is_none());
    assert_eq!(store.state().attacks.len(), 2);

    assert!(store.remove_attack(first));
    assert!(store.remove_attack(second));
    assert_eq!(*store.state(), initial);
}

/// Test that the attack cap holds no matter how often add is requested.
#[test]
fn test_attack_cap_holds() {
    let mut store = CardStore::new(
        CollectibleCard::default(),
        EditorConfig::default().with_max_attacks(3),
    );
    for _ in 0..10 {
        store.add_attack();
    }
    assert_eq!(store.state().attacks.len(), 3);

    let ids: Vec<AttackId> = store.state().attacks.iter().map(|a| a.id).collect();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

/// Test that a patch targets the attack by id even after a removal shifts
/// positions.
#[test]
fn test_patch_follows_id_not_position() {
    let mut store = collectible();
    let first = store.state().attacks[0].id;
    let second = store.add_attack().unwrap();

    assert!(store.remove_attack(first));
    assert!(store.update_attack(second, &AttackPatch::new().name("10まんボルト").damage("90")));

    let attack = store.state().attack(second).unwrap();
    assert_eq!(attack.name, "10まんボルト");
    assert_eq!(attack.damage, "90");
    assert!(!store.update_attack(first, &AttackPatch::new().name("gone")));
}

// =============================================================================
// Energy Cost Tests
// =============================================================================

/// Test that energy icons stop at the cap and keep their order.
#[test]
fn test_energy_cap_and_order() {
    let mut store = collectible();
    let id = store.state().attacks[0].id;
    store.update_attack(id, &AttackPatch::new().energy(&[]));

    for energy in [EnergyType::Fire, EnergyType::Water, EnergyType::Fire, EnergyType::Metal, EnergyType::Grass] {
        store.add_energy(id, energy);
    }
    let cost: Vec<EnergyType> = store.state().attack(id).unwrap().energy.to_vec();
    assert_eq!(cost, vec![EnergyType::Fire, EnergyType::Water, EnergyType::Fire, EnergyType::Metal]);

    assert!(store.remove_energy_at(id, 1));
    let cost: Vec<EnergyType> = store.state().attack(id).unwrap().energy.to_vec();
    assert_eq!(cost, vec![EnergyType::Fire, EnergyType::Fire, EnergyType::Metal]);
}

/// Test that removing past the end changes nothing, however often it runs.
#[test]
fn test_out_of_range_energy_removal_is_idempotent() {
    let mut store = collectible();
    let id = store.state().attacks[0].id;
    let before = store.snapshot();
    let revision = store.revision();

    for _ in 0..3 {
        assert!(!store.remove_energy_at(id, 99));
    }
    assert_eq!(*store.state(), *before);
    assert_eq!(store.revision(), revision);
}

// =============================================================================
// Field Tests
// =============================================================================

/// Test that the header scenario reads back exactly as entered.
#[test]
fn test_header_fields() {
    let mut store = collectible();
    store.update_field(CollectibleField::Name, "ピカチュウ").unwrap();
    store.update_field(CollectibleField::Hp, "60").unwrap();
    store.update_field(CollectibleField::PrimaryType, "LIGHTNING").unwrap();

    let card = store.state();
    assert_eq!(card.name, "ピカチュウ");
    assert_eq!(card.hp.as_int(), Some(60));
    assert_eq!(card.primary_type, EnergyType::Lightning);
}

/// Test that a snapshot taken before an edit never sees it.
#[test]
fn test_snapshot_isolation() {
    let mut store = CardStore::new(BattleCard::default(), EditorConfig::default());
    let before = store.snapshot();
    store.update_field(BattleField::Name, "竜王").unwrap();
    assert_ne!(before.name, "竜王");
    assert_eq!(store.state().name, "竜王");
}
