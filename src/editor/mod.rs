//! Editors: one per card variant.
//!
//! Each editor wires the card store, the layer slots, the decode scheduler
//! and the export trigger together, and describes the controls the input
//! surface should show for the current state.

pub mod battle;
pub mod collectible;
pub mod controls;

pub use battle::{BattleEditor, BattleInput};
pub use collectible::{CollectibleEditor, CollectibleInput};
pub use controls::{energy_choices, find, Choice, Control, ControlKind};
