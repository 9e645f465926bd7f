//! Core types: energy table, attack ids, numeric text, configuration, errors.
//!
//! These are shared by both card variants and carry no rendering logic.

pub mod energy;
pub mod id;
pub mod numeric;
pub mod config;
pub mod error;

pub use energy::{EnergyInfo, EnergyType, ENERGY_TABLE};
pub use id::{AttackId, IdStream};
pub use numeric::NumericText;
pub use config::{EditorConfig, SliderRange};
pub use error::{DecodeError, EditError, ExportError, InputError};
