//! Layer Transform Model: per-slot position, scale and image handle.
//!
//! ## Key Types
//!
//! - `LayerKey`: slot key sets (`CollectibleLayer`, `BattleLayer`)
//! - `PercentTransform` / `PixelTransform`: the two coordinate conventions
//! - `LayerModel`: all slots of one editor
//! - `ImageHandle`: opaque decoded image reference

pub mod keys;
pub mod model;
pub mod transform;

pub use keys::{BattleLayer, CollectibleLayer, LayerKey};
pub use model::{ImageHandle, LayerModel, LayerState};
pub use transform::{Axis, LayerTransform, PercentTransform, PixelTransform};
