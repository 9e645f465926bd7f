//! # rust-cardsmith
//!
//! Headless editors for two styles of trading-card mock-up.
//!
//! ## Design Principles
//!
//! 1. **Controlled State**: Every edit replaces the card record with an
//!    updated copy. Readers hold snapshots; nothing mutates behind them.
//!
//! 2. **Pure Rendering**: The render tree is a function of the card record
//!    and the layer slots. Same inputs, same tree.
//!
//! 3. **Configuration Over Convention**: Caps, slider ranges and the tribe
//!    limit live in `EditorConfig`, not in the editors.
//!
//! ## Architecture
//!
//! - **Two Variants**: a collectible style (energy types, attacks, rarity)
//!   and a battle style (unit/skill, keyword text). They share the store,
//!   the layer model and the renderer primitives.
//!
//! - **Background Decoding**: Uploaded images decode on tokio's blocking
//!   pool. A newer upload for the same slot cancels the older one.
//!
//! ## Modules
//!
//! - `core`: Energy table, attack ids, numeric text, configuration, errors
//! - `cards`: Card records and field coercion
//! - `store`: Card state store
//! - `layers`: Per-slot image transforms
//! - `render`: Composition renderer and inline markup
//! - `decode`: Image decoding and the per-slot decode scheduler
//! - `export`: Print hand-off
//! - `editor`: Variant editors and control descriptors

pub mod core;
pub mod cards;
pub mod store;
pub mod layers;
pub mod render;
pub mod decode;
pub mod export;
pub mod editor;

// Re-export commonly used types
pub use crate::core::{
    AttackId, IdStream,
    EnergyType, EnergyInfo, ENERGY_TABLE,
    NumericText,
    EditorConfig, SliderRange,
    EditError, DecodeError, ExportError, InputError,
};

pub use crate::cards::{
    CardRecord, FieldValue,
    CollectibleCard, CollectibleField, Stage, Attack, AttackPatch, EnergyCost,
    BattleCard, BattleField, BattleKind, DEFAULT_TRIBE,
};

pub use crate::store::CardStore;

pub use crate::layers::{
    LayerKey, CollectibleLayer, BattleLayer,
    LayerTransform, PercentTransform, PixelTransform, Axis,
    LayerModel, LayerState, ImageHandle,
};

pub use crate::render::{
    render_collectible, render_battle, CollectibleLayers, BattleLayers,
    RenderTree, RenderLayer, Node, NodeRole, Content, LayerKind, Rect, TextStyle, ImageFit,
    Segment, Span, tokenize_energy, tokenize_keywords, description_lines,
};

pub use crate::decode::{decode_image, decode_file, ImageSource, DecodeScheduler, DecodeCompletion};

pub use crate::export::{ExportOutcome, ExportTrigger, PrintSettings, PrintSurface, PrintJob};

pub use crate::editor::{
    CollectibleEditor, CollectibleInput,
    BattleEditor, BattleInput,
    Control, ControlKind, Choice,
};
