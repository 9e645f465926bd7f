//! Composition Renderer: card state + layer transforms to a render tree.
//!
//! Rendering is a pure function of its inputs. Each variant has its own
//! fixed layout; both share the placement math, the markup tokenizers and
//! the tree types.
//!
//! ## Key Types
//!
//! - `RenderTree`: ordered layers of positioned nodes
//! - `Placement`: resolved translate + scale of one image layer
//! - `Segment` / `Span`: tokenized inline markup

pub mod battle;
pub mod collectible;
pub mod layout;
pub mod markup;
pub mod placement;
pub mod tree;

pub use battle::{render_battle, BattleLayers};
pub use collectible::{render_collectible, CollectibleLayers};
pub use markup::{description_lines, source_text, tokenize_energy, tokenize_keywords, Segment, Span};
pub use placement::{percent_css, pixel_css, Placement, Point, Size, TransformOrder};
pub use tree::{
    Content, ImageFit, LayerKind, Node, NodeRole, Rect, RenderLayer, RenderTree, TextStyle,
};
