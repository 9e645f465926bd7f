//! Render tree: the output of the composition renderer.
//!
//! A [`RenderTree`] is an ordered stack of [`RenderLayer`]s, back to front.
//! Layer order is fixed by [`LayerKind`] and never depends on user input;
//! a layer with no nodes is left out of the tree entirely.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::EnergyType;

use super::markup::Span;
use super::placement::{Placement, Size};

/// Axis-aligned box in card pixels, origin top left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Stacking slot, back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Texture,
    Background,
    Art,
    Frame,
    Text,
    Badge,
}

impl LayerKind {
    pub const ALL: [LayerKind; 6] = [
        LayerKind::Texture,
        LayerKind::Background,
        LayerKind::Art,
        LayerKind::Frame,
        LayerKind::Text,
        LayerKind::Badge,
    ];
}

/// What a node represents on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", content = "index", rename_all = "snake_case")]
pub enum NodeRole {
    Texture,
    Background,
    Art,
    Frame,
    PreEvolution,
    StageBadge,
    EvolvesFrom,
    Name,
    ExSuffix,
    HpLabel,
    Hp,
    TypeIcon,
    AbilityTag,
    AbilityName,
    AbilityText,
    AttackCost(usize),
    AttackName(usize),
    AttackDamage(usize),
    AttackText(usize),
    WeaknessLabel,
    Weakness,
    RetreatLabel,
    Retreat,
    Rarity,
    ExRule,
    Cost,
    Description,
    Tribe,
    AttackStat,
    HpStat,
}

/// How an image fills its box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    /// Fill the box, cropping overflow.
    Cover,
    /// Fit inside the box, letterboxed.
    Contain,
    /// Natural aspect at the box height.
    Natural,
}

/// Text appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: f64,
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl TextStyle {
    #[must_use]
    pub fn new(size: f64, color: impl Into<String>) -> Self {
        Self {
            size,
            color: color.into(),
            bold: true,
            italic: false,
            background: None,
        }
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub fn on(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }
}

/// Node payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    /// Fractal noise overlay.
    Noise { opacity: f64 },
    /// Two-stop diagonal gradient.
    Gradient { from: String, to: String },
    /// Solid background with a metallic gradient border.
    Border { width: f64, gradient: String },
    Image {
        url: Arc<str>,
        fit: ImageFit,
        /// CSS `transform` value.
        css: String,
        /// `true` when the transform origin is the top-left corner
        /// instead of the box centre.
        top_left_origin: bool,
        placement: Placement,
    },
    /// Empty image slot.
    Placeholder { icon: String },
    Text { spans: Vec<Span>, style: TextStyle },
    /// One row per source line.
    Lines {
        lines: Vec<Vec<Span>>,
        style: TextStyle,
        highlight: String,
    },
    Icons { icons: Vec<EnergyType>, size: f64 },
    Diamonds { count: u8, color: String },
}

impl Content {
    /// Plain text of a text node, icons as their tokens.
    #[must_use]
    pub fn plain_text(&self) -> Option<String> {
        let join = |spans: &[Span], out: &mut String| {
            for span in spans {
                match span {
                    Span::Text(s) | Span::Keyword(s) => out.push_str(s),
                    Span::Icon(e) => out.push_str(e.token()),
                }
            }
        };
        match self {
            Content::Text { spans, .. } => {
                let mut out = String::new();
                join(spans, &mut out);
                Some(out)
            }
            Content::Lines { lines, .. } => {
                let rows: Vec<String> = lines
                    .iter()
                    .map(|spans| {
                        let mut out = String::new();
                        join(spans, &mut out);
                        out
                    })
                    .collect();
                Some(rows.join("\n"))
            }
            _ => None,
        }
    }
}

/// One drawable element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub role: NodeRole,
    pub rect: Rect,
    pub content: Content,
}

impl Node {
    #[must_use]
    pub fn new(role: NodeRole, rect: Rect, content: Content) -> Self {
        Self { role, rect, content }
    }

    /// Single-run text node.
    #[must_use]
    pub fn text(role: NodeRole, rect: Rect, text: impl Into<String>, style: TextStyle) -> Self {
        Self::new(
            role,
            rect,
            Content::Text {
                spans: vec![Span::Text(text.into())],
                style,
            },
        )
    }
}

/// All nodes in one stacking slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderLayer {
    pub kind: LayerKind,
    pub nodes: Vec<Node>,
}

/// Complete visual description of one card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderTree {
    pub size: Size,
    /// Card background colour.
    pub background: String,
    /// Back to front.
    pub layers: Vec<RenderLayer>,
}

impl RenderTree {
    /// Stacking order of the layers present.
    #[must_use]
    pub fn z_order(&self) -> Vec<LayerKind> {
        self.layers.iter().map(|l| l.kind).collect()
    }

    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> Option<&RenderLayer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// All nodes, back to front.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.layers.iter().flat_map(|l| l.nodes.iter())
    }

    #[must_use]
    pub fn find(&self, role: NodeRole) -> Option<&Node> {
        self.nodes().find(|n| n.role == role)
    }

    #[must_use]
    pub fn contains(&self, role: NodeRole) -> bool {
        self.find(role).is_some()
    }

    /// Plain text of the node with `role`, if it is a text node.
    #[must_use]
    pub fn text_of(&self, role: NodeRole) -> Option<String> {
        self.find(role).and_then(|n| n.content.plain_text())
    }
}

/// Collects nodes per slot and assembles them in stacking order.
#[derive(Debug)]
pub(crate) struct TreeBuilder {
    size: Size,
    background: String,
    slots: [Vec<Node>; 6],
}

impl TreeBuilder {
    pub(crate) fn new(size: Size, background: impl Into<String>) -> Self {
        Self {
            size,
            background: background.into(),
            slots: Default::default(),
        }
    }

    pub(crate) fn push(&mut self, kind: LayerKind, node: Node) -> &mut Self {
        self.slots[kind as usize].push(node);
        self
    }

    pub(crate) fn finish(self) -> RenderTree {
        let layers = LayerKind::ALL
            .iter()
            .zip(self.slots)
            .filter(|(_, nodes)| !nodes.is_empty())
            .map(|(kind, nodes)| RenderLayer { kind: *kind, nodes })
            .collect();
        RenderTree {
            size: self.size,
            background: self.background,
            layers,
        }
    }
}
