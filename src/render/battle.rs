//! Variant B composition.
//!
//! Every overlay sits at an absolute position on the 380×475 surface.
//! Unit cards add tribe, attack and hp overlays and place the description
//! box slightly higher; skill cards omit those three entirely.

use crate::cards::{BattleCard, BattleKind};
use crate::layers::{BattleLayer, LayerModel, PixelTransform};

use super::markup::description_lines;
use super::placement::{pixel_css, Placement, Point, Size, TransformOrder};
use super::tree::{
    Content, ImageFit, LayerKind, Node, NodeRole, Rect, RenderTree, TextStyle, TreeBuilder,
};

pub const CARD_SIZE: Size = Size::new(380.0, 475.0);

pub const KEYWORD_COLOR: &str = "#f8bb44";
const STAT_COLOR: &str = "#ffffff";

const COST_BOX: Rect = Rect::new(2.0, -1.0, 85.0, 85.0);
const NAME_ROW_Y: f64 = 241.0;
const DESCRIPTION_WIDTH: f64 = 290.0;
const STAT_BOX: f64 = 75.0;
const STAT_BOTTOM: f64 = 7.0;
const TRIBE_BOTTOM: f64 = 31.0;

/// Battle-card layer transforms.
pub type BattleLayers = LayerModel<BattleLayer, PixelTransform>;

fn full_card() -> Rect {
    Rect::new(0.0, 0.0, CARD_SIZE.width, CARD_SIZE.height)
}

/// Description box, anchored by its bottom inset.
fn description_box(kind: BattleKind) -> Rect {
    let (bottom, height) = match kind {
        BattleKind::Unit => (78.0, 110.0),
        BattleKind::Skill => (70.0, 125.0),
    };
    Rect::new(
        (CARD_SIZE.width - DESCRIPTION_WIDTH) / 2.0,
        CARD_SIZE.height - bottom - height,
        DESCRIPTION_WIDTH,
        height,
    )
}

/// Correction applied to one layer's scale at render time.
///
/// Only the art layer is corrected; the background uses its raw scale.
#[must_use]
pub fn layer_correction(kind: BattleKind, layer: BattleLayer) -> f64 {
    match layer {
        BattleLayer::Art => kind.correction_factor(),
        BattleLayer::Background => 1.0,
    }
}

/// Compose a battle card.
#[must_use]
pub fn render_battle(card: &BattleCard, layers: &BattleLayers) -> RenderTree {
    let mut tree = TreeBuilder::new(CARD_SIZE, "#000000");

    for (slot, kind, role, fit) in [
        (BattleLayer::Background, LayerKind::Background, NodeRole::Background, ImageFit::Cover),
        (BattleLayer::Art, LayerKind::Art, NodeRole::Art, ImageFit::Contain),
    ] {
        let state = layers.get(slot);
        let Some(image) = &state.image else {
            continue;
        };
        let correction = layer_correction(card.kind, slot);
        tree.push(
            kind,
            Node::new(
                role,
                full_card(),
                Content::Image {
                    url: image.shared_url(),
                    fit,
                    css: pixel_css(&state.transform, correction),
                    top_left_origin: false,
                    placement: Placement::pixel(&state.transform, correction),
                },
            ),
        );
    }

    let frame_scale = card.kind.frame_scale();
    tree.push(
        LayerKind::Frame,
        Node::new(
            NodeRole::Frame,
            full_card(),
            Content::Image {
                url: card.kind.frame_image().into(),
                fit: ImageFit::Natural,
                css: format!("scale({frame_scale})"),
                top_left_origin: true,
                placement: Placement {
                    scale: frame_scale,
                    offset: Point::ORIGIN,
                    order: TransformOrder::ScaleThenOffset,
                },
            },
        ),
    );

    tree.push(
        LayerKind::Text,
        Node::text(
            NodeRole::Cost,
            COST_BOX,
            card.cost.as_str(),
            TextStyle::new(58.0, STAT_COLOR),
        ),
    )
    .push(
        LayerKind::Text,
        Node::text(
            NodeRole::Name,
            Rect::new(0.0, NAME_ROW_Y, CARD_SIZE.width, 26.0),
            card.name.clone(),
            TextStyle::new(20.0, STAT_COLOR),
        ),
    )
    .push(
        LayerKind::Text,
        Node::new(
            NodeRole::Description,
            description_box(card.kind),
            Content::Lines {
                lines: description_lines(&card.description),
                style: TextStyle::new(f64::from(card.font_size), STAT_COLOR),
                highlight: KEYWORD_COLOR.to_string(),
            },
        ),
    );

    if card.kind.is_unit() {
        let stat_y = CARD_SIZE.height - STAT_BOTTOM - STAT_BOX;
        tree.push(
            LayerKind::Text,
            Node::text(
                NodeRole::Tribe,
                Rect::new(0.0, CARD_SIZE.height - TRIBE_BOTTOM - 18.0, CARD_SIZE.width, 18.0),
                card.tribe.clone(),
                TextStyle::new(14.0, STAT_COLOR),
            ),
        )
        .push(
            LayerKind::Text,
            Node::text(
                NodeRole::AttackStat,
                Rect::new(5.0, stat_y, STAT_BOX, STAT_BOX),
                card.attack.as_str(),
                TextStyle::new(52.0, STAT_COLOR),
            ),
        )
        .push(
            LayerKind::Text,
            Node::text(
                NodeRole::HpStat,
                Rect::new(CARD_SIZE.width - 10.0 - STAT_BOX, stat_y, STAT_BOX, STAT_BOX),
                card.hp.as_str(),
                TextStyle::new(52.0, STAT_COLOR),
            ),
        );
    }

    tree.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EditorConfig;
    use crate::layers::{Axis, ImageHandle};
    use crate::render::markup::{Span, BLANK_LINE};

    fn layers() -> BattleLayers {
        LayerModel::new(&EditorConfig::default())
    }

    fn skill() -> BattleCard {
        BattleCard {
            kind: BattleKind::Skill,
            ..BattleCard::default()
        }
    }

    #[test]
    fn test_unit_overlays() {
        let tree = render_battle(&BattleCard::default(), &layers());
        assert_eq!(tree.text_of(NodeRole::Cost).as_deref(), Some("6"));
        assert_eq!(tree.text_of(NodeRole::Tribe).as_deref(), Some("冒険者"));
        assert_eq!(tree.text_of(NodeRole::AttackStat).as_deref(), Some("5"));
        assert_eq!(tree.find(NodeRole::HpStat).unwrap().rect, Rect::new(295.0, 393.0, 75.0, 75.0));
        assert_eq!(tree.find(NodeRole::Description).unwrap().rect.y, 287.0);
    }

    #[test]
    fn test_skill_hides_unit_overlays() {
        let tree = render_battle(&skill(), &layers());
        assert!(!tree.contains(NodeRole::Tribe));
        assert!(!tree.contains(NodeRole::AttackStat));
        assert!(!tree.contains(NodeRole::HpStat));
        assert!(tree.contains(NodeRole::Cost));
        assert_eq!(tree.find(NodeRole::Description).unwrap().rect.y, 280.0);
    }

    #[test]
    fn test_no_images_no_image_layers() {
        let tree = render_battle(&BattleCard::default(), &layers());
        assert_eq!(tree.z_order(), vec![LayerKind::Frame, LayerKind::Text]);
    }

    #[test]
    fn test_correction_only_on_art() {
        let mut model = layers();
        model.set_image(BattleLayer::Art, ImageHandle::from_url("blob:art"));
        model.set_image(BattleLayer::Background, ImageHandle::from_url("blob:bg"));
        model.set_position(BattleLayer::Art, Axis::X, 12.0).unwrap();

        let tree = render_battle(&BattleCard::default(), &model);
        match &tree.find(NodeRole::Art).unwrap().content {
            Content::Image { css, placement, .. } => {
                assert_eq!(css, "translate3d(12px, 0px, 0) scale(1.2)");
                assert_eq!(placement.pan(), Point::new(12.0, 0.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        match &tree.find(NodeRole::Background).unwrap().content {
            Content::Image { css, .. } => assert_eq!(css, "translate3d(0px, 0px, 0) scale(1)"),
            other => panic!("unexpected {other:?}"),
        }

        let tree = render_battle(&skill(), &model);
        match &tree.find(NodeRole::Art).unwrap().content {
            Content::Image { placement, .. } => assert!((placement.scale - 1.04).abs() < 1e-12),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_frame_per_kind() {
        let unit = render_battle(&BattleCard::default(), &layers());
        let skill = render_battle(&skill(), &layers());
        let frame = |tree: &RenderTree| match &tree.find(NodeRole::Frame).unwrap().content {
            Content::Image { url, css, top_left_origin, .. } => {
                assert!(*top_left_origin);
                (url.to_string(), css.clone())
            }
            other => panic!("unexpected {other:?}"),
        };
        let (unit_url, unit_css) = frame(&unit);
        let (skill_url, skill_css) = frame(&skill);
        assert_ne!(unit_url, skill_url);
        assert_eq!(unit_css, "scale(1.07)");
        assert_eq!(skill_css, "scale(1)");
    }

    #[test]
    fn test_description_rows() {
        let tree = render_battle(&BattleCard::default(), &layers());
        match &tree.find(NodeRole::Description).unwrap().content {
            Content::Lines { lines, highlight, style } => {
                assert_eq!(lines.len(), 6);
                assert_eq!(lines[0][0], Span::Keyword("おうえん".into()));
                assert_eq!(lines[4], vec![Span::Text(BLANK_LINE.into())]);
                assert_eq!(highlight, KEYWORD_COLOR);
                assert_eq!(style.size, 16.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
