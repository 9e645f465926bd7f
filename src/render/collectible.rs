//! Variant A composition.
//!
//! The card is 380×532. Header, illustration window and footer sit at fixed
//! positions; the ability and attack blocks flow top to bottom between
//! them, so hiding the ability moves the attacks up while HP, weakness and
//! the badges stay put.

use crate::cards::{Attack, CollectibleCard};
use crate::core::EnergyType;
use crate::layers::{CollectibleLayer, ImageHandle, LayerModel, PercentTransform};

use super::layout::{icons_width, spans_width, wrapped_lines, FlowLayout};
use super::markup::{tokenize_energy, Span};
use super::placement::{percent_css, Placement, Size};
use super::tree::{
    Content, ImageFit, LayerKind, Node, NodeRole, Rect, RenderTree, TextStyle, TreeBuilder,
};

pub const CARD_SIZE: Size = Size::new(380.0, 532.0);

/// Illustration window: 35 px side insets, 80 px down, 36% of the card height.
pub const ART_WINDOW: Rect = Rect::new(35.0, 80.0, 310.0, 191.52);

/// Art is drawn at this fraction of the window height before scaling.
const ART_HEIGHT_RATIO: f64 = 0.95;

const PAD_X: f64 = 22.0;
const PAD_TOP: f64 = 26.0;
const PAD_BOTTOM: f64 = 22.0;
const HEADER_HEIGHT: f64 = 44.0;
const CONTENT_HEIGHT: f64 = CARD_SIZE.height - PAD_TOP - PAD_BOTTOM;

/// Below the header, a 40% spacer and a 32 px margin.
pub const FLOW_TOP: f64 = PAD_TOP + HEADER_HEIGHT + 0.4 * CONTENT_HEIGHT + 32.0;
const FLOW_GAP: f64 = 16.0;
const BLOCK_X: f64 = PAD_X + 8.0;
const BLOCK_WIDTH: f64 = CARD_SIZE.width - 2.0 * BLOCK_X;

const BOTTOM_ROW: Rect = Rect::new(PAD_X, 482.0, 336.0, 28.0);
const STAT_ROW_Y: f64 = 445.0;

const PRE_EVOLUTION_SLOT: f64 = 42.0;

const ABILITY_RED: &str = "#cc0000";
const DIAMOND_BLUE: &str = "#0ea5e9";
const EX_GOLD: &str = "#facc15";
const PLACEHOLDER_FROM: &str = "#e5e7eb";
const PLACEHOLDER_TO: &str = "#d1d5db";
const RARE_BORDER: &str =
    "linear-gradient(135deg, #cbd5e1 0%, #ffffff 25%, #94a3b8 50%, #f1f5f9 75%, #475569 100%)";

pub const EX_RULE_TITLE: &str = "exルール";
pub const EX_RULE_TEXT: &str = "ポケモンexがきぜつしたとき、相手はサイドを2ポイントとる。";
pub const ABILITY_TAG: &str = "特性";

/// Collectible-card layer transforms.
pub type CollectibleLayers = LayerModel<CollectibleLayer, PercentTransform>;

/// Compose a collectible card.
#[must_use]
pub fn render_collectible(card: &CollectibleCard, layers: &CollectibleLayers) -> RenderTree {
    let mut tree = TreeBuilder::new(CARD_SIZE, card.card_background_color.clone());

    tree.push(
        LayerKind::Texture,
        Node::new(
            NodeRole::Texture,
            Rect::new(0.0, 0.0, CARD_SIZE.width, CARD_SIZE.height),
            Content::Noise { opacity: 0.2 },
        ),
    );

    push_background(&mut tree, layers);
    push_art(&mut tree, layers);

    if card.is_rare {
        tree.push(
            LayerKind::Frame,
            Node::new(
                NodeRole::Frame,
                Rect::new(0.0, 0.0, CARD_SIZE.width, CARD_SIZE.height),
                Content::Border {
                    width: 12.0,
                    gradient: RARE_BORDER.to_string(),
                },
            ),
        );
    }

    push_header(&mut tree, card, layers.image(CollectibleLayer::PreEvolution));
    push_blocks(&mut tree, card);
    push_footer(&mut tree, card);

    tree.finish()
}

fn push_background(tree: &mut TreeBuilder, layers: &CollectibleLayers) {
    let state = layers.get(CollectibleLayer::Background);
    let content = match &state.image {
        Some(image) => Content::Image {
            url: image.shared_url(),
            fit: ImageFit::Cover,
            css: percent_css(&state.transform),
            top_left_origin: false,
            placement: Placement::percent(&state.transform, ART_WINDOW.size()),
        },
        None => Content::Gradient {
            from: PLACEHOLDER_FROM.to_string(),
            to: PLACEHOLDER_TO.to_string(),
        },
    };
    tree.push(LayerKind::Background, Node::new(NodeRole::Background, ART_WINDOW, content));
}

/// Box of the art element: 95% of the window height at the image's own
/// aspect ratio, centred in the window.
fn art_box(image: &ImageHandle) -> Rect {
    let height = ART_WINDOW.height * ART_HEIGHT_RATIO;
    let width = match image.dimensions() {
        Some((w, h)) if h > 0 => height * f64::from(w) / f64::from(h),
        _ => height,
    };
    Rect::new(
        ART_WINDOW.x + (ART_WINDOW.width - width) / 2.0,
        ART_WINDOW.y + (ART_WINDOW.height - height) / 2.0,
        width,
        height,
    )
}

fn push_art(tree: &mut TreeBuilder, layers: &CollectibleLayers) {
    let state = layers.get(CollectibleLayer::Art);
    let Some(image) = &state.image else {
        return;
    };
    let rect = art_box(image);
    tree.push(
        LayerKind::Art,
        Node::new(
            NodeRole::Art,
            rect,
            Content::Image {
                url: image.shared_url(),
                fit: ImageFit::Natural,
                css: percent_css(&state.transform),
                top_left_origin: false,
                placement: Placement::percent(&state.transform, rect.size()),
            },
        ),
    );
}

fn push_header(tree: &mut TreeBuilder, card: &CollectibleCard, pre_evolution: Option<&ImageHandle>) {
    let header_bottom = PAD_TOP + HEADER_HEIGHT;
    let mut x = PAD_X;

    if card.stage.is_evolved() {
        let slot = Rect::new(x, header_bottom - PRE_EVOLUTION_SLOT, PRE_EVOLUTION_SLOT, PRE_EVOLUTION_SLOT);
        let content = match pre_evolution {
            Some(image) => Content::Image {
                url: image.shared_url(),
                fit: ImageFit::Cover,
                css: String::new(),
                top_left_origin: false,
                placement: Placement::IDENTITY,
            },
            None => Content::Placeholder {
                icon: "image".to_string(),
            },
        };
        tree.push(LayerKind::Text, Node::new(NodeRole::PreEvolution, slot, content));
        x += PRE_EVOLUTION_SLOT + 8.0;

        let caption = format!("{}から進化", card.stage.label());
        tree.push(
            LayerKind::Text,
            Node::text(
                NodeRole::EvolvesFrom,
                Rect::new(x, header_bottom - 30.0, caption.chars().count() as f64 * 7.0, 8.0),
                caption,
                TextStyle::new(7.0, card.sub_text_color.clone()),
            ),
        );
    } else {
        let badge = Rect::new(x, header_bottom - 20.0, 28.0, 14.0);
        tree.push(
            LayerKind::Text,
            Node::text(
                NodeRole::StageBadge,
                badge,
                card.stage.label(),
                TextStyle::new(8.0, "#000000").on("#f3f4f6"),
            ),
        );
        x += badge.width + 8.0;
    }

    let name = [Span::Text(card.name.clone())];
    let name_width = spans_width(&name, 20.0, 0.0);
    tree.push(
        LayerKind::Text,
        Node::new(
            NodeRole::Name,
            Rect::new(x, header_bottom - 20.0, name_width, 20.0),
            Content::Text {
                spans: name.to_vec(),
                style: TextStyle::new(20.0, card.base_text_color.clone()),
            },
        ),
    );
    if card.is_ex {
        tree.push(
            LayerKind::Text,
            Node::text(
                NodeRole::ExSuffix,
                Rect::new(x + name_width + 4.0, header_bottom - 22.0, 24.0, 22.0),
                "ex",
                TextStyle::new(22.0, card.base_text_color.clone()).italic(),
            ),
        );
    }

    // right-aligned: label, value, type icon
    let right = CARD_SIZE.width - PAD_X;
    let icon = Rect::new(right - 22.0, header_bottom - 26.0, 22.0, 22.0);
    let hp_width = card.hp.as_str().chars().count() as f64 * 22.0 * 0.6;
    let hp = Rect::new(icon.x - 4.0 - hp_width, header_bottom - 26.0, hp_width, 22.0);
    tree.push(
        LayerKind::Text,
        Node::text(
            NodeRole::HpLabel,
            Rect::new(hp.x - 12.0, header_bottom - 14.0, 11.0, 9.0),
            "HP",
            TextStyle::new(9.0, card.sub_text_color.clone()),
        ),
    )
    .push(
        LayerKind::Text,
        Node::text(
            NodeRole::Hp,
            hp,
            card.hp.as_str(),
            TextStyle::new(22.0, card.base_text_color.clone()).italic(),
        ),
    )
    .push(
        LayerKind::Text,
        Node::new(
            NodeRole::TypeIcon,
            icon,
            Content::Icons {
                icons: vec![card.primary_type],
                size: 22.0,
            },
        ),
    );
}

/// Height of a tokenized paragraph at `size` px with the given leading.
fn paragraph_height(spans: &[Span], size: f64, leading: f64) -> f64 {
    wrapped_lines(spans, size, 12.0, BLOCK_WIDTH) as f64 * size * leading
}

fn push_blocks(tree: &mut TreeBuilder, card: &CollectibleCard) {
    let mut flow = FlowLayout::new(FLOW_TOP, FLOW_GAP);

    if card.has_ability {
        let text: Vec<Span> = tokenize_energy(&card.ability_description)
            .into_iter()
            .map(Span::from)
            .collect();
        let text_height = paragraph_height(&text, 10.0, 1.2);
        let top = flow.place(20.0 + text_height);

        tree.push(
            LayerKind::Text,
            Node::text(
                NodeRole::AbilityTag,
                Rect::new(BLOCK_X, top + 2.0, 24.0, 14.0),
                ABILITY_TAG,
                TextStyle::new(8.0, "#ffffff").italic().on(ABILITY_RED),
            ),
        )
        .push(
            LayerKind::Text,
            Node::text(
                NodeRole::AbilityName,
                Rect::new(BLOCK_X + 32.0, top, BLOCK_WIDTH - 32.0, 18.0),
                card.ability_name.clone(),
                TextStyle::new(14.0, ABILITY_RED),
            ),
        )
        .push(
            LayerKind::Text,
            Node::new(
                NodeRole::AbilityText,
                Rect::new(BLOCK_X, top + 20.0, BLOCK_WIDTH, text_height),
                Content::Text {
                    spans: text,
                    style: TextStyle::new(10.0, card.base_text_color.clone()),
                },
            ),
        );
    }

    for (index, attack) in card.attacks.iter().enumerate() {
        push_attack(tree, &mut flow, card, index, attack);
    }
}

fn push_attack(
    tree: &mut TreeBuilder,
    flow: &mut FlowLayout,
    card: &CollectibleCard,
    index: usize,
    attack: &Attack,
) {
    const ROW: f64 = 28.0;

    let text: Vec<Span> = tokenize_energy(&attack.description)
        .into_iter()
        .map(Span::from)
        .collect();
    let text_height = paragraph_height(&text, 9.0, 1.25);
    let height = if text.is_empty() { ROW } else { ROW + 2.0 + text_height };
    let top = flow.place(height);

    let cost_width = icons_width(&attack.energy, 16.0, 2.0);
    let damage_width = attack.damage.chars().count() as f64 * 20.0 * 0.6;
    let name_x = BLOCK_X + cost_width + 4.0;

    tree.push(
        LayerKind::Text,
        Node::new(
            NodeRole::AttackCost(index),
            Rect::new(BLOCK_X, top + 6.0, cost_width, 16.0),
            Content::Icons {
                icons: attack.energy.to_vec(),
                size: 16.0,
            },
        ),
    )
    .push(
        LayerKind::Text,
        Node::text(
            NodeRole::AttackName(index),
            Rect::new(name_x, top + 5.0, (BLOCK_X + BLOCK_WIDTH - damage_width - name_x).max(0.0), 18.0),
            attack.name.clone(),
            TextStyle::new(15.0, card.base_text_color.clone()),
        ),
    )
    .push(
        LayerKind::Text,
        Node::text(
            NodeRole::AttackDamage(index),
            Rect::new(BLOCK_X + BLOCK_WIDTH - damage_width, top, damage_width, ROW),
            attack.damage.clone(),
            TextStyle::new(20.0, card.base_text_color.clone()).italic(),
        ),
    );

    if !text.is_empty() {
        tree.push(
            LayerKind::Text,
            Node::new(
                NodeRole::AttackText(index),
                Rect::new(BLOCK_X, top + ROW + 2.0, BLOCK_WIDTH, text_height),
                Content::Text {
                    spans: text,
                    style: TextStyle::new(9.0, card.base_text_color.clone()),
                },
            ),
        );
    }
}

fn push_footer(tree: &mut TreeBuilder, card: &CollectibleCard) {
    let sub = TextStyle::new(7.0, card.sub_text_color.clone());
    let retreat: Vec<EnergyType> = vec![EnergyType::Colorless; usize::from(card.retreat_cost)];
    let retreat_width = icons_width(&retreat, 12.0, 2.0);
    let retreat_x = CARD_SIZE.width - PAD_X - 40.0;

    tree.push(
        LayerKind::Text,
        Node::text(
            NodeRole::WeaknessLabel,
            Rect::new(PAD_X, STAT_ROW_Y, 40.0, 9.0),
            "じゃくてん",
            sub.clone(),
        ),
    )
    .push(
        LayerKind::Text,
        Node::new(
            NodeRole::Weakness,
            Rect::new(PAD_X, STAT_ROW_Y + 9.0, 40.0, 14.0),
            Content::Text {
                spans: vec![Span::Icon(card.weakness), Span::Text("x2".to_string())],
                style: TextStyle::new(9.0, card.base_text_color.clone()),
            },
        ),
    )
    .push(
        LayerKind::Text,
        Node::text(
            NodeRole::RetreatLabel,
            Rect::new(retreat_x, STAT_ROW_Y, 40.0, 9.0),
            "にげる",
            sub,
        ),
    )
    .push(
        LayerKind::Text,
        Node::new(
            NodeRole::Retreat,
            Rect::new(retreat_x + (40.0 - retreat_width) / 2.0, STAT_ROW_Y + 9.0, retreat_width, 12.0),
            Content::Icons {
                icons: retreat,
                size: 12.0,
            },
        ),
    );

    let diamonds = usize::from(card.rarity);
    tree.push(
        LayerKind::Badge,
        Node::new(
            NodeRole::Rarity,
            Rect::new(BOTTOM_ROW.x, BOTTOM_ROW.bottom() - 16.0, diamonds as f64 * 12.0, 12.0),
            Content::Diamonds {
                count: card.rarity,
                color: DIAMOND_BLUE.to_string(),
            },
        ),
    );

    if card.is_ex {
        tree.push(
            LayerKind::Badge,
            Node::new(
                NodeRole::ExRule,
                Rect::new(BOTTOM_ROW.right() - 230.0, BOTTOM_ROW.bottom() - 18.0, 230.0, 18.0),
                Content::Text {
                    spans: vec![
                        Span::Keyword(EX_RULE_TITLE.to_string()),
                        Span::Text(EX_RULE_TEXT.to_string()),
                    ],
                    style: TextStyle::new(6.5, "#ffffff").on("#000000"),
                },
            ),
        );
    }
}
