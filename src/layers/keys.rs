//! Layer slot keys for each card variant.

use serde::{Deserialize, Serialize};

/// A fixed set of image layer slots.
///
/// `index` must be the key's position in `ALL`.
pub trait LayerKey:
    Copy + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static
{
    /// Every slot, in tab order.
    const ALL: &'static [Self];

    /// Position in `ALL`.
    fn index(self) -> usize;

    /// Stable lowercase name.
    fn name(self) -> &'static str;
}

/// Image layers of a collectible card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleLayer {
    Art,
    Background,
    PreEvolution,
}

impl CollectibleLayer {
    /// Tab label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CollectibleLayer::Art => "メイン",
            CollectibleLayer::Background => "背景",
            CollectibleLayer::PreEvolution => "進化前",
        }
    }
}

impl LayerKey for CollectibleLayer {
    const ALL: &'static [Self] = &[
        CollectibleLayer::Art,
        CollectibleLayer::Background,
        CollectibleLayer::PreEvolution,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            CollectibleLayer::Art => "art",
            CollectibleLayer::Background => "background",
            CollectibleLayer::PreEvolution => "pre_evolution",
        }
    }
}

/// Image layers of a battle card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleLayer {
    Art,
    Background,
}

impl BattleLayer {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BattleLayer::Art => "イラスト",
            BattleLayer::Background => "背景",
        }
    }
}

impl LayerKey for BattleLayer {
    const ALL: &'static [Self] = &[BattleLayer::Art, BattleLayer::Background];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            BattleLayer::Art => "art",
            BattleLayer::Background => "background",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_indices<K: LayerKey>() {
        for (i, key) in K::ALL.iter().enumerate() {
            assert_eq!(key.index(), i, "{key:?}");
        }
    }

    #[test]
    fn test_indices_match_all() {
        check_indices::<CollectibleLayer>();
        check_indices::<BattleLayer>();
    }

    #[test]
    fn test_names() {
        assert_eq!(CollectibleLayer::PreEvolution.name(), "pre_evolution");
        assert_eq!(BattleLayer::Art.name(), "art");
    }
}
