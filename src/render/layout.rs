//! Approximate text measurement and vertical flow.
//!
//! Placement here is good enough to keep blocks from overlapping and to
//! reproduce which content moves when a block is toggled. It is not a
//! text shaper: glyph widths are estimated per character class.

use crate::core::EnergyType;

use super::markup::Span;

/// Estimated advance of one character at `size` px.
fn char_advance(c: char, size: f64) -> f64 {
    if c.is_ascii() {
        size * 0.6
    } else {
        size
    }
}

/// Estimated width of a run of spans. Icons are `icon` px plus margin.
#[must_use]
pub fn spans_width(spans: &[Span], size: f64, icon: f64) -> f64 {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(s) | Span::Keyword(s) => s.chars().map(|c| char_advance(c, size)).sum(),
            Span::Icon(_) => icon + 4.0,
        })
        .sum()
}

/// Width of a row of energy icons with a fixed gap.
#[must_use]
pub fn icons_width(icons: &[EnergyType], size: f64, gap: f64) -> f64 {
    if icons.is_empty() {
        return 0.0;
    }
    icons.len() as f64 * size + (icons.len() - 1) as f64 * gap
}

/// Number of wrapped lines for `spans` in a box `width` wide.
#[must_use]
pub fn wrapped_lines(spans: &[Span], size: f64, icon: f64, width: f64) -> usize {
    let total = spans_width(spans, size, icon);
    if total <= 0.0 || width <= 0.0 {
        return 0;
    }
    (total / width).ceil() as usize
}

/// Top-to-bottom stacking with a fixed gap between items.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowLayout {
    cursor: f64,
    gap: f64,
    placed: usize,
}

impl FlowLayout {
    #[must_use]
    pub fn new(top: f64, gap: f64) -> Self {
        Self {
            cursor: top,
            gap,
            placed: 0,
        }
    }

    /// Reserve `height` px and return the item's top edge.
    pub fn place(&mut self, height: f64) -> f64 {
        if self.placed > 0 {
            self.cursor += self.gap;
        }
        let top = self.cursor;
        self.cursor += height;
        self.placed += 1;
        top
    }

    /// Bottom edge of the last item.
    #[must_use]
    pub fn cursor(&self) -> f64 {
        self.cursor
    }
}
