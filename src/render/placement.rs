//! Combined translate + scale for one layer.
//!
//! A [`Placement`] maps a point in the layer's own box (relative to the
//! box centre, which is the transform origin) to its on-card position,
//! also relative to the box centre.
//!
//! ## Ordering
//!
//! The two conventions compose differently and the difference is
//! observable:
//!
//! - Percentage: the centred offset is applied first and the result is
//!   scaled, `p ↦ s · (p + t)`. Doubling the scale doubles the pan.
//!   CSS: `scale(s) translate(x%, y%)`.
//! - Pixel: the layer is scaled first and then offset,
//!   `p ↦ s · p + t`. The pan does not depend on the scale.
//!   CSS: `translate3d(xpx, ypx, 0) scale(s)`.
//!
//! ```
//! use rust_cardsmith::layers::PercentTransform;
//! use rust_cardsmith::render::{Placement, Point, Size};
//!
//! let t = PercentTransform::new(75.0, 50.0, 200.0);
//! let placement = Placement::percent(&t, Size::new(200.0, 100.0));
//! // 25% of 200 px, then doubled
//! assert_eq!(placement.pan(), Point::new(100.0, 0.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::layers::{PercentTransform, PixelTransform};

/// 2-D point in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const ORIGIN: Point = Point::new(0.0, 0.0);
}

/// Width and height in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which operation is applied to the point first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOrder {
    /// `s · (p + t)`
    OffsetThenScale,
    /// `s · p + t`
    ScaleThenOffset,
}

/// Resolved translate + scale of one layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub scale: f64,
    pub offset: Point,
    pub order: TransformOrder,
}

impl Placement {
    /// No movement, natural size.
    pub const IDENTITY: Placement = Placement {
        scale: 1.0,
        offset: Point::ORIGIN,
        order: TransformOrder::ScaleThenOffset,
    };

    /// Placement for a percentage transform applied to a box of `size`.
    ///
    /// CSS percentage translation is relative to the element's own box.
    #[must_use]
    pub fn percent(t: &PercentTransform, size: Size) -> Self {
        Self {
            scale: t.scale / 100.0,
            offset: Point::new(
                (t.x - 50.0) / 100.0 * size.width,
                (t.y - 50.0) / 100.0 * size.height,
            ),
            order: TransformOrder::OffsetThenScale,
        }
    }

    /// Placement for a pixel transform with a per-kind `correction`.
    #[must_use]
    pub fn pixel(t: &PixelTransform, correction: f64) -> Self {
        Self {
            scale: t.scale * correction,
            offset: Point::new(t.x, t.y),
            order: TransformOrder::ScaleThenOffset,
        }
    }

    /// Map a box-local point (relative to the centre).
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        match self.order {
            TransformOrder::OffsetThenScale => Point::new(
                self.scale * (p.x + self.offset.x),
                self.scale * (p.y + self.offset.y),
            ),
            TransformOrder::ScaleThenOffset => Point::new(
                self.scale * p.x + self.offset.x,
                self.scale * p.y + self.offset.y,
            ),
        }
    }

    /// Where the box centre ends up.
    #[must_use]
    pub fn pan(&self) -> Point {
        self.apply(Point::ORIGIN)
    }
}

/// CSS transform for a percentage layer.
#[must_use]
pub fn percent_css(t: &PercentTransform) -> String {
    format!(
        "scale({}) translate({}%, {}%)",
        t.scale / 100.0,
        t.x - 50.0,
        t.y - 50.0
    )
}

/// CSS transform for a pixel layer.
#[must_use]
pub fn pixel_css(t: &PixelTransform, correction: f64) -> String {
    format!(
        "translate3d({}px, {}px, 0) scale({})",
        t.x,
        t.y,
        t.scale * correction
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: Size = Size::new(310.0, 190.0);

    #[test]
    fn test_centred_percent_is_identity_pan() {
        let placement = Placement::percent(&PercentTransform::default(), BOX);
        assert_eq!(placement.pan(), Point::ORIGIN);
        assert_eq!(placement.scale, 1.0);
    }

    #[test]
    fn test_percent_pan_grows_with_scale() {
        let small = Placement::percent(&PercentTransform::new(70.0, 50.0, 100.0), BOX);
        let large = Placement::percent(&PercentTransform::new(70.0, 50.0, 300.0), BOX);
        assert!((small.pan().x - 62.0).abs() < 1e-9);
        assert!((large.pan().x - 186.0).abs() < 1e-9);
    }

    #[test]
    fn test_pixel_pan_ignores_scale() {
        let a = Placement::pixel(&PixelTransform::new(40.0, -10.0, 1.0), 1.2);
        let b = Placement::pixel(&PixelTransform::new(40.0, -10.0, 4.0), 1.2);
        assert_eq!(a.pan(), b.pan());
        assert_eq!(a.pan(), Point::new(40.0, -10.0));
        assert!((b.scale - 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_orders_disagree_off_centre() {
        let offset_first = Placement {
            scale: 2.0,
            offset: Point::new(10.0, 0.0),
            order: TransformOrder::OffsetThenScale,
        };
        let scale_first = Placement {
            order: TransformOrder::ScaleThenOffset,
            ..offset_first
        };
        assert_ne!(offset_first.pan(), scale_first.pan());
        assert_eq!(offset_first.apply(Point::new(5.0, 0.0)), Point::new(30.0, 0.0));
        assert_eq!(scale_first.apply(Point::new(5.0, 0.0)), Point::new(20.0, 0.0));
    }

    #[test]
    fn test_css_strings() {
        assert_eq!(
            percent_css(&PercentTransform::new(60.0, 40.0, 150.0)),
            "scale(1.5) translate(10%, -10%)"
        );
        assert_eq!(
            pixel_css(&PixelTransform::new(12.0, -3.0, 1.0), 1.2),
            "translate3d(12px, -3px, 0) scale(1.2)"
        );
    }

    #[test]
    fn test_identity() {
        assert_eq!(Placement::IDENTITY.apply(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
    }
}
