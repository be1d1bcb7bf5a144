use crate::foundation::error::{ScrollyError, ScrollyResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Absolute story-clock time in milliseconds.
///
/// Transitions record the time they were started at and are sampled against a later `Millis`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Clock origin.
    pub const ZERO: Self = Self(0);

    /// Return `self + ms` using saturating arithmetic.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier`, as `f64`. Negative when `earlier` is in the future.
    pub fn since(self, earlier: Self) -> f64 {
        self.0 as f64 - earlier.0 as f64
    }
}

/// Logical canvas dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in logical units.
    pub width: u32,
    /// Height in logical units.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> ScrollyResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScrollyError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Top-left-origin framing covering the whole canvas.
    pub fn default_view_box(self) -> ViewBox {
        ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width: f64::from(self.width),
            height: f64::from(self.height),
        }
    }

    /// Framing shifted so that the origin sits at the canvas center.
    pub fn centered_view_box(self) -> ViewBox {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        ViewBox {
            min_x: -w / 2.0,
            min_y: -h / 2.0,
            width: w,
            height: h,
        }
    }
}

/// Visible coordinate window of the canvas (SVG `viewBox`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewBox {
    /// Left edge.
    pub min_x: f64,
    /// Top edge.
    pub min_y: f64,
    /// Window width.
    pub width: f64,
    /// Window height.
    pub height: f64,
}

impl ViewBox {
    /// Return `true` when the window straddles the origin.
    pub fn is_centered(&self) -> bool {
        self.min_x < 0.0 && self.min_y < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_rejects_zero_dims() {
        assert!(Canvas::new(0, 10).is_err());
        assert!(Canvas::new(10, 0).is_err());
        assert!(Canvas::new(10, 10).is_ok());
    }

    #[test]
    fn view_boxes_frame_the_canvas() {
        let c = Canvas::new(1000, 950).unwrap();
        let d = c.default_view_box();
        assert_eq!((d.min_x, d.min_y, d.width, d.height), (0.0, 0.0, 1000.0, 950.0));
        assert!(!d.is_centered());

        let v = c.centered_view_box();
        assert_eq!((v.min_x, v.min_y), (-500.0, -475.0));
        assert!(v.is_centered());
    }

    #[test]
    fn millis_arithmetic() {
        let t = Millis(100).after(250);
        assert_eq!(t, Millis(350));
        assert_eq!(t.since(Millis(100)), 250.0);
        assert_eq!(Millis(0).since(Millis(5)), -5.0);
        assert_eq!(Millis(u64::MAX).after(1), Millis(u64::MAX));
    }
}
