use std::f64::consts::{FRAC_PI_2, TAU};

use crate::{
    animation::tween::Lerp,
    foundation::core::{BezPath, Point, Vec2},
    shape::pie::PieSlice,
};

const EPSILON: f64 = 1e-12;
const FLATTEN_TOLERANCE: f64 = 0.1;

/// Angles describing one wedge, in radians clockwise from twelve o'clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcAngles {
    /// Start angle.
    pub start: f64,
    /// End angle.
    pub end: f64,
    /// Padding between this wedge and its neighbours.
    pub pad: f64,
}

impl ArcAngles {
    /// Zero-width wedge at `angle`, used as the origin of an entering wedge.
    pub fn collapsed_at(angle: f64) -> Self {
        Self {
            start: angle,
            end: angle,
            pad: 0.0,
        }
    }

    /// Angular span including padding.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

impl From<&PieSlice> for ArcAngles {
    fn from(s: &PieSlice) -> Self {
        Self {
            start: s.start_angle,
            end: s.end_angle,
            pad: s.pad_angle,
        }
    }
}

impl Lerp for ArcAngles {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            start: a.start + (b.start - a.start) * t,
            end: a.end + (b.end - a.end) * t,
            pad: a.pad + (b.pad - a.pad) * t,
        }
    }
}

/// Annular sector generator with fixed radii.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcGenerator {
    /// Inner radius.
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
}

impl ArcGenerator {
    /// Generator for the given radii.
    pub fn new(inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            inner_radius,
            outer_radius,
        }
    }

    /// Midpoint of the wedge, halfway between the radii and the angles.
    pub fn centroid(&self, angles: &ArcAngles) -> Point {
        let r = (self.inner_radius + self.outer_radius) / 2.0;
        let a = (angles.start + angles.end) / 2.0 - FRAC_PI_2;
        Point::new(a.cos() * r, a.sin() * r)
    }

    /// Outline of the wedge centred on the origin.
    ///
    /// Padding is applied as a constant linear gap measured at the pad radius
    /// `sqrt(inner² + outer²)`, so the inner edge loses more angle than the outer edge.
    pub fn path(&self, angles: &ArcAngles) -> BezPath {
        let (mut r0, mut r1) = (self.inner_radius, self.outer_radius);
        if r1 < r0 {
            std::mem::swap(&mut r0, &mut r1);
        }

        let mut path = BezPath::new();
        let a0 = angles.start - FRAC_PI_2;
        let a1 = angles.end - FRAC_PI_2;
        let da = (a1 - a0).abs();
        let cw = a1 > a0;

        if r1 <= EPSILON {
            path.move_to(Point::ORIGIN);
            path.close_path();
            return path;
        }

        if da > TAU - EPSILON {
            let sweep = if cw { TAU } else { -TAU };
            path.move_to(polar(r1, a0));
            push_arc(&mut path, r1, a0, sweep);
            if r0 > EPSILON {
                path.move_to(polar(r0, a1));
                push_arc(&mut path, r0, a1, -sweep);
            }
            path.close_path();
            return path;
        }

        let (mut a00, mut a10, mut a01, mut a11) = (a0, a1, a0, a1);
        let (mut da0, mut da1) = (da, da);
        let ap = angles.pad / 2.0;
        let rp = if ap > EPSILON {
            (r0 * r0 + r1 * r1).sqrt()
        } else {
            0.0
        };

        if rp > EPSILON {
            let dir = if cw { 1.0 } else { -1.0 };
            let p0 = safe_asin(rp / r0 * ap.sin());
            let p1 = safe_asin(rp / r1 * ap.sin());

            da0 -= p0 * 2.0;
            if da0 > EPSILON {
                a00 += p0 * dir;
                a10 -= p0 * dir;
            } else {
                da0 = 0.0;
                a00 = (a0 + a1) / 2.0;
                a10 = a00;
            }

            da1 -= p1 * 2.0;
            if da1 > EPSILON {
                a01 += p1 * dir;
                a11 -= p1 * dir;
            } else {
                da1 = 0.0;
                a01 = (a0 + a1) / 2.0;
                a11 = a01;
            }
        }

        path.move_to(polar(r1, a01));
        if da1 > EPSILON {
            push_arc(&mut path, r1, a01, a11 - a01);
        }

        path.line_to(polar(r0, a10));
        if r0 > EPSILON && da0 > EPSILON {
            push_arc(&mut path, r0, a10, a00 - a10);
        }
        path.close_path();
        path
    }
}

fn polar(r: f64, a: f64) -> Point {
    Point::new(r * a.cos(), r * a.sin())
}

fn safe_asin(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    x.clamp(-1.0, 1.0).asin()
}

fn push_arc(path: &mut BezPath, r: f64, start: f64, sweep: f64) {
    let arc = kurbo::Arc {
        center: Point::ORIGIN,
        radii: Vec2::new(r, r),
        start_angle: start,
        sweep_angle: sweep,
        x_rotation: 0.0,
    };
    path.extend(arc.append_iter(FLATTEN_TOLERANCE));
}
