//! 2-D helpers layered on `glam::Vec2`.
//!
//! `glam` already covers add / sub / scale / length; what the raycaster
//! needs on top is rotation by an [`Angle`], headings, and the
//! "point at angle + distance" construction used by the minimap.

mod angle;

pub use angle::{Angle, normalize};

use glam::Vec2;

/// Extra vector operations expressed in terms of [`Angle`].
pub trait Vec2Ext {
    /// Rotate around the origin (positive = counter-clockwise in maths
    /// axes, clockwise on a y-down screen).
    fn rotated(self, alpha: Angle) -> Vec2;

    /// Heading of the vector from the origin, `atan2(y, x)`.
    fn heading(self) -> Angle;

    /// Signed angle from `self` to `other`, both seen from the origin.
    fn angle_towards(self, other: Vec2) -> Angle;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn rotated(self, alpha: Angle) -> Vec2 {
        Vec2::from_angle(alpha.radians()).rotate(self)
    }

    #[inline]
    fn heading(self) -> Angle {
        Angle::from_radians(self.y.atan2(self.x))
    }

    #[inline]
    fn angle_towards(self, other: Vec2) -> Angle {
        other.heading() - self.heading()
    }
}

/// Angle between the lines `origin → p1` and `origin → p2`.
pub fn angle_between(origin: Vec2, p1: Vec2, p2: Vec2) -> Angle {
    (p1 - origin).angle_towards(p2 - origin)
}

/// Point at `length` from `origin`, rotated by `alpha` away from the
/// `origin → p1` direction.
pub fn point_from_angle_dist(origin: Vec2, p1: Vec2, alpha: Angle, length: f32) -> Vec2 {
    let base = (p1 - origin).heading();
    origin + Vec2::new(length, 0.0).rotated(base + alpha)
}

/// Rotate `p` around `origin`.
pub fn rotate_around(p: Vec2, alpha: Angle, origin: Vec2) -> Vec2 {
    (p - origin).rotated(alpha) + origin
}
