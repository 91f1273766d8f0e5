use std::f32::consts::{PI, TAU};
use std::ops::{Add, Neg, Sub};

/// Planar angle in radians, always normalised to `(-π, π]`.
///
/// Every constructor and arithmetic operator re-normalises, so two angles
/// that describe the same heading compare equal (up to float noise).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f32);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    /// Build from radians, wrapping into `(-π, π]`.
    #[inline]
    pub fn from_radians(radians: f32) -> Self {
        Self(normalize(radians))
    }

    #[inline]
    pub fn from_degrees(degrees: f32) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    #[inline]
    pub fn radians(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn degrees(self) -> f32 {
        self.0.to_degrees()
    }

    /// True when `self` lies on the counter-clockwise arc going from `lo` to
    /// `hi` (bounds included). The arc may cross the ±π seam.
    pub fn is_between(self, lo: Angle, hi: Angle) -> bool {
        let span = (hi.0 - lo.0).rem_euclid(TAU);
        let offset = (self.0 - lo.0).rem_euclid(TAU);
        offset <= span
    }

    /// Counter-clockwise distance from `self` to `other`, in `[0, 2π)`.
    #[inline]
    pub fn ccw_gap(self, other: Angle) -> f32 {
        (other.0 - self.0).rem_euclid(TAU)
    }
}

/// Wrap any finite radian value into `(-π, π]`.
pub fn normalize(radians: f32) -> f32 {
    // `%` keeps the sign of the dividend, so the result is in (-2π, 2π).
    let a = radians % TAU;
    if a > PI {
        a - TAU
    } else if a <= -PI {
        a + TAU
    } else {
        a
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle::from_radians(-self.0)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn wraps_into_half_open_range() {
        assert!(close(Angle::from_degrees(270.0).degrees(), -90.0));
        assert!(close(Angle::from_degrees(-270.0).degrees(), 90.0));
        assert!(close(Angle::from_degrees(720.0 + 45.0).degrees(), 45.0));
        // -π is excluded, +π is kept
        assert!(close(Angle::from_radians(-PI).radians(), PI));
        assert!(close(Angle::from_radians(PI).radians(), PI));
    }

    #[test]
    fn arithmetic_renormalises() {
        let a = Angle::from_degrees(170.0) + Angle::from_degrees(20.0);
        assert!(close(a.degrees(), -170.0));
        let b = Angle::from_degrees(-170.0) - Angle::from_degrees(20.0);
        assert!(close(b.degrees(), 170.0));
        assert!(close((-Angle::from_degrees(30.0)).degrees(), -30.0));
    }

    #[test]
    fn between_plain_arc() {
        let lo = Angle::from_degrees(-30.0);
        let hi = Angle::from_degrees(30.0);
        assert!(Angle::ZERO.is_between(lo, hi));
        assert!(lo.is_between(lo, hi));
        assert!(hi.is_between(lo, hi));
        assert!(!Angle::from_degrees(90.0).is_between(lo, hi));
        assert!(!Angle::from_degrees(180.0).is_between(lo, hi));
    }

    #[test]
    fn between_across_the_seam() {
        let lo = Angle::from_degrees(170.0);
        let hi = Angle::from_degrees(-170.0);
        assert!(Angle::from_degrees(180.0).is_between(lo, hi));
        assert!(Angle::from_degrees(-175.0).is_between(lo, hi));
        assert!(!Angle::ZERO.is_between(lo, hi));
        assert!(!Angle::from_degrees(160.0).is_between(lo, hi));
    }

    #[test]
    fn ccw_gap_wraps() {
        let a = Angle::from_degrees(170.0);
        let b = Angle::from_degrees(-170.0);
        assert!(close(a.ccw_gap(b).to_degrees(), 20.0));
        assert!(close(b.ccw_gap(a).to_degrees(), 340.0));
    }
}
