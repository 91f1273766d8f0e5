use glam::{IVec2, Vec2};

use crate::math::{Angle, Vec2Ext};

/// Default camera plane length for a forward vector of length 1
/// (≈ 66° horizontal field of view).
pub const DEFAULT_PLANE_LEN: f32 = 0.66;

/// Rejected pose vectors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PoseError {
    #[error("direction vector has zero length")]
    ZeroDirection,

    #[error("camera plane vector has zero length")]
    ZeroPlane,

    #[error("camera plane is parallel to the direction vector")]
    ParallelPlane,

    #[error("pose contains a non-finite component")]
    NonFinite,

    #[error("field of view {0} rad is outside (0, π)")]
    BadFov(f32),
}

/// Player view-point on the grid.
///
/// * `pos` is in cell units; `floor(pos)` is the current cell.
/// * `plane` is perpendicular to `dir`; `|plane| / |dir| = tan(fov / 2)`.
/// * Screen column `x` looks along `dir + plane * camera_x(x)`, so the
///   right edge of the screen is on the `+plane` side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub pos: Vec2,
    pub dir: Vec2,
    pub plane: Vec2,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            pos: Vec2::new(1.5, 1.5),
            dir: Vec2::X,
            plane: Vec2::new(0.0, DEFAULT_PLANE_LEN),
        }
    }
}

impl Pose {
    /// Validate and build a pose from raw vectors.
    pub fn new(pos: Vec2, dir: Vec2, plane: Vec2) -> Result<Self, PoseError> {
        if !(pos.is_finite() && dir.is_finite() && plane.is_finite()) {
            return Err(PoseError::NonFinite);
        }
        if dir.length_squared() == 0.0 {
            return Err(PoseError::ZeroDirection);
        }
        if plane.length_squared() == 0.0 {
            return Err(PoseError::ZeroPlane);
        }
        // a parallel plane sends one edge column along a zero vector
        if dir.perp_dot(plane).abs() <= 1e-6 * dir.length() * plane.length() {
            return Err(PoseError::ParallelPlane);
        }
        Ok(Self { pos, dir, plane })
    }

    /// Pose facing `yaw` with a horizontal field of view of `fov` radians.
    pub fn looking(pos: Vec2, yaw: Angle, fov: f32) -> Result<Self, PoseError> {
        if !(fov > 0.0 && fov < std::f32::consts::PI) {
            return Err(PoseError::BadFov(fov));
        }
        let dir = Vec2::X.rotated(yaw);
        let plane = dir.perp() * (fov * 0.5).tan();
        Self::new(pos, dir, plane)
    }

    /// Horizontal field of view in radians.
    #[inline]
    pub fn fov(&self) -> f32 {
        2.0 * (self.plane.length() / self.dir.length()).atan()
    }

    /// Heading of the forward vector.
    #[inline]
    pub fn yaw(&self) -> Angle {
        self.dir.heading()
    }

    /// Cell the player stands in.
    #[inline]
    pub fn cell(&self) -> IVec2 {
        self.pos.floor().as_ivec2()
    }

    /// Ray direction for a camera-space offset in `[-1, 1]`.
    #[inline(always)]
    pub fn ray_dir(&self, camera_x: f32) -> Vec2 {
        self.dir + self.plane * camera_x
    }
}

/// Camera-space x of screen column `x`: `-1` on the left edge, `0` in the
/// centre and `+1` on the right edge.
#[inline(always)]
pub fn camera_x(x: usize, width: usize) -> f32 {
    if width <= 1 {
        return 0.0;
    }
    2.0 * x as f32 / (width - 1) as f32 - 1.0
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_vectors_rejected() {
        assert_eq!(
            Pose::new(Vec2::ONE, Vec2::ZERO, Vec2::Y).unwrap_err(),
            PoseError::ZeroDirection
        );
        assert_eq!(
            Pose::new(Vec2::ONE, Vec2::X, Vec2::ZERO).unwrap_err(),
            PoseError::ZeroPlane
        );
        assert_eq!(
            Pose::new(Vec2::ONE, Vec2::X, -Vec2::X).unwrap_err(),
            PoseError::ParallelPlane
        );
        assert_eq!(
            Pose::new(Vec2::ONE, Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)).unwrap_err(),
            PoseError::ParallelPlane
        );
        // oblique but not parallel is still a usable frustum
        let skew = Pose::new(Vec2::ONE, Vec2::X, Vec2::new(0.3, 0.6)).unwrap();
        assert!(skew.ray_dir(1.0).length() > 0.0 && skew.ray_dir(-1.0).length() > 0.0);
        assert_eq!(
            Pose::new(Vec2::splat(f32::NAN), Vec2::X, Vec2::Y).unwrap_err(),
            PoseError::NonFinite
        );
        assert!(matches!(
            Pose::looking(Vec2::ONE, Angle::ZERO, 3.5),
            Err(PoseError::BadFov(_))
        ));
    }

    #[test]
    fn looking_east_matches_classic_setup() {
        let fov = 2.0 * DEFAULT_PLANE_LEN.atan();
        let p = Pose::looking(Vec2::new(2.5, 2.5), Angle::ZERO, fov).unwrap();
        assert!((p.dir - Vec2::X).length() < 1e-6);
        assert!((p.plane - Vec2::new(0.0, DEFAULT_PLANE_LEN)).length() < 1e-5);
        assert!((p.fov() - fov).abs() < 1e-5);
        assert!(p.dir.dot(p.plane).abs() < 1e-6);
    }

    #[test]
    fn camera_x_spans_edges() {
        assert_eq!(camera_x(0, 3), -1.0);
        assert_eq!(camera_x(1, 3), 0.0);
        assert_eq!(camera_x(2, 3), 1.0);
        assert_eq!(camera_x(0, 1), 0.0);
    }

    #[test]
    fn right_edge_ray_is_dir_plus_plane() {
        let p = Pose::default();
        assert_eq!(p.ray_dir(1.0), p.dir + p.plane);
        assert_eq!(p.ray_dir(0.0), p.dir);
        assert_eq!(p.cell(), IVec2::new(1, 1));
    }
}
