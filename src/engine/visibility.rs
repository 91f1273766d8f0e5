//! Turns one frame's column hits into a top-down "lit area" polygon.
//!
//! Per-column hits are bucketed by the wall cell they struck; only the
//! nearest and farthest ray of each cell survive. Those rays, ordered by
//! heading, become the rim of a triangle fan around the player.

use glam::Vec2;

use crate::{
    engine::dda::Traversal,
    math::{Angle, Vec2Ext},
    world::OccupancyGrid,
};

/// Extremal rays that struck one cell, as indices into the frame's
/// traversal list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellHits {
    pub nearest: usize,
    pub farthest: usize,
    pub count: u32,
}

/// Dense `width × height` table of [`CellHits`]; `None` for untouched cells.
pub fn aggregate(grid: &OccupancyGrid, traversals: &[Traversal]) -> Vec<Option<CellHits>> {
    let mut hits: Vec<Option<CellHits>> = vec![None; grid.width() * grid.height()];
    for (i, t) in traversals.iter().enumerate() {
        let idx = t.cell.y as usize * grid.width() + t.cell.x as usize;
        match &mut hits[idx] {
            slot @ None => {
                *slot = Some(CellHits {
                    nearest: i,
                    farthest: i,
                    count: 1,
                })
            }
            Some(h) => {
                // on ties (a flat face seen square on) nearest keeps the
                // first column and farthest the last, so both ends survive
                if t.perp_wall_dist < traversals[h.nearest].perp_wall_dist {
                    h.nearest = i;
                }
                if t.perp_wall_dist >= traversals[h.farthest].perp_wall_dist {
                    h.farthest = i;
                }
                h.count += 1;
            }
        }
    }
    hits
}

/// Stable sort by ray heading in `(-π, π]`.
pub fn sort_by_heading(rays: &mut [Traversal]) {
    rays.sort_by(|a, b| {
        a.ray_dir
            .heading()
            .radians()
            .total_cmp(&b.ray_dir.heading().radians())
    });
}

/// Lit region seen from `origin` during one frame.
#[derive(Clone, Debug, Default)]
pub struct VisibilityPolygon {
    origin: Vec2,
    width: usize,
    hits: Vec<Option<CellHits>>,
    rays: Vec<Traversal>,
    triangles: Vec<[Vec2; 3]>,
}

impl VisibilityPolygon {
    /// Build from the traversals of one frame, cast from `origin`.
    pub fn build(grid: &OccupancyGrid, origin: Vec2, traversals: &[Traversal]) -> Self {
        let hits = aggregate(grid, traversals);

        let mut rays = Vec::new();
        for h in hits.iter().flatten() {
            rays.push(traversals[h.nearest]);
            if h.farthest != h.nearest {
                rays.push(traversals[h.farthest]);
            }
        }
        sort_by_heading(&mut rays);

        let triangles = fan(origin, &rays);
        Self {
            origin,
            width: grid.width(),
            hits,
            rays,
            triangles,
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Retained rays in heading order.
    #[inline]
    pub fn rays(&self) -> &[Traversal] {
        &self.rays
    }

    /// World-space hit points of [`Self::rays`], same order.
    pub fn hit_points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.rays.iter().map(|r| r.hit_point(self.origin))
    }

    /// Fan triangles `(origin, hit_i, hit_i+1)` in world units.
    #[inline]
    pub fn triangles(&self) -> &[[Vec2; 3]] {
        &self.triangles
    }

    /// Extremal rays for cell `(x, y)`, if any column struck it.
    pub fn cell_hits(&self, x: usize, y: usize) -> Option<CellHits> {
        if self.width == 0 || x >= self.width {
            return None;
        }
        self.hits.get(y * self.width + x).copied().flatten()
    }

    #[inline]
    pub fn was_hit(&self, x: usize, y: usize) -> bool {
        self.cell_hits(x, y).is_some()
    }
}

/// Triangle fan over the cyclic ray sequence, leaving out the pair with
/// the widest angular gap (the unseen sector behind the camera).
fn fan(origin: Vec2, rays: &[Traversal]) -> Vec<[Vec2; 3]> {
    let n = rays.len();
    if n < 2 {
        return Vec::new();
    }
    let headings: Vec<Angle> = rays.iter().map(|r| r.ray_dir.heading()).collect();
    let points: Vec<Vec2> = rays.iter().map(|r| r.hit_point(origin)).collect();

    let skip = (0..n)
        .max_by(|&a, &b| {
            let ga = headings[a].ccw_gap(headings[(a + 1) % n]);
            let gb = headings[b].ccw_gap(headings[(b + 1) % n]);
            ga.total_cmp(&gb)
        })
        .unwrap_or(n - 1);

    (0..n)
        .filter(|&i| i != skip)
        .map(|i| [origin, points[i], points[(i + 1) % n]])
        .collect()
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
