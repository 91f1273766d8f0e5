//! Top-down view of the grid with the frame's visibility polygon.
//!
//! Layers, bottom to top: background with the soft shadow outside the
//! lit fan, optional grid lines and rays, wall cells, FOV edges, player.

use bitflags::bitflags;

use super::{
    BLACK, Framebuffer, Rgba, WHITE, blend,
    raster::{fill_circle, fill_rect, line, line_f, rasterize_triangle, stroke_rect},
    rgb,
};
use crate::{
    engine::VisibilityPolygon,
    math::{Angle, point_from_angle_dist},
    world::{EMPTY, OccupancyGrid, Pose, WallId},
};

bitflags! {
    /// Optional minimap overlays.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MinimapFlags: u8 {
        /// One-pixel lines on every cell boundary.
        const GRID         = 1 << 0;
        /// Outline of the cell the player stands in.
        const CURRENT_CELL = 1 << 1;
        /// The two field-of-view edges.
        const FOV          = 1 << 2;
        /// A line from the player to every retained hit.
        const RAYS         = 1 << 3;
        /// Hide walls no column touched this frame.
        const OCCLUSION    = 1 << 4;
    }
}

impl Default for MinimapFlags {
    fn default() -> Self {
        MinimapFlags::CURRENT_CELL
    }
}

/// Colours and overlays of the minimap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinimapConfig {
    pub flags: MinimapFlags,
    /// Weight of `shadow` over `background` outside the lit area.
    pub shadow_opacity: f32,
    pub background: Rgba,
    pub shadow: Rgba,
    pub player: Rgba,
    pub cell_outline: Rgba,
    /// Overlay colour of [`MinimapFlags::RAYS`]; keep it out of
    /// [`WALL_PALETTE`] or rays and walls look alike.
    pub ray: Rgba,
    pub grid_line: Rgba,
    /// Length of each FOV edge, in cells.
    pub fov_line_length: f32,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            flags: MinimapFlags::default(),
            shadow_opacity: 0.5,
            background: WHITE,
            shadow: BLACK,
            player: rgb(255, 0, 0),
            cell_outline: rgb(255, 128, 0),
            ray: rgb(0, 160, 0),
            grid_line: rgb(200, 200, 200),
            fov_line_length: 3.0,
        }
    }
}

/// Solid colours for wall ids `1..=7`; higher ids wrap around.
pub const WALL_PALETTE: [Rgba; 7] = [
    rgb(255, 0, 0),
    rgb(0, 255, 0),
    rgb(0, 0, 255),
    rgb(180, 180, 180),
    rgb(0, 255, 255),
    rgb(255, 0, 255),
    rgb(255, 255, 0),
];

/// Minimap colour of a cell, `None` for open floor.
#[inline]
pub fn wall_colour(id: WallId) -> Option<Rgba> {
    (id != EMPTY).then(|| WALL_PALETTE[(id as usize - 1) % WALL_PALETTE.len()])
}

/// Whole pixels per cell so the grid fits in `max_w × max_h` (at least 1).
pub fn minimap_scale(grid: &OccupancyGrid, max_w: usize, max_h: usize) -> usize {
    (max_w / grid.width()).min(max_h / grid.height()).max(1)
}

/// Rasterise the minimap for one frame.
///
/// The result is exactly `grid.width() * scale` by `grid.height() * scale`
/// pixels, `scale` being [`minimap_scale`] of the requested bounds.
pub fn draw_minimap(
    grid: &OccupancyGrid,
    pose: &Pose,
    poly: &VisibilityPolygon,
    cfg: &MinimapConfig,
    max_w: usize,
    max_h: usize,
) -> Framebuffer {
    let scale = minimap_scale(grid, max_w, max_h);
    let s = scale as f32;
    let (w, h) = (grid.width() * scale, grid.height() * scale);
    let mut fb = Framebuffer::new(w, h);

    // Lit mask from the fan, then background / shadow composite.
    let mut lit = vec![false; w * h];
    for tri in poly.triangles() {
        rasterize_triangle(tri[0] * s, tri[1] * s, tri[2] * s, w, h, |x, y| {
            lit[y * w + x] = true
        });
    }
    let shaded = blend(cfg.background, cfg.shadow, cfg.shadow_opacity);
    for (px, &l) in fb.pixels_mut().iter_mut().zip(&lit) {
        *px = if l { cfg.background } else { shaded };
    }

    if cfg.flags.contains(MinimapFlags::GRID) {
        for gx in 0..=grid.width() {
            let x = (gx * scale).min(w - 1) as i32;
            line(&mut fb, x, 0, x, h as i32 - 1, cfg.grid_line);
        }
        for gy in 0..=grid.height() {
            let y = (gy * scale).min(h - 1) as i32;
            line(&mut fb, 0, y, w as i32 - 1, y, cfg.grid_line);
        }
    }

    let eye = pose.pos * s;
    if cfg.flags.contains(MinimapFlags::RAYS) {
        for hit in poly.hit_points() {
            line_f(&mut fb, eye, hit * s, cfg.ray);
        }
    }

    let occlusion = cfg.flags.contains(MinimapFlags::OCCLUSION);
    for (x, y, id) in grid.iter() {
        let Some(colour) = wall_colour(id) else {
            continue;
        };
        if occlusion && !poly.was_hit(x, y) {
            continue;
        }
        let (px, py) = ((x * scale) as i32, (y * scale) as i32);
        fill_rect(&mut fb, px, py, scale as i32, scale as i32, colour);
    }

    if cfg.flags.contains(MinimapFlags::FOV) {
        let half = Angle::from_radians(pose.fov() * 0.5);
        let ahead = eye + pose.dir;
        let len = cfg.fov_line_length * s;
        for edge in [-half, half] {
            line_f(&mut fb, eye, point_from_angle_dist(eye, ahead, edge, len), cfg.player);
        }
    }

    if cfg.flags.contains(MinimapFlags::CURRENT_CELL) {
        let c = pose.cell() * scale as i32;
        stroke_rect(&mut fb, c.x, c.y, scale as i32, scale as i32, cfg.cell_outline);
    }
    fill_circle(&mut fb, eye, (s / 4.0).max(1.0), cfg.player);

    fb
}

/// Top-left corner that places a `w × h` overlay against the right edge of
/// a `frame_w` wide frame, `margin` pixels in.
pub fn corner_origin(frame_w: usize, w: usize, margin: usize) -> (i32, i32) {
    (frame_w as i32 - w as i32 - margin as i32, margin as i32)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
