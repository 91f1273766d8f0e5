use glam::Vec2;

use crate::{
    engine::dda::Traversal,
    renderer::Rgba,
    world::{TextureAtlas, TileId},
};

/// Everything the column loop needs to paint one wall slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallStrip {
    /// Projected height in pixels, never below 1; may exceed the screen.
    pub line_height: i64,
    /// First wall row before clamping (negative when the wall overflows).
    pub wall_top: i64,
    /// First painted row, in `[0, H-1]`.
    pub draw_start: usize,
    /// One past the last painted row, in `[0, H-1]`.
    pub draw_end: usize,
    /// Fractional position of the hit along the face, `[0, 1)`.
    pub wall_x: f32,
    /// Texel column, already mirrored where needed.
    pub tex_x: usize,
}

impl WallStrip {
    /// Project `t` onto a viewport `height` rows tall.
    pub fn project(t: &Traversal, pos: Vec2, height: usize, tex_size: usize) -> Self {
        let h = height as i64;
        // `as` saturates, so a zero distance yields i64::MAX rather than UB.
        let line_height = ((height as f32 / t.perp_wall_dist).floor() as i64).max(1);
        let half = line_height / 2;
        let wall_top = h / 2 - half;
        let max_row = (h - 1).max(0);
        let draw_start = wall_top.clamp(0, max_row) as usize;
        let draw_end = (h / 2).saturating_add(half).clamp(0, max_row) as usize;

        let wall_x = wall_fraction(t, pos);
        let mut tex_x = ((wall_x * tex_size as f32) as usize).min(tex_size - 1);
        if needs_mirror(t.side, t.ray_dir) {
            tex_x = tex_size - tex_x - 1;
        }

        Self {
            line_height,
            wall_top,
            draw_start,
            draw_end,
            wall_x,
            tex_x,
        }
    }

    /// Texel row for screen row `y` (`y` inside `[draw_start, draw_end)`).
    #[inline(always)]
    pub fn tex_row(&self, y: usize, tex_size: usize) -> usize {
        let off = y as i64 - self.wall_top;
        let row = off.saturating_mul(tex_size as i64) / self.line_height;
        (row.max(0) as usize).min(tex_size - 1)
    }
}

/// Where along the face the ray landed, as a fraction of one cell.
#[inline(always)]
pub fn wall_fraction(t: &Traversal, pos: Vec2) -> f32 {
    let along = if t.side {
        pos.x + t.perp_wall_dist * t.ray_dir.x
    } else {
        pos.y + t.perp_wall_dist * t.ray_dir.y
    };
    along - along.floor()
}

/// Faces seen "from behind" would read right-to-left; flip those so every
/// texture appears the same way round from inside the room.
#[inline(always)]
pub fn needs_mirror(side: bool, ray_dir: Vec2) -> bool {
    (!side && ray_dir.x > 0.0) || (side && ray_dir.y < 0.0)
}

/// Paint the wall rows of one screen column.
///
/// `column` is the column's `H` pixels, top to bottom. Y-side faces use the
/// dimmed tile.
pub fn draw_wall(column: &mut [Rgba], strip: &WallStrip, atlas: &TextureAtlas, tile: TileId, side: bool) {
    let tex = atlas.tex_size();
    let texels = atlas.tile(tile, side);
    for (y, px) in column
        .iter_mut()
        .enumerate()
        .take(strip.draw_end)
        .skip(strip.draw_start)
    {
        *px = texels[strip.tex_row(y, tex) * tex + strip.tex_x];
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
