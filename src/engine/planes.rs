use glam::Vec2;

use crate::{
    engine::{dda::Traversal, walls::WallStrip},
    renderer::Rgba,
    world::{TextureAtlas, TileId},
};

/// World position of the floor directly below the wall hit.
///
/// Which corner of the hit cell it starts from depends on the face that
/// was hit and the direction the ray travelled.
#[inline]
pub fn floor_wall(t: &Traversal, wall_x: f32) -> Vec2 {
    let cell = t.cell.as_vec2();
    match (t.side, t.ray_dir) {
        (false, d) if d.x > 0.0 => Vec2::new(cell.x, cell.y + wall_x),
        (false, _) => Vec2::new(cell.x + 1.0, cell.y + wall_x),
        (true, d) if d.y > 0.0 => Vec2::new(cell.x + wall_x, cell.y),
        (true, _) => Vec2::new(cell.x + wall_x, cell.y + 1.0),
    }
}

/// Distance from the eye to the floor point seen at screen row `y`.
///
/// Only meaningful below the horizon (`2y > height`).
#[inline(always)]
pub fn row_distance(y: usize, height: usize) -> f32 {
    height as f32 / (2 * y as i64 - height as i64) as f32
}

/// Paint the rows below the wall with the floor tile and the mirrored rows
/// above it with the ceiling tile.
///
/// Row `draw_end` itself is not touched.
pub fn draw_floor_and_ceiling(
    column: &mut [Rgba],
    strip: &WallStrip,
    t: &Traversal,
    pos: Vec2,
    atlas: &TextureAtlas,
    floor_tile: TileId,
    ceiling_tile: TileId,
) {
    let h = column.len();
    let tex = atlas.tex_size();
    let floor = atlas.tile(floor_tile, false);
    let ceiling = atlas.tile(ceiling_tile, false);
    let wall = floor_wall(t, strip.wall_x);

    for y in strip.draw_end + 1..h {
        let weight = row_distance(y, h) / t.perp_wall_dist;
        let p = weight * wall + (1.0 - weight) * pos;
        let tx = texel_coord(p.x, tex);
        let ty = texel_coord(p.y, tex);
        let idx = ty * tex + tx;

        column[y] = floor[idx];
        column[h - 1 - y] = ceiling[idx];
        // odd heights leave one extra row that must not overwrite the wall
        if h - y < strip.draw_start {
            column[h - y] = ceiling[idx];
        }
    }
}

/// Truncate to a texel index and wrap into `[0, tex)`.
#[inline(always)]
fn texel_coord(world: f32, tex: usize) -> usize {
    ((world * tex as f32) as i64).rem_euclid(tex as i64) as usize
}
