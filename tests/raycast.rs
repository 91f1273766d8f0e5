//! End-to-end checks of the column renderer through the public API.

use glam::{IVec2, Vec2};
use yacast_rs::{
    Framebuffer, Raycaster,
    engine::{
        RenderConfig, Traversal, WallStrip, cast,
        planes::draw_floor_and_ceiling,
        walls::draw_wall,
    },
    renderer::BLACK,
    world::{OccupancyGrid, Pose, TextureAtlas, TileId, camera_x},
};

fn five_by_five(pos: Vec2) -> (Raycaster, Pose) {
    let grid = OccupancyGrid::room(5, 5).unwrap();
    let atlas = TextureAtlas::procedural(8, 8).unwrap();
    let rc = Raycaster::new(grid, atlas, RenderConfig::default()).unwrap();
    let pose = Pose::new(pos, Vec2::X, Vec2::new(0.0, 0.66)).unwrap();
    (rc, pose)
}

#[test]
fn centre_column_of_five_by_five_room() {
    let (mut rc, pose) = five_by_five(Vec2::new(2.5, 2.5));
    let h = 90;
    let fb = rc.render_frame(&pose, 3, h);

    let t = rc.traversals()[1];
    assert_eq!(t.ray_dir, Vec2::X);
    assert_eq!(t.steps, 2);
    assert_eq!(t.cell, IVec2::new(4, 2));
    assert!(!t.side);
    assert_eq!(t.perp_wall_dist, 1.5);

    let strip = WallStrip::project(&t, pose.pos, h, 8);
    assert_eq!(strip.line_height, (h as f32 / 1.5).floor() as i64);
    assert_eq!((strip.draw_start, strip.draw_end), (15, 75));

    // wall_x = 0.5 -> texel 4, mirrored for an east-bound ray
    assert_eq!(strip.tex_x, 3);
    assert_eq!(fb.get(1, 15), Some(rc.atlas().texel(1, 0, 3, false)));
    assert_eq!(fb.get(1, 74), Some(rc.atlas().texel(1, 7, 3, false)));
    assert_eq!(fb.get(1, 75), Some(BLACK));
}

#[test]
fn wall_half_a_cell_ahead_doubles_in_height() {
    let (mut rc, pose) = five_by_five(Vec2::new(3.5, 2.5));
    let h = 64;
    rc.render_frame(&pose, 3, h);
    let t = rc.traversals()[1];
    assert_eq!(t.perp_wall_dist, 0.5);
    assert_eq!(t.steps, 1);
    let strip = WallStrip::project(&t, pose.pos, h, 8);
    assert_eq!(strip.line_height, 2 * h as i64);
    assert_eq!((strip.draw_start, strip.draw_end), (0, h - 1));
}

#[test]
fn every_ray_stays_within_the_step_bound() {
    let (mut rc, _) = five_by_five(Vec2::new(2.5, 2.5));
    for deg in (0..360).step_by(7) {
        let pose = Pose::looking(
            Vec2::new(1.3, 3.6),
            yacast_rs::math::Angle::from_degrees(deg as f32),
            1.2,
        )
        .unwrap();
        let bound = (rc.grid().width() + rc.grid().height()) as u32;
        assert!(rc.cast_columns(&pose, 41).iter().all(|t| t.steps <= bound));
    }
}

#[test]
fn axis_aligned_ray_never_changes_column() {
    let grid = OccupancyGrid::room(7, 9).unwrap();
    let t: Traversal = cast(&grid, Vec2::new(3.25, 4.5), Vec2::new(0.0, 1.0));
    assert_eq!(t.cell, IVec2::new(3, 8));
    assert!(t.side);
}

/// Reference frame built column by column from the public stages, then
/// transposed by hand.
fn reference_frame(rc: &Raycaster, pose: &Pose, w: usize, h: usize) -> Framebuffer {
    let cfg = rc.config();
    let mut fb = Framebuffer::new(w, h);
    for x in 0..w {
        let t = cast(rc.grid(), pose.pos, pose.ray_dir(camera_x(x, w)));
        let strip = WallStrip::project(&t, pose.pos, h, rc.atlas().tex_size());
        let mut column = vec![cfg.clear; h];
        draw_wall(&mut column, &strip, rc.atlas(), t.wall as TileId, t.side);
        draw_floor_and_ceiling(
            &mut column,
            &strip,
            &t,
            pose.pos,
            rc.atlas(),
            cfg.floor_tile,
            cfg.ceiling_tile,
        );
        for (y, &px) in column.iter().enumerate() {
            fb.put(x as i32, y as i32, px);
        }
    }
    fb
}

#[test]
fn frame_matches_column_by_column_reference() {
    let grid = OccupancyGrid::from_rows(&[
        vec![1, 1, 1, 1, 1, 1, 1],
        vec![1, 0, 0, 0, 0, 0, 3],
        vec![2, 0, 5, 0, 0, 0, 3],
        vec![2, 0, 0, 0, 7, 0, 3],
        vec![1, 1, 6, 6, 1, 1, 1],
    ])
    .unwrap();
    let atlas = TextureAtlas::procedural(16, 8).unwrap();
    let mut rc = Raycaster::new(grid, atlas, RenderConfig::default()).unwrap();

    for (pos, yaw) in [((1.5, 1.5), 20.0f32), ((5.2, 1.4), 160.0), ((3.5, 3.5), -100.0)] {
        let pose = Pose::looking(
            Vec2::new(pos.0, pos.1),
            yacast_rs::math::Angle::from_degrees(yaw),
            1.15,
        )
        .unwrap();
        let got = rc.render_frame(&pose, 64, 41);
        let again = rc.render_frame(&pose, 64, 41);
        assert_eq!(got, again, "render is not idempotent at {pos:?}");
        assert_eq!(got, reference_frame(&rc, &pose, 64, 41), "mismatch at {pos:?}");
    }
}

#[test]
fn reusing_a_framebuffer_across_sizes() {
    let (mut rc, pose) = five_by_five(Vec2::new(2.5, 2.5));
    let mut fb = Framebuffer::new(16, 16);
    rc.render(&pose, &mut fb);
    fb.resize(8, 30);
    rc.render(&pose, &mut fb);
    assert_eq!(fb, rc.render_frame(&pose, 8, 30));
    assert_eq!(rc.traversals().len(), 8);
}
