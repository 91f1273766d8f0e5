//! Interactive viewer.
//!
//! ```bash
//! cargo run --release -- --map maps/default.map --atlas textures.png
//! ```
//!
//! W/S or ↑/↓ move, A/D strafe, ←/→ turn, Shift runs.
//! M cycles the map (corner / full / hidden), R toggles rays, G the grid,
//! F the FOV edges, O wall occlusion. Esc or Q quits.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use glam::Vec2;
use log::info;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use yacast_rs::{
    Framebuffer, Raycaster,
    assets::{load_atlas, load_map, parse_map},
    engine::{RenderConfig, VisibilityPolygon},
    math::Angle,
    renderer::{MinimapConfig, MinimapFlags, draw_minimap, minimap::corner_origin},
    sim::{InputCmd, SIM_FPS, TicRunner},
    world::{OccupancyGrid, Pose, TextureAtlas},
};

const DEFAULT_MAP: &str = include_str!("../../maps/default.map");
const MARGIN: usize = 8;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Map file (built-in map when omitted)
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// PNG strip of square tiles (procedural tiles when omitted)
    #[arg(long, value_name = "FILE")]
    atlas: Option<PathBuf>,

    #[arg(long, default_value_t = 1280)]
    width: usize,

    #[arg(long, default_value_t = 720)]
    height: usize,

    /// Start position `x,y` in cells (centre of the first open cell by default)
    #[arg(long, value_parser = parse_spawn, allow_hyphen_values = true)]
    spawn: Option<Vec2>,

    /// Initial heading in degrees, 0 = +x, clockwise on screen
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    yaw: f32,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 66.0)]
    fov: f32,

    /// Darkness of the minimap outside the visible area, 0..1
    #[arg(long, default_value_t = 0.5)]
    shadow_opacity: f32,

    #[arg(long, value_enum, default_value_t = MapMode::Corner)]
    map_mode: MapMode,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum MapMode {
    Hidden,
    Corner,
    Full,
}

impl MapMode {
    fn next(self) -> Self {
        match self {
            MapMode::Hidden => MapMode::Corner,
            MapMode::Corner => MapMode::Full,
            MapMode::Full => MapMode::Hidden,
        }
    }

    /// Fraction of the frame the map may cover.
    fn scale(self) -> Option<f32> {
        match self {
            MapMode::Hidden => None,
            MapMode::Corner => Some(0.6),
            MapMode::Full => Some(1.0),
        }
    }
}

fn parse_spawn(s: &str) -> Result<Vec2, String> {
    let (x, y) = s.split_once(',').ok_or("expected `x,y`")?;
    let x: f32 = x.trim().parse().map_err(|e| format!("x: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("y: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // ─────────── load scene ────────────
    let grid = match &args.map {
        Some(path) => load_map(path).with_context(|| format!("loading map {}", path.display()))?,
        None => parse_map(DEFAULT_MAP).context("built-in map")?,
    };
    let atlas = match &args.atlas {
        Some(path) => {
            load_atlas(path).with_context(|| format!("loading atlas {}", path.display()))?
        }
        None => TextureAtlas::procedural(64, 8)?,
    };

    let mut pose = spawn_pose(&grid, &args)?;
    info!("spawn at ({:.2}, {:.2}), fov {:.1}°", pose.pos.x, pose.pos.y, args.fov);

    let mut rc = Raycaster::new(grid, atlas, RenderConfig::default())?;
    let mut minimap_cfg = MinimapConfig {
        shadow_opacity: args.shadow_opacity.clamp(0.0, 1.0),
        ..MinimapConfig::default()
    };
    let mut map_mode = args.map_mode;

    let (w, h) = (args.width, args.height);
    let mut frame = Framebuffer::new(w, h);
    let mut win = Window::new("yacast", w, h, WindowOptions::default())?;
    win.set_target_fps(SIM_FPS as usize * 2);

    let mut sim = TicRunner::new();

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) && !win.is_key_down(Key::Q) {
        let t0 = Instant::now();

        /* toggles ---------------------------------------------------------- */
        if win.is_key_pressed(Key::M, KeyRepeat::No) {
            map_mode = map_mode.next();
        }
        for (key, flag) in [
            (Key::R, MinimapFlags::RAYS),
            (Key::G, MinimapFlags::GRID),
            (Key::F, MinimapFlags::FOV),
            (Key::O, MinimapFlags::OCCLUSION),
        ] {
            if win.is_key_pressed(key, KeyRepeat::No) {
                minimap_cfg.flags.toggle(flag);
            }
        }

        /* movement --------------------------------------------------------- */
        sim.pump(&mut pose, rc.grid(), read_input(&win));

        /* draw ------------------------------------------------------------- */
        rc.render(&pose, &mut frame);
        if let Some(scale) = map_mode.scale() {
            let poly = VisibilityPolygon::build(rc.grid(), pose.pos, rc.traversals());
            let max_w = (w as f32 * scale) as usize;
            let max_h = (h as f32 * scale) as usize;
            let map = draw_minimap(rc.grid(), &pose, &poly, &minimap_cfg, max_w, max_h);
            let (x, y) = match map_mode {
                MapMode::Full => ((w as i32 - map.width() as i32) / 2, 0),
                _ => corner_origin(w, map.width(), MARGIN),
            };
            frame.blit(&map, x, y);
        }
        acc_time += t0.elapsed();
        acc_frames += 1;
        win.update_with_buffer(frame.pixels(), w, h)?;

        // ─────────── report every ~3 s ────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

fn spawn_pose(grid: &OccupancyGrid, args: &Args) -> anyhow::Result<Pose> {
    let pos = match args.spawn {
        Some(p) => {
            anyhow::ensure!(grid.is_open_at(p), "spawn point {p} is inside a wall");
            p
        }
        None => {
            let cell = grid.first_open_cell().context("map has no open cell")?;
            cell.as_vec2() + 0.5
        }
    };
    let pose = Pose::looking(pos, Angle::from_degrees(args.yaw), args.fov.to_radians())?;
    Ok(pose)
}

fn read_input(win: &Window) -> InputCmd {
    let down = |keys: &[Key]| keys.iter().any(|&k| win.is_key_down(k));
    let axis = |neg: &[Key], pos: &[Key]| down(pos) as i32 as f32 - down(neg) as i32 as f32;

    InputCmd {
        forward: axis(&[Key::Down, Key::S], &[Key::Up, Key::W]),
        strafe: axis(&[Key::A], &[Key::D]),
        turn: axis(&[Key::Right], &[Key::Left]),
        run: down(&[Key::LeftShift, Key::RightShift]),
    }
}
