//! gen_atlas.rs - write the built-in procedural tiles as a PNG strip, a
//! starting point for hand-drawn texture sheets.
//!
//! USAGE:
//! ```bash
//! cargo run --bin gen_atlas -- --out textures.png --tex-size 64 --tiles 8
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use yacast_rs::{assets::save_atlas, world::TextureAtlas};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Output PNG
    #[arg(long, value_name = "FILE", default_value = "textures.png")]
    out: PathBuf,

    /// Edge length of one square tile, in texels
    #[arg(long, default_value_t = 64)]
    tex_size: usize,

    /// Number of tiles in the strip
    #[arg(long, default_value_t = 8)]
    tiles: usize,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let atlas = TextureAtlas::procedural(opts.tex_size, opts.tiles)?;
    save_atlas(&atlas, &opts.out).with_context(|| format!("writing {}", opts.out.display()))?;

    println!(
        "wrote {} ({} tiles of {}x{})",
        opts.out.display(),
        atlas.len(),
        atlas.tex_size(),
        atlas.tex_size()
    );
    Ok(())
}
