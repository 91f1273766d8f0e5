//! Text map format.
//!
//! One grid row per line, cells separated by spaces:
//!
//! ```text
//! 1 1 1 1 1
//! 1 0 0 0 1
//! 1 0 2 0 1
//! 1 0 0 0 1
//! 1 1 1 1 1
//! ```
//!
//! Blank lines and repeated spaces are ignored. Line `y` of the file is
//! grid row `y`.

use std::{fs, path::Path};

use log::info;
use thiserror::Error;

use super::LoadError;
use crate::world::{GridError, OccupancyGrid, WallId};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("map contains no rows")]
    Empty,

    /// `line` and `column` are 1-based; `column` counts tokens.
    #[error("line {line}, cell {column}: `{token}` is not a wall id")]
    BadToken {
        line: usize,
        column: usize,
        token: String,
    },

    #[error("line {line} has {len} cells, expected {expected}")]
    Ragged {
        line: usize,
        len: usize,
        expected: usize,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Parse map text into a validated grid.
pub fn parse_map(text: &str) -> Result<OccupancyGrid, MapError> {
    let mut width = None;
    let mut height = 0;
    let mut cells: Vec<WallId> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let before = cells.len();
        for (col, token) in raw.split_whitespace().enumerate() {
            let id = token.parse::<WallId>().map_err(|_| MapError::BadToken {
                line,
                column: col + 1,
                token: token.to_owned(),
            })?;
            cells.push(id);
        }
        let len = cells.len() - before;
        if len == 0 {
            continue;
        }
        match width {
            None => width = Some(len),
            Some(expected) if expected != len => {
                return Err(MapError::Ragged {
                    line,
                    len,
                    expected,
                });
            }
            Some(_) => {}
        }
        height += 1;
    }

    let width = width.ok_or(MapError::Empty)?;
    Ok(OccupancyGrid::new(width, height, cells)?)
}

/// Read and parse a map file.
pub fn load_map(path: impl AsRef<Path>) -> Result<OccupancyGrid, LoadError> {
    let path = path.as_ref();
    let grid = parse_map(&fs::read_to_string(path)?)?;
    info!(
        "map {}: {}x{}, wall ids up to {}",
        path.display(),
        grid.width(),
        grid.height(),
        grid.max_wall_id()
    );
    Ok(grid)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
