use glam::{IVec2, Vec2};

/// Wall variant stored in a cell. `0` is open floor.
pub type WallId = u16;

/// The passable cell value.
pub const EMPTY: WallId = 0;

/// Things that make a grid unusable for rendering.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("grid of {width}x{height} needs {expected} cells, got {got}")]
    CellCount {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },

    #[error("row {row} has {len} cells, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },

    /// A border cell is open, so some ray could walk off the map.
    #[error("grid is not enclosed: border cell ({x}, {y}) is empty")]
    Open { x: usize, y: usize },
}

/// Immutable 2-D wall map, row-major.
///
/// * `x` is the column, `y` the row (row 0 = first line of the map file).
/// * The outer ring is guaranteed non-zero, which is what lets the DDA run
///   without bounds checks in its termination test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<WallId>,
}

impl OccupancyGrid {
    /// Build from a flat row-major vector and validate the enclosure.
    pub fn new(width: usize, height: usize, cells: Vec<WallId>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(GridError::CellCount {
                width,
                height,
                expected,
                got: cells.len(),
            });
        }
        let grid = Self {
            width,
            height,
            cells,
        };
        grid.check_enclosed()?;
        Ok(grid)
    }

    /// Build from rows of equal length.
    pub fn from_rows(rows: &[Vec<WallId>]) -> Result<Self, GridError> {
        let width = rows.first().map(Vec::len).ok_or(GridError::Empty)?;
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::Ragged {
                    row,
                    len: cells.len(),
                    expected: width,
                });
            }
        }
        Self::new(width, rows.len(), rows.concat())
    }

    /// Empty `width × height` room walled with id `1`.
    pub fn room(width: usize, height: usize) -> Result<Self, GridError> {
        let cells = (0..width * height)
            .map(|i| {
                let (x, y) = (i % width.max(1), i / width.max(1));
                (x == 0 || y == 0 || x + 1 == width || y + 1 == height) as WallId
            })
            .collect();
        Self::new(width, height, cells)
    }

    /// Every border cell must hold a wall.
    fn check_enclosed(&self) -> Result<(), GridError> {
        let (w, h) = (self.width, self.height);
        let border = (0..w)
            .flat_map(|x| [(x, 0), (x, h - 1)])
            .chain((0..h).flat_map(|y| [(0, y), (w - 1, y)]));
        for (x, y) in border {
            if self.cell(x, y) == EMPTY {
                return Err(GridError::Open { x, y });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cells(&self) -> &[WallId] {
        &self.cells
    }

    /// Unchecked-by-contract lookup (panics when out of range).
    #[inline(always)]
    pub fn cell(&self, x: usize, y: usize) -> WallId {
        self.cells[y * self.width + x]
    }

    /// Signed lookup; `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<WallId> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.cell(x as usize, y as usize))
    }

    /// Collision test: walls *and* anything outside the map block movement.
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_none_or(|id| id != EMPTY)
    }

    /// Cell that contains the world point `p`.
    #[inline]
    pub fn cell_of(p: Vec2) -> IVec2 {
        p.floor().as_ivec2()
    }

    /// True when `p` lies in an open cell.
    pub fn is_open_at(&self, p: Vec2) -> bool {
        let c = Self::cell_of(p);
        !self.is_solid(c.x, c.y)
    }

    /// Highest wall id used anywhere in the map.
    pub fn max_wall_id(&self) -> WallId {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }

    /// First open cell in row-major order.
    pub fn first_open_cell(&self) -> Option<IVec2> {
        self.iter()
            .find(|&(_, _, id)| id == EMPTY)
            .map(|(x, y, _)| IVec2::new(x as i32, y as i32))
    }

    /// `(x, y, wall)` for every cell, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, WallId)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &id)| (i % self.width, i / self.width, id))
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosed_box_is_accepted() {
        let g = OccupancyGrid::room(5, 4).unwrap();
        assert_eq!((g.width(), g.height()), (5, 4));
        assert_eq!(g.cell(0, 0), 1);
        assert_eq!(g.cell(2, 2), EMPTY);
        assert_eq!(g.max_wall_id(), 1);
        assert_eq!(g.first_open_cell(), Some(IVec2::new(1, 1)));
    }

    #[test]
    fn open_border_is_rejected() {
        let rows = vec![vec![1, 1, 1], vec![1, 0, 0], vec![1, 1, 1]];
        assert_eq!(
            OccupancyGrid::from_rows(&rows).unwrap_err(),
            GridError::Open { x: 2, y: 1 }
        );
    }

    #[test]
    fn ragged_and_empty_rows_rejected() {
        let rows = vec![vec![1, 1, 1], vec![1, 1]];
        assert_eq!(
            OccupancyGrid::from_rows(&rows).unwrap_err(),
            GridError::Ragged {
                row: 1,
                len: 2,
                expected: 3
            }
        );
        assert_eq!(OccupancyGrid::from_rows(&[]).unwrap_err(), GridError::Empty);
        assert_eq!(
            OccupancyGrid::new(2, 2, vec![1; 3]).unwrap_err(),
            GridError::CellCount {
                width: 2,
                height: 2,
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn outside_counts_as_solid() {
        let g = OccupancyGrid::room(4, 4).unwrap();
        assert!(g.is_solid(-1, 1));
        assert!(g.is_solid(1, 4));
        assert!(!g.is_solid(1, 2));
        assert!(g.is_open_at(Vec2::new(1.5, 2.9)));
        assert!(!g.is_open_at(Vec2::new(0.5, 2.0)));
    }
}
