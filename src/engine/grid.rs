// Static tile grid
//
// Occupancy lookup for the collision resolver and the tile renderer. The grid
// is replaced wholesale when the viewport changes and is read-only during a tick.

use crate::core::error::{positive, ConfigError};
use crate::core::Rect;

/// Upper bound on the number of cells in a grid
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Occupancy of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Empty,
    Solid,
}

impl Tile {
    pub fn is_solid(self) -> bool {
        self == Tile::Solid
    }
}

/// Row-major tile grid with square cells
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cell_size: f32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create an empty grid of `width` x `height` cells
    pub fn new(width: usize, height: usize, cell_size: f32) -> Result<Self, ConfigError> {
        let cell_size = positive(cell_size).ok_or(ConfigError::InvalidCellSize(cell_size))?;
        let cells = width
            .checked_mul(height)
            .filter(|&cells| cells <= MAX_GRID_CELLS && width.max(height) <= MAX_GRID_CELLS)
            .ok_or(ConfigError::GridTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            cell_size,
            tiles: vec![Tile::Empty; cells],
        })
    }

    /// Build an empty grid covering a viewport of the given pixel size.
    ///
    /// Partial cells at the right and bottom edges are included. Negative or
    /// non-finite pixel sizes produce a zero-sized grid.
    pub fn rebuild(pixel_width: f32, pixel_height: f32, cell_size: f32) -> Result<Self, ConfigError> {
        let cell_size = positive(cell_size).ok_or(ConfigError::InvalidCellSize(cell_size))?;
        let cells = |pixels: f32| -> Result<usize, ConfigError> {
            if !pixels.is_finite() || pixels <= 0.0 {
                return Ok(0);
            }
            let count = (pixels / cell_size).ceil();
            if count.is_finite() && count <= MAX_GRID_CELLS as f32 {
                Ok(count as usize)
            } else {
                Err(ConfigError::ViewportTooLarge {
                    width: pixel_width,
                    height: pixel_height,
                    cell_size,
                })
            }
        };
        Self::new(cells(pixel_width)?, cells(pixel_height)?, cell_size)
    }

    /// Parse a grid from text rows, `#` for solid and `.` for empty.
    ///
    /// Every row must have the same length.
    pub fn from_ascii(rows: &[&str], cell_size: f32) -> Result<Self, ConfigError> {
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let mut grid = Self::new(width, rows.len(), cell_size)?;

        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(ConfigError::RaggedGrid {
                    row,
                    expected: width,
                    actual,
                });
            }
            for (column, symbol) in line.chars().enumerate() {
                let tile = match symbol {
                    '#' => Tile::Solid,
                    '.' => Tile::Empty,
                    _ => {
                        return Err(ConfigError::UnknownCell {
                            symbol,
                            row,
                            column,
                        })
                    }
                };
                grid.tiles[row * width + column] = tile;
            }
        }

        Ok(grid)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// World units per cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Size of the covered area in world units
    pub fn world_height(&self) -> f32 {
        self.height as f32 * self.cell_size
    }

    pub fn world_width(&self) -> f32 {
        self.width as f32 * self.cell_size
    }

    fn index(&self, row: i64, column: i64) -> Option<usize> {
        let row = usize::try_from(row).ok().filter(|&row| row < self.height)?;
        let column = usize::try_from(column).ok().filter(|&column| column < self.width)?;
        Some(row * self.width + column)
    }

    /// Tile at (row, column); cells outside the grid are empty
    pub fn tile(&self, row: i64, column: i64) -> Tile {
        self.index(row, column)
            .map(|index| self.tiles[index])
            .unwrap_or(Tile::Empty)
    }

    /// Whether (row, column) is solid. Out-of-range cells are never solid.
    pub fn is_solid(&self, row: i64, column: i64) -> bool {
        self.tile(row, column).is_solid()
    }

    /// Set a cell. Returns false (and changes nothing) when out of range.
    pub fn set_tile(&mut self, row: i64, column: i64, tile: Tile) -> bool {
        match self.index(row, column) {
            Some(index) => {
                self.tiles[index] = tile;
                true
            }
            None => false,
        }
    }

    /// World-space box of a cell
    pub fn cell_rect(&self, row: i64, column: i64) -> Rect {
        Rect::new(
            column as f32 * self.cell_size,
            row as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// Iterate over all solid cells as (row, column)
    pub fn solid_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_solid())
            .map(move |(index, _)| (index / self.width, index % self.width))
    }
}
