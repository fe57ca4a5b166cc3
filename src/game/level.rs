// Level layout

use std::ops::Range;

use crate::core::ConfigError;
use crate::engine::grid::{Grid, Tile};

/// Default world units per cell
pub const DEFAULT_CELL_SIZE: f32 = 70.0;

/// Row holding the starter platform
pub const PLATFORM_ROW: i64 = 4;

/// Columns covered by the starter platform
pub const PLATFORM_COLUMNS: Range<i64> = 0..7;

/// Grid covering the viewport with the starter platform.
///
/// The platform is clipped to the grid, so a small viewport simply gets a
/// shorter platform (or none).
pub fn starter_level(pixel_width: f32, pixel_height: f32, cell_size: f32) -> Result<Grid, ConfigError> {
    let mut grid = Grid::rebuild(pixel_width, pixel_height, cell_size)?;
    for column in PLATFORM_COLUMNS {
        grid.set_tile(PLATFORM_ROW, column, Tile::Solid);
    }
    Ok(grid)
}
