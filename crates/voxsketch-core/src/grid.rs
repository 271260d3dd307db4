//! The [`TileGrid`] type — a fixed 2D grid of caller-defined tiles laid out
//! on the world plane.
//!
//! Tiles are stored column by column: the tile at `(row, col)` lives at
//! linear slot `col * rows + row`. The same formula is used to build the
//! grid, read tiles, and track the active tile.

use std::fmt;

use crate::geom::Position;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Dimensions for a [`TileGrid`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of rows (laid out along world `x`).
    pub rows: usize,
    /// Number of columns (laid out along world `z`).
    pub cols: usize,
    /// World-space extent of one row step.
    pub row_size: f32,
    /// World-space extent of one column step.
    pub col_size: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 16,
            row_size: 1.0,
            col_size: 1.0,
        }
    }
}

/// Everything a tile factory knows about the tile it is asked to build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileContext {
    pub row: usize,
    pub col: usize,
    /// Centered world position of the tile.
    pub pos: Position,
    pub row_size: f32,
    pub col_size: f32,
    /// Sequential build counter, equal to the tile's storage slot.
    pub index: usize,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by [`TileGrid`] construction and addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// `rows * cols` does not fit in `usize`.
    #[error("a {rows}x{cols} grid has too many tiles to address")]
    TooLarge { rows: usize, cols: usize },

    /// The address lies outside the grid.
    #[error("tile ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

// ---------------------------------------------------------------------------
// TileGrid
// ---------------------------------------------------------------------------

/// A fixed-size grid of tiles centred on the world origin.
///
/// The grid owns its tiles for its whole lifetime; dimensions never change
/// after construction. The *active tile* is a non-owning marker (an index)
/// for the most recently selected tile.
#[derive(Clone)]
pub struct TileGrid<T> {
    tiles: Vec<T>,
    rows: usize,
    cols: usize,
    row_size: f32,
    col_size: f32,
    active: Option<usize>,
}

impl<T> TileGrid<T> {
    /// Build a grid, calling `factory` once per tile.
    ///
    /// Tiles are created column by column, and within a column row by row.
    /// The `index` handed to the factory counts calls in that order, so
    /// factories may derive identity or colouring from it.
    ///
    /// Fails with [`GridError::TooLarge`], before any tile is built, when
    /// the tile count overflows `usize` or storage for it cannot be
    /// reserved.
    pub fn new<F>(
        rows: usize,
        cols: usize,
        row_size: f32,
        col_size: f32,
        mut factory: F,
    ) -> Result<Self, GridError>
    where
        F: FnMut(TileContext) -> T,
    {
        let too_large = GridError::TooLarge { rows, cols };
        let count = rows.checked_mul(cols).ok_or(too_large)?;
        let mut tiles = Vec::new();
        tiles.try_reserve_exact(count).map_err(|_| too_large)?;
        let mut grid = Self {
            tiles,
            rows,
            cols,
            row_size,
            col_size,
            active: None,
        };
        let mut index = 0;
        for col in 0..cols {
            for row in 0..rows {
                debug_assert_eq!(grid.slot(row, col), index);
                let pos = grid.cell_position(row, col);
                grid.tiles.push(factory(TileContext {
                    row,
                    col,
                    pos,
                    row_size,
                    col_size,
                    index,
                }));
                index += 1;
            }
        }
        log::debug!("built {rows}x{cols} tile grid ({} tiles)", grid.tiles.len());
        Ok(grid)
    }

    /// Build a grid from a [`GridConfig`].
    pub fn from_config<F>(config: &GridConfig, factory: F) -> Result<Self, GridError>
    where
        F: FnMut(TileContext) -> T,
    {
        Self::new(
            config.rows,
            config.cols,
            config.row_size,
            config.col_size,
            factory,
        )
    }

    /// The dimensions of this grid as a [`GridConfig`].
    pub fn config(&self) -> GridConfig {
        GridConfig {
            rows: self.rows,
            cols: self.cols,
            row_size: self.row_size,
            col_size: self.col_size,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn row_size(&self) -> f32 {
        self.row_size
    }

    #[inline]
    pub fn col_size(&self) -> f32 {
        self.col_size
    }

    /// Total number of tiles (`rows * cols`).
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether `(row, col)` addresses a tile of this grid.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    // Single source of truth for the address formula.
    #[inline]
    fn slot(&self, row: usize, col: usize) -> usize {
        row + col * self.rows
    }

    /// Storage slot of the tile at `(row, col)`.
    pub fn index_of(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if self.contains(row, col) {
            Ok(self.slot(row, col))
        } else {
            Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// The `(row, col)` address of storage slot `index`, if it exists.
    pub fn address_of(&self, index: usize) -> Option<(usize, usize)> {
        if index < self.tiles.len() {
            Some((index % self.rows, index / self.rows))
        } else {
            None
        }
    }

    /// World position of the cell centre at `(row, col)`.
    ///
    /// Row steps run along `x`, column steps along `z`, and the grid as a
    /// whole is centred on the origin. The formula is defined for any
    /// address, including ones outside the grid.
    pub fn cell_position(&self, row: usize, col: usize) -> Position {
        let half_w = self.rows.saturating_sub(1) as f32 * self.row_size / 2.0;
        let half_d = self.cols.saturating_sub(1) as f32 * self.col_size / 2.0;
        Position {
            x: row as f32 * self.row_size - half_w,
            y: 0.0,
            z: col as f32 * self.col_size - half_d,
        }
    }

    /// The tile at `(row, col)`.
    pub fn tile(&self, row: usize, col: usize) -> Result<&T, GridError> {
        let i = self.index_of(row, col)?;
        Ok(&self.tiles[i])
    }

    /// Mutable access to the tile at `(row, col)`.
    pub fn tile_mut(&mut self, row: usize, col: usize) -> Result<&mut T, GridError> {
        let i = self.index_of(row, col)?;
        Ok(&mut self.tiles[i])
    }

    /// Mark the tile at `(row, col)` as active. On error the previous
    /// active tile is kept.
    pub fn set_active_tile(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        self.active = Some(self.index_of(row, col)?);
        Ok(())
    }

    /// The active tile, if any.
    pub fn active_tile(&self) -> Option<&T> {
        self.active.map(|i| &self.tiles[i])
    }

    /// Mutable access to the active tile, if any.
    pub fn active_tile_mut(&mut self) -> Option<&mut T> {
        self.active.map(|i| &mut self.tiles[i])
    }

    /// The `(row, col)` address of the active tile, if any.
    pub fn active_address(&self) -> Option<(usize, usize)> {
        self.active.and_then(|i| self.address_of(i))
    }

    /// Clear the active tile.
    pub fn reset_active_tile(&mut self) {
        self.active = None;
    }

    /// All tiles in storage order.
    #[inline]
    pub fn tiles(&self) -> &[T] {
        &self.tiles
    }

    /// All tiles in storage order, mutably.
    #[inline]
    pub fn tiles_mut(&mut self) -> &mut [T] {
        &mut self.tiles
    }

    /// Iterator over `((row, col), &tile)` in storage order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        let rows = self.rows;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| ((i % rows, i / rows), t))
    }
}

impl<T: fmt::Debug> fmt::Debug for TileGrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileGrid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("row_size", &self.row_size)
            .field("col_size", &self.col_size)
            .field("active", &self.active_address())
            .field("tiles", &self.tiles)
            .finish()
    }
}
