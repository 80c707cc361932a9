// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::ops::Range;

use crate::error::{Axis, ScrambleError};

/// Compute tile boundary offsets along one axis.
///
/// Returns `grid_size + 1` strictly increasing offsets. The first offset is
/// always 1, so row/column 0 is never tiled. Spans are all the same width, so
/// any remainder past the last offset is a margin that is never tiled either.
///
/// The span width is `(extent - 1) / grid_size`, which equals
/// `extent / grid_size` unless `extent` is an exact multiple of `grid_size`.
/// In that case the last offset would land one past the end of the axis, so
/// the span is shortened by one pixel to keep every tile inside the image.
///
/// This deviates from a plain `extent / grid_size` step for exact multiples
/// only, and is not an off-by-one: with 90 pixels and a grid of 9 the
/// offsets are `1, 10, .., 82`, not `1, 11, .., 91`.
///
/// Fails with [`ScrambleError::InvalidGrid`] if `grid_size` is zero or the
/// spans would be empty.
pub fn compute_boundaries(
    axis: Axis,
    extent: usize,
    grid_size: usize,
) -> Result<Vec<usize>, ScrambleError> {
    let step = match extent.checked_sub(1).and_then(|e| e.checked_div(grid_size)) {
        Some(step) if step > 0 => step,
        _ => {
            return Err(ScrambleError::InvalidGrid {
                axis,
                extent,
                grid_size,
            })
        }
    };

    Ok((0..=grid_size).map(|i| 1 + i * step).collect())
}

/// Cell coordinate inside the grid.
///
/// Ordering is row-major, which is the enumeration order of retained tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Tile partition of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl Grid {
    /// Partition an image of `(rows, cols)` pixels into `grid_size * grid_size` cells.
    pub fn new((rows, cols): (usize, usize), grid_size: usize) -> Result<Self, ScrambleError> {
        Ok(Self {
            rows: compute_boundaries(Axis::Rows, rows, grid_size)?,
            cols: compute_boundaries(Axis::Columns, cols, grid_size)?,
        })
    }

    /// Number of cells per axis.
    pub fn size(&self) -> usize {
        self.rows.len() - 1
    }

    pub fn row_boundaries(&self) -> &[usize] {
        &self.rows
    }

    pub fn col_boundaries(&self) -> &[usize] {
        &self.cols
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let n = self.size();
        (0..n).flat_map(move |r| (0..n).map(move |c| Cell::new(r, c)))
    }

    /// Pixel span of a cell as `(rows, columns)`, or `None` if the cell is
    /// outside the grid.
    pub fn get_span(&self, cell: Cell) -> Option<(Range<usize>, Range<usize>)> {
        let n = self.size();
        if cell.row >= n || cell.col >= n {
            return None;
        }
        Some((
            self.rows[cell.row]..self.rows[cell.row + 1],
            self.cols[cell.col]..self.cols[cell.col + 1],
        ))
    }

    /// Pixel span of a cell as `(rows, columns)`.
    ///
    /// Panics if the cell is outside the grid.
    pub fn span(&self, cell: Cell) -> (Range<usize>, Range<usize>) {
        match self.get_span(cell) {
            Some(span) => span,
            None => panic!(
                "Cell ({}, {}) outside {n}x{n} grid",
                cell.row,
                cell.col,
                n = self.size(),
            ),
        }
    }
}
