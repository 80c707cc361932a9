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

use ndarray::prelude::*;

use crate::error::ScrambleError;
use crate::extract::TileMap;
use crate::grid::Grid;

/// Write tiles back into a copy of the original image.
///
/// Cells missing from `tiles`, and the margin outside the grid, are copied
/// from `original` unchanged.
///
/// Fails with [`ScrambleError::InvalidTile`] if a tile's cell is outside the
/// grid or the image, or its shape differs from the cell's span.
pub fn compose<A: Clone>(
    original: ArrayView3<'_, A>,
    grid: &Grid,
    tiles: &TileMap<A>,
) -> Result<Array3<A>, ScrambleError> {
    let mut out = original.to_owned();
    let (height, width, channels) = out.dim();

    for (&cell, tile) in tiles {
        let invalid = |reason: String| ScrambleError::InvalidTile {
            row: cell.row,
            col: cell.col,
            reason,
        };

        let (rows, cols) = grid
            .get_span(cell)
            .ok_or_else(|| invalid(format!("outside {0}x{0} grid", grid.size())))?;
        if rows.end > height || cols.end > width {
            return Err(invalid(format!(
                "span {rows:?} x {cols:?} outside {height}x{width} image"
            )));
        }

        let expected = (rows.len(), cols.len(), channels);
        if tile.dim() != expected {
            return Err(invalid(format!(
                "tile shape {:?} != cell shape {expected:?}",
                tile.dim()
            )));
        }
        out.slice_mut(s![rows, cols, ..]).assign(tile);
    }

    Ok(out)
}
