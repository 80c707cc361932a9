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

use thiserror::Error;

/// Image axis, used to report which extent a grid does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Rows => "rows",
            Self::Columns => "columns",
        })
    }
}

/// Errors produced while scrambling a single image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScrambleError {
    /// Grid size is zero, or too large for the image so that tiles would be empty.
    #[error("grid size {grid_size} does not fit {extent} {axis}")]
    InvalidGrid {
        axis: Axis,
        extent: usize,
        grid_size: usize,
    },

    /// Image buffer is not a (row, column, channel) array.
    #[error("unsupported image: {0}")]
    UnsupportedImage(String),

    /// Tile cannot be written back into its cell.
    #[error("invalid tile at cell ({row}, {col}): {reason}")]
    InvalidTile {
        row: usize,
        col: usize,
        reason: String,
    },

    /// Selection policy name is not recognized.
    #[error("unknown selection policy {0:?} (expected \"all\" or \"nonzero\")")]
    UnknownPolicy(String),
}
