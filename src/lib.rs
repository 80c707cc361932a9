//! Library to scramble images tile by tile.
//!
//! An image is cut into an N×N grid of tiles. A subset of the tiles is
//! selected, each selected tile is rotated by a random right angle, and the
//! tiles are randomly permuted among their cells. The result has the same
//! shape as the input and:
//!
//! * No tile is duplicated nor removed.
//! * Tiles that are not selected stay exactly where they were.
//! * Pixels outside the grid (row/column 0 and any trailing remainder)
//!   are copied unchanged.
//!
//! Entry point is [`Scrambler`], configured with a [`Config`].
//! The [`batch`] module runs it over a directory of image files.

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
//

pub mod batch;
mod compose;
mod config;
mod error;
mod extract;
mod grid;
mod rotate;
mod scramble;
mod shuffle;

#[doc(inline)]
pub use crate::compose::compose;
#[doc(inline)]
pub use crate::config::{
    Config, ConfigBuilder, SelectionPolicy, DEFAULT_GRID_SIZE, DEFAULT_THRESHOLD,
};
#[doc(inline)]
pub use crate::error::{Axis, ScrambleError};
#[doc(inline)]
pub use crate::extract::{extract, is_retained, Sample, TileMap};
#[doc(inline)]
pub use crate::grid::{compute_boundaries, Cell, Grid};
#[doc(inline)]
pub use crate::rotate::{rotate, Rotation};
#[doc(inline)]
pub use crate::scramble::{Placement, ScrambleReport, Scrambler};
#[doc(inline)]
pub use crate::shuffle::shuffle_values;
