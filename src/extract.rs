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

use std::collections::BTreeMap;

use ndarray::parallel::prelude::*;
use ndarray::prelude::*;

use crate::config::SelectionPolicy;
use crate::grid::{Cell, Grid};

/// Retained tiles keyed by cell, iterated in row-major order.
pub type TileMap<A> = BTreeMap<Cell, Array3<A>>;

/// Pixel sample type.
pub trait Sample: Copy + Send + Sync {
    /// Sample value normalized to the 0-255 scale.
    fn brightness(self) -> f64;
}

impl Sample for u8 {
    fn brightness(self) -> f64 {
        self as f64
    }
}

impl Sample for u16 {
    fn brightness(self) -> f64 {
        self as f64 / 257.0
    }
}

impl Sample for f32 {
    fn brightness(self) -> f64 {
        self as f64 * 255.0
    }
}

/// Check whether a tile takes part in the shuffle.
///
/// For [`SelectionPolicy::NonZero`] the darkest sample over every row, column
/// and channel must be strictly below `threshold`.
pub fn is_retained<A: Sample>(
    tile: ArrayView3<'_, A>,
    policy: SelectionPolicy,
    threshold: f64,
) -> bool {
    match policy {
        SelectionPolicy::All => true,
        SelectionPolicy::NonZero => {
            let min = tile
                .iter()
                .map(|v| v.brightness())
                .fold(f64::INFINITY, f64::min);
            min < threshold
        }
    }
}

/// Slice retained tiles out of an image.
///
/// Tiles are owned copies; the image is not touched.
pub fn extract<A: Sample>(
    image: ArrayView3<'_, A>,
    grid: &Grid,
    policy: SelectionPolicy,
    threshold: f64,
) -> TileMap<A> {
    let cells: Vec<_> = grid.cells().collect();
    cells
        .into_par_iter()
        .filter_map(|cell| {
            let (rows, cols) = grid.span(cell);
            let tile = image.slice(s![rows, cols, ..]);
            if is_retained(tile, policy, threshold) {
                Some((cell, tile.to_owned()))
            } else {
                None
            }
        })
        .collect()
}
