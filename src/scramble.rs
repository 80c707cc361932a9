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

use log::debug;
use ndarray::prelude::*;
use rand::Rng;

use crate::compose::compose;
use crate::config::Config;
use crate::error::ScrambleError;
use crate::extract::{extract, Sample, TileMap};
use crate::grid::{Cell, Grid};
use crate::rotate::{rotate, Rotation};
use crate::shuffle::shuffle_values;

/// Where one retained tile ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Cell the tile was cut from.
    pub source: Cell,
    /// Cell the tile was written to.
    pub destination: Cell,
    /// Rotation applied to the tile before writing.
    pub rotation: Rotation,
}

/// Record of one scramble run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrambleReport {
    pub grid: Grid,
    /// One entry per retained tile, ordered by destination (row-major).
    pub placements: Vec<Placement>,
}

impl ScrambleReport {
    pub fn retained(&self) -> usize {
        self.placements.len()
    }

    /// Number of tiles that did not stay in their own cell.
    pub fn moved(&self) -> usize {
        self.placements
            .iter()
            .filter(|p| p.source != p.destination)
            .count()
    }
}

/// Tile scrambler.
///
/// Runs the whole pipeline on one image: partition into a grid, select tiles,
/// rotate, shuffle, and write back. Holds no state between images.
#[derive(Debug, Clone, Default)]
pub struct Scrambler {
    config: Config,
}

impl Scrambler {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scramble an image of shape `(rows, columns, channels)`.
    pub fn scramble<A, R>(
        &self,
        image: ArrayView3<'_, A>,
        random: &mut R,
    ) -> Result<Array3<A>, ScrambleError>
    where
        A: Sample,
        R: Rng + ?Sized,
    {
        self.scramble_with_report(image, random).map(|(out, _)| out)
    }

    /// Scramble an image of arbitrary rank.
    ///
    /// Anything other than a non-empty `(rows, columns, channels)` array is
    /// rejected with [`ScrambleError::UnsupportedImage`].
    pub fn scramble_dyn<A, R>(
        &self,
        image: ArrayViewD<'_, A>,
        random: &mut R,
    ) -> Result<Array3<A>, ScrambleError>
    where
        A: Sample,
        R: Rng + ?Sized,
    {
        let ndim = image.ndim();
        let image = image.into_dimensionality::<Ix3>().map_err(|_| {
            ScrambleError::UnsupportedImage(format!(
                "expected 3 dimensions (rows, columns, channels), got {ndim}"
            ))
        })?;
        self.scramble(image, random)
    }

    /// Scramble an image, also returning where every retained tile went.
    pub fn scramble_with_report<A, R>(
        &self,
        image: ArrayView3<'_, A>,
        random: &mut R,
    ) -> Result<(Array3<A>, ScrambleReport), ScrambleError>
    where
        A: Sample,
        R: Rng + ?Sized,
    {
        let (rows, cols, channels) = image.dim();
        if channels == 0 {
            return Err(ScrambleError::UnsupportedImage("image has no channels".into()));
        }

        let grid = Grid::new((rows, cols), self.config.grid_size)?;
        let tiles = extract(image, &grid, self.config.policy, self.config.threshold);
        debug!(
            "Retained {} of {} tiles ({} policy)",
            tiles.len(),
            grid.size() * grid.size(),
            self.config.policy,
        );

        // Each tile carries its source cell through the shuffle.
        let tagged: BTreeMap<_, _> = tiles
            .into_iter()
            .map(|(cell, tile)| {
                let rotation = if self.config.rotate {
                    random.gen()
                } else {
                    Rotation::R0
                };
                (cell, (cell, rotation, rotate(tile.view(), rotation)))
            })
            .collect();

        let shuffled = shuffle_values(tagged, random);

        let mut placements = Vec::with_capacity(shuffled.len());
        let tiles: TileMap<A> = shuffled
            .into_iter()
            .map(|(destination, (source, rotation, tile))| {
                placements.push(Placement {
                    source,
                    destination,
                    rotation,
                });
                (destination, tile)
            })
            .collect();

        let out = compose(image, &grid, &tiles)?;
        Ok((out, ScrambleReport { grid, placements }))
    }
}
