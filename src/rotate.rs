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
use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// Clockwise rotation by a right angle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Self; 4] = [Self::R0, Self::R90, Self::R180, Self::R270];

    pub fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }

    /// Rotation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::R0 => Self::R0,
            Self::R90 => Self::R270,
            Self::R180 => Self::R180,
            Self::R270 => Self::R90,
        }
    }
}

impl Distribution<Rotation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Rotation {
        Rotation::ALL[rng.gen_range(0..4)]
    }
}

/// Mirror an out-of-range index back into `0..n`.
///
/// Edges are repeated once, i.e. `... 1 0 | 0 1 ... n-1 | n-1 n-2 ...`.
fn reflect(i: isize, n: usize) -> usize {
    let n = n as isize;
    let m = i.rem_euclid(2 * n);
    (if m < n { m } else { 2 * n - 1 - m }) as usize
}

/// Rotate a tile about its center without changing its shape.
///
/// Square tiles are rotated exactly. For other tiles, the part of the output
/// not covered by the rotated tile is filled by reflecting the tile's own
/// content, so there is no constant padding. When height and width differ in
/// parity the center falls between pixels and sampling rounds down.
pub fn rotate<A: Clone>(tile: ArrayView3<'_, A>, rotation: Rotation) -> Array3<A> {
    if rotation == Rotation::R0 {
        return tile.to_owned();
    }

    let (h, w, ch) = tile.dim();
    let (hi, wi) = (h as isize, w as isize);

    // Offsets are doubled so the center stays on the integer lattice.
    let source = |r: usize, c: usize| -> (isize, isize) {
        let (r, c) = (r as isize, c as isize);
        match rotation {
            Rotation::R0 => (r, c),
            Rotation::R90 => (
                (hi + wi - 2 - 2 * c).div_euclid(2),
                (wi - hi + 2 * r).div_euclid(2),
            ),
            Rotation::R180 => (hi - 1 - r, wi - 1 - c),
            Rotation::R270 => (
                (hi - wi + 2 * c).div_euclid(2),
                (wi + hi - 2 - 2 * r).div_euclid(2),
            ),
        }
    };

    Array3::from_shape_fn((h, w, ch), |(r, c, k)| {
        let (sr, sc) = source(r, c);
        tile[[reflect(sr, h), reflect(sc, w), k]].clone()
    })
}
