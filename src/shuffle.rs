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

use rand::prelude::*;

/// Randomly permute the values of a map while keeping its keys.
///
/// After shuffling, the `i`-th key in iteration order holds the `i`-th value
/// of the shuffled value sequence.
pub fn shuffle_values<K, V, R>(map: BTreeMap<K, V>, random: &mut R) -> BTreeMap<K, V>
where
    K: Ord,
    R: Rng + ?Sized,
{
    let (keys, mut values): (Vec<_>, Vec<_>) = map.into_iter().unzip();
    values.shuffle(random);
    keys.into_iter().zip(values).collect()
}
