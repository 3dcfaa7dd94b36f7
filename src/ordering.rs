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

//! Helpers for building and combining tile orderings.
//!
//! An ordering maps output position to source tile index:
//! output tile `p` is source tile `ordering[p]`.

use rand::prelude::*;

/// Ordering that leaves every tile in place.
pub fn identity(count: usize) -> Vec<usize> {
    (0..count).collect()
}

/// Uniformly shuffled ordering of `count` tiles.
pub fn random<R: Rng + ?Sized>(count: usize, random: &mut R) -> Vec<usize> {
    let mut indices = identity(count);
    indices.shuffle(random);
    indices
}

/// Returns true if `ordering` uses every index in `0..count` exactly once.
pub fn is_permutation(ordering: &[usize], count: usize) -> bool {
    if ordering.len() != count {
        return false;
    }

    let mut seen = vec![false; count];
    for &i in ordering {
        match seen.get_mut(i) {
            Some(s) if !*s => *s = true,
            _ => return false,
        }
    }
    true
}

/// Ordering that undoes `ordering`.
///
/// Rearranging with `ordering` and then with its inverse restores the
/// original image. Returns `None` if `ordering` is not a permutation.
pub fn inverse(ordering: &[usize]) -> Option<Vec<usize>> {
    if !is_permutation(ordering, ordering.len()) {
        return None;
    }

    let mut ret = vec![0; ordering.len()];
    for (p, &i) in ordering.iter().enumerate() {
        ret[i] = p;
    }
    Some(ret)
}

/// Single ordering equivalent to rearranging with `first`, then `second`.
///
/// Returns `None` if the orderings are not permutations of the same length.
pub fn compose(first: &[usize], second: &[usize]) -> Option<Vec<usize>> {
    let n = first.len();
    if !is_permutation(first, n) || !is_permutation(second, n) {
        return None;
    }

    Some(second.iter().map(|&i| first[i]).collect())
}
