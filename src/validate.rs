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

use crate::grid::{Grid, ImageSize, TileSize};
use crate::ordering::is_permutation;

/// Checks whether an image can be rearranged with the given tile size and ordering.
///
/// Returns `true` only if:
/// * Both tile dimensions are nonzero.
/// * Tile width and height evenly divide image width and height.
/// * `ordering` uses every tile index exactly once.
pub fn is_valid_input(
    image_size: impl Into<ImageSize>,
    tile_size: impl Into<TileSize>,
    ordering: &[usize],
) -> bool {
    match Grid::new(image_size.into(), tile_size.into()) {
        Some(grid) => is_permutation(ordering, grid.tile_count()),
        None => false,
    }
}
