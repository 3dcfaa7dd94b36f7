//! Library to rearrange image tiles by a given ordering.
//!
//! The image is split into a uniform grid of tiles, addressed row-major
//! (left to right, then top to bottom). Output tile `p` is input tile
//! `ordering[p]`, so that:
//!
//! * No tile is duplicated nor removed.
//! * All pixels in a tile are moved together and left untouched.
//! * Output has the same size and color type as input.
//!
//! Use [is_valid_input] to check an arrangement beforehand,
//! and [rearrange_tiles] to transform an image file.

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

mod error;
mod grid;
pub mod ordering;
mod rearrange;
mod validate;

#[doc(inline)]
pub use crate::error::{Error, Result};
#[doc(inline)]
pub use crate::grid::{Grid, ImageSize, TileRect, TileSize};
#[doc(inline)]
pub use crate::rearrange::{
    image_size, load_image, rearrange_array, rearrange_image, rearrange_tiles, save_image,
};
#[doc(inline)]
pub use crate::validate::is_valid_input;
