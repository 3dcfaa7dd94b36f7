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

use std::io;
use std::path::PathBuf;

use image::{ColorType, ImageError};
use ndarray::ShapeError;
use thiserror::Error;

/// Result type for rearrangement operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while rearranging an image.
#[derive(Debug, Error)]
pub enum Error {
    /// Tile size does not divide the image, or ordering is not a permutation.
    #[error("The tile size or ordering are not valid for the given image")]
    InvalidArrangement,

    /// Tile has a zero dimension.
    #[error("Tile size must be nonzero (got {width}x{height})")]
    DegenerateTile { width: u32, height: u32 },

    #[error("Cannot open {}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Cannot decode {}", path.display())]
    Decode { path: PathBuf, source: ImageError },

    #[error("Cannot encode {}", path.display())]
    Encode { path: PathBuf, source: ImageError },

    #[error("Cannot write {}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Unsupported color type {0:?}")]
    UnsupportedColor(ColorType),

    /// Pixel buffer does not fit the `(height, width, channels)` array view.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl Error {
    /// Returns true for failures reading or writing image files.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::Open { .. } | Self::Decode { .. } | Self::Encode { .. } | Self::Write { .. }
        )
    }
}
