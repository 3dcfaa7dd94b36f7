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

use std::fs::{self, File};
use std::io::{BufReader, Cursor};
use std::path::Path;

use image::io::Reader as ImageReader;
use image::{DynamicImage, ImageBuffer, ImageFormat, Pixel};
use ndarray::prelude::*;
use ndarray::Slice;
use tracing::{debug, debug_span, warn};

use crate::error::{Error, Result};
use crate::grid::{Grid, ImageSize, TileSize};
use crate::ordering::is_permutation;

/// Rearranges tiles of an array.
///
/// Parameters:
/// * `arr` : Input array view. Can be multidimensional,
///   but only the first 2 dimension (row, column) are tiled.
/// * `grid` : Tile grid. Must cover the array exactly, otherwise it panics.
/// * `ordering` : Output tile `p` is input tile `ordering[p]`.
///   Must be a permutation of the tile indices, otherwise it panics.
pub fn rearrange_array<A, D>(
    arr: ArrayView<'_, A, D>,
    grid: &Grid,
    ordering: &[usize],
) -> Array<A, D>
where
    A: Clone,
    D: Dimension,
{
    let tile = grid.tile_size();
    let expected = [
        grid.rows() * tile.height as usize,
        grid.columns() * tile.width as usize,
    ];
    if arr.ndim() < 2 || arr.shape()[..2] != expected {
        panic!(
            "Array shape {:?} does not match grid [{} {}]",
            arr.shape(),
            expected[0],
            expected[1],
        );
    }
    assert!(
        is_permutation(ordering, grid.tile_count()),
        "Ordering is not a permutation of {} tiles",
        grid.tile_count(),
    );

    let mut out = arr.to_owned();

    for (p, &i) in ordering.iter().enumerate() {
        let s = grid.rect(i);
        let d = grid.rect(p);

        let mut src = arr.view();
        src.slice_axis_inplace(Axis(0), Slice::from(s.y..s.y + s.height));
        src.slice_axis_inplace(Axis(1), Slice::from(s.x..s.x + s.width));

        let mut dst = out.view_mut();
        dst.slice_axis_inplace(Axis(0), Slice::from(d.y..d.y + d.height));
        dst.slice_axis_inplace(Axis(1), Slice::from(d.x..d.x + d.width));

        dst.assign(&src);
    }

    out
}

fn rearrange_buffer<P>(
    buf: &ImageBuffer<P, Vec<P::Subpixel>>,
    grid: &Grid,
    ordering: &[usize],
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>>
where
    P: Pixel,
{
    let (w, h) = buf.dimensions();
    let arr = <ArrayView3<P::Subpixel>>::from_shape(
        (h as usize, w as usize, P::CHANNEL_COUNT as usize),
        buf.as_raw().as_slice(),
    )?;

    let out = rearrange_array(arr, grid, ordering);

    Ok(ImageBuffer::from_raw(w, h, out.into_raw_vec()).expect("Should be standard-layout"))
}

/// Rearranges tiles of a decoded image.
///
/// Output tile `p` (row-major) is input tile `ordering[p]`.
/// The result has the same size and color type as `image`.
pub fn rearrange_image(
    image: &DynamicImage,
    tile_size: impl Into<TileSize>,
    ordering: &[usize],
) -> Result<DynamicImage> {
    let tile = tile_size.into();
    if tile.is_degenerate() {
        return Err(Error::DegenerateTile {
            width: tile.width,
            height: tile.height,
        });
    }

    let size = ImageSize::new(image.width(), image.height());
    let grid = match Grid::new(size, tile) {
        Some(grid) if is_permutation(ordering, grid.tile_count()) => grid,
        _ => {
            warn!(?size, ?tile, len = ordering.len(), "Invalid arrangement");
            return Err(Error::InvalidArrangement);
        }
    };
    debug!(
        columns = grid.columns(),
        rows = grid.rows(),
        "Rearranging {} tiles",
        grid.tile_count()
    );

    let grid = &grid;
    Ok(match image {
        DynamicImage::ImageLuma8(b) => {
            DynamicImage::ImageLuma8(rearrange_buffer(b, grid, ordering)?)
        }
        DynamicImage::ImageLumaA8(b) => {
            DynamicImage::ImageLumaA8(rearrange_buffer(b, grid, ordering)?)
        }
        DynamicImage::ImageRgb8(b) => {
            DynamicImage::ImageRgb8(rearrange_buffer(b, grid, ordering)?)
        }
        DynamicImage::ImageRgba8(b) => {
            DynamicImage::ImageRgba8(rearrange_buffer(b, grid, ordering)?)
        }
        DynamicImage::ImageLuma16(b) => {
            DynamicImage::ImageLuma16(rearrange_buffer(b, grid, ordering)?)
        }
        DynamicImage::ImageLumaA16(b) => {
            DynamicImage::ImageLumaA16(rearrange_buffer(b, grid, ordering)?)
        }
        DynamicImage::ImageRgb16(b) => {
            DynamicImage::ImageRgb16(rearrange_buffer(b, grid, ordering)?)
        }
        DynamicImage::ImageRgba16(b) => {
            DynamicImage::ImageRgba16(rearrange_buffer(b, grid, ordering)?)
        }
        DynamicImage::ImageRgb32F(b) => {
            DynamicImage::ImageRgb32F(rearrange_buffer(b, grid, ordering)?)
        }
        DynamicImage::ImageRgba32F(b) => {
            DynamicImage::ImageRgba32F(rearrange_buffer(b, grid, ordering)?)
        }
        _ => return Err(Error::UnsupportedColor(image.color())),
    })
}

/// Opens and decodes an image, guessing its format from content.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    let open_err = |source| Error::Open {
        path: path.into(),
        source,
    };

    let im = ImageReader::new(BufReader::new(File::open(path).map_err(open_err)?))
        .with_guessed_format()
        .map_err(open_err)?
        .decode()
        .map_err(|source| Error::Decode {
            path: path.into(),
            source,
        })?;
    debug!(path = %path.display(), width = im.width(), height = im.height(), "Decoded image");
    Ok(im)
}

/// Reads image dimension without decoding pixel data.
pub fn image_size(path: impl AsRef<Path>) -> Result<ImageSize> {
    let path = path.as_ref();
    let open_err = |source| Error::Open {
        path: path.into(),
        source,
    };

    let (width, height) = ImageReader::new(BufReader::new(File::open(path).map_err(open_err)?))
        .with_guessed_format()
        .map_err(open_err)?
        .into_dimensions()
        .map_err(|source| Error::Decode {
            path: path.into(),
            source,
        })?;
    Ok(ImageSize::new(width, height))
}

/// Encodes an image in the format implied by the extension of `path`.
///
/// The image is fully encoded before the file is touched,
/// so an encoding failure leaves no output behind.
pub fn save_image(image: &DynamicImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let encode_err = |source| Error::Encode {
        path: path.into(),
        source,
    };

    let format = ImageFormat::from_path(path).map_err(encode_err)?;
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format).map_err(encode_err)?;

    fs::write(path, buf.into_inner()).map_err(|source| Error::Write {
        path: path.into(),
        source,
    })
}

/// Splits the image at `image_path` into tiles of `tile_size`,
/// rearranges them by `ordering` and writes the result to `out_path`.
///
/// Nothing is written if the tile size or ordering is invalid
/// for the decoded image. A zero-sized tile fails before the image is decoded.
pub fn rearrange_tiles(
    image_path: impl AsRef<Path>,
    tile_size: impl Into<TileSize>,
    ordering: &[usize],
    out_path: impl AsRef<Path>,
) -> Result<()> {
    let image_path = image_path.as_ref();
    let out_path = out_path.as_ref();
    let _span = debug_span!(
        "rearrange_tiles",
        input = %image_path.display(),
        output = %out_path.display()
    )
    .entered();

    let tile = tile_size.into();
    if tile.is_degenerate() {
        return Err(Error::DegenerateTile {
            width: tile.width,
            height: tile.height,
        });
    }

    let out = rearrange_image(&load_image(image_path)?, tile, ordering)?;
    save_image(&out, out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use ndarray::{array, s};

    fn grid(w: u32, h: u32, tw: u32, th: u32) -> Grid {
        Grid::new(ImageSize::new(w, h), TileSize::new(tw, th)).unwrap()
    }

    #[test]
    fn swap_two_tiles() {
        // 4x2 image, two 2x2 tiles side by side.
        let arr = array![[0, 1, 2, 3], [4, 5, 6, 7]];
        let out = rearrange_array(arr.view(), &grid(4, 2, 2, 2), &[1, 0]);
        assert_eq!(out, array![[2, 3, 0, 1], [6, 7, 4, 5]]);
    }

    #[test]
    fn identity_is_noop() {
        let arr = Array3::from_shape_fn((4, 6, 3), |(y, x, c)| (y * 100 + x * 10 + c) as u8);
        let out = rearrange_array(arr.view(), &grid(6, 4, 2, 2), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(out, arr);
    }

    #[test]
    fn row_major_non_square_grid() {
        // 3 columns, 2 rows of 1x1 tiles.
        let arr = array![[0, 1, 2], [3, 4, 5]];
        let out = rearrange_array(arr.view(), &grid(3, 2, 1, 1), &[1, 2, 3, 4, 5, 0]);
        // Column-major addressing would give [[3, 4, 5], [1, 2, 0]].
        assert_eq!(out, array![[1, 2, 3], [4, 5, 0]]);
    }

    #[test]
    fn keeps_channels_together() {
        let arr = Array3::from_shape_fn((2, 4, 2), |(y, x, c)| (y * 8 + x * 2 + c) as u16);
        let out = rearrange_array(arr.view(), &grid(4, 2, 2, 1), &[3, 2, 1, 0]);
        for (p, i) in [(0usize, 3usize), (1, 2), (2, 1), (3, 0)] {
            let (pr, pc) = (p / 2, (p % 2) * 2);
            let (ir, ic) = (i / 2, (i % 2) * 2);
            assert_eq!(
                out.slice(s![pr, pc..pc + 2, ..]),
                arr.slice(s![ir, ic..ic + 2, ..])
            );
        }
    }

    #[test]
    #[should_panic(expected = "does not match grid")]
    fn shape_mismatch_panics() {
        let arr = Array2::<u8>::zeros((3, 4));
        rearrange_array(arr.view(), &grid(4, 2, 2, 2), &[0, 1]);
    }

    #[test]
    #[should_panic(expected = "not a permutation")]
    fn duplicate_ordering_panics() {
        let arr = array![[0, 1, 2, 3], [4, 5, 6, 7]];
        rearrange_array(arr.view(), &grid(4, 2, 2, 2), &[0, 0]);
    }

    #[test]
    #[should_panic(expected = "not a permutation")]
    fn out_of_range_ordering_panics() {
        let arr = array![[0, 1, 2, 3], [4, 5, 6, 7]];
        rearrange_array(arr.view(), &grid(4, 2, 2, 2), &[0, 2]);
    }

    #[test]
    #[should_panic(expected = "not a permutation")]
    fn short_ordering_panics() {
        let arr = array![[0, 1, 2, 3], [4, 5, 6, 7]];
        rearrange_array(arr.view(), &grid(4, 2, 2, 2), &[1]);
    }

    #[test]
    fn image_swap() {
        let im = RgbImage::from_fn(4, 2, |x, _| {
            if x < 2 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        let out = rearrange_image(&DynamicImage::ImageRgb8(im), (2, 2), &[1, 0])
            .unwrap()
            .into_rgb8();
        assert_eq!(out.dimensions(), (4, 2));
        assert_eq!(*out.get_pixel(0, 0), Rgb([0, 0, 255]));
        assert_eq!(*out.get_pixel(1, 1), Rgb([0, 0, 255]));
        assert_eq!(*out.get_pixel(2, 0), Rgb([255, 0, 0]));
        assert_eq!(*out.get_pixel(3, 1), Rgb([255, 0, 0]));
    }

    #[test]
    fn image_keeps_color_type() {
        let im = DynamicImage::ImageLuma16(ImageBuffer::from_fn(4, 4, |x, y| {
            Luma([(x * 1000 + y) as u16])
        }));
        let out = rearrange_image(&im, (2, 2), &[3, 2, 1, 0]).unwrap();
        assert_eq!(out.color(), im.color());
        let (a, b) = (im.as_luma16().unwrap(), out.as_luma16().unwrap());
        assert_eq!(b.get_pixel(0, 0), a.get_pixel(2, 2));
        assert_eq!(b.get_pixel(3, 3), a.get_pixel(1, 1));
    }

    #[test]
    fn image_invalid_arrangement() {
        let im = DynamicImage::ImageLuma8(GrayImage::new(10, 10));
        let err = rearrange_image(&im, (3, 3), &[0]).unwrap_err();
        assert!(matches!(err, Error::InvalidArrangement));

        let err = rearrange_image(&im, (5, 5), &[0, 1, 2, 2]).unwrap_err();
        assert!(matches!(err, Error::InvalidArrangement));
    }

    #[test]
    fn image_degenerate_tile() {
        let im = DynamicImage::ImageLuma8(GrayImage::new(4, 4));
        let err = rearrange_image(&im, (0, 2), &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::DegenerateTile {
                width: 0,
                height: 2
            }
        ));
    }
}
