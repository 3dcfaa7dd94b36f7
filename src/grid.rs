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

/// Image dimension in pixels, as `(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Tile dimension in pixels, as `(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl TileSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square tile.
    pub const fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    pub const fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for ImageSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl From<(u32, u32)> for TileSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// Source or destination rectangle of a tile, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Uniform tile grid over an image.
///
/// Tiles are addressed row-major: `index = row * columns + column`.
/// Decomposition and recomposition both walk this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    tile: TileSize,
    columns: usize,
    rows: usize,
}

impl Grid {
    /// Builds the grid, or `None` if the tile is degenerate or does not
    /// evenly divide the image.
    pub fn new(image: ImageSize, tile: TileSize) -> Option<Self> {
        if tile.is_degenerate()
            || image.width % tile.width != 0
            || image.height % tile.height != 0
        {
            return None;
        }

        Some(Self {
            tile,
            columns: (image.width / tile.width) as usize,
            rows: (image.height / tile.height) as usize,
        })
    }

    #[inline]
    pub fn tile_size(&self) -> TileSize {
        self.tile
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn tile_count(&self) -> usize {
        self.rows * self.columns
    }

    /// `(row, column)` of tile `index`.
    #[inline]
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    /// Pixel rectangle of tile `index`.
    pub fn rect(&self, index: usize) -> TileRect {
        let (r, c) = self.position(index);
        let width = self.tile.width as usize;
        let height = self.tile.height as usize;

        TileRect {
            x: c * width,
            y: r * height,
            width,
            height,
        }
    }

    /// All tile rectangles in row-major order.
    pub fn rects(&self) -> impl Iterator<Item = TileRect> + '_ {
        (0..self.tile_count()).map(move |i| self.rect(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts() {
        let g = Grid::new(ImageSize::new(6, 4), TileSize::square(2)).unwrap();
        assert_eq!(g.columns(), 3);
        assert_eq!(g.rows(), 2);
        assert_eq!(g.tile_count(), 6);
    }

    #[test]
    fn grid_rejects_non_divisor() {
        assert_eq!(Grid::new(ImageSize::new(10, 10), TileSize::square(3)), None);
        assert_eq!(Grid::new(ImageSize::new(10, 9), TileSize::new(5, 2)), None);
    }

    #[test]
    fn grid_rejects_zero_tile() {
        assert_eq!(Grid::new(ImageSize::new(10, 10), TileSize::new(0, 5)), None);
        assert_eq!(Grid::new(ImageSize::new(10, 10), TileSize::new(5, 0)), None);
    }

    #[test]
    fn rects_are_row_major() {
        // 3 columns, 2 rows
        let g = Grid::new(ImageSize::new(6, 4), TileSize::square(2)).unwrap();
        let origins: Vec<_> = g.rects().map(|r| (r.x, r.y)).collect();
        assert_eq!(
            origins,
            [(0, 0), (2, 0), (4, 0), (0, 2), (2, 2), (4, 2)]
        );
    }

    #[test]
    fn position_non_square_tile() {
        let g = Grid::new(ImageSize::new(8, 3), TileSize::new(4, 1)).unwrap();
        assert_eq!(g.position(5), (2, 1));
        assert_eq!(
            g.rect(5),
            TileRect {
                x: 4,
                y: 2,
                width: 4,
                height: 1
            }
        );
    }
}
