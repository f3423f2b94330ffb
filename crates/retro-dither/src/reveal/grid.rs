//! Deterministic block grid over an image.

use std::ops::Range;

use super::error::RevealError;

/// A rectangle in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl BlockRect {
    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// An image of `width x height` pixels divided into `block_size` squares.
///
/// Blocks are numbered row-major: index `i` sits at column `i % blocks_x`
/// and row `i / blocks_x`. Blocks in the last column and row are clipped to
/// the image, so they may be narrower or shorter than `block_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    width: usize,
    height: usize,
    block_size: usize,
    blocks_x: usize,
    blocks_y: usize,
}

impl BlockGrid {
    pub fn new(width: usize, height: usize, block_size: usize) -> Result<Self, RevealError> {
        if block_size == 0 {
            return Err(RevealError::InvalidBlockSize(block_size));
        }
        if width == 0 || height == 0 {
            return Err(RevealError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            block_size,
            blocks_x: width.div_ceil(block_size),
            blocks_y: height.div_ceil(block_size),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    pub fn blocks_x(&self) -> usize {
        self.blocks_x
    }

    #[inline]
    pub fn blocks_y(&self) -> usize {
        self.blocks_y
    }

    #[inline]
    pub fn total_blocks(&self) -> usize {
        self.blocks_x * self.blocks_y
    }

    /// Grid column and row of block `index`, or `None` past the end.
    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.total_blocks()).then(|| (index % self.blocks_x, index / self.blocks_x))
    }

    /// Pixel rectangle of block `index`, clipped to the image.
    pub fn rect(&self, index: usize) -> Option<BlockRect> {
        let (bx, by) = self.position(index)?;
        let x = bx * self.block_size;
        let y = by * self.block_size;
        Some(BlockRect {
            x,
            y,
            width: self.block_size.min(self.width - x),
            height: self.block_size.min(self.height - y),
        })
    }

    /// Rectangles for a range of block indices, skipping indices past the end.
    pub fn rects(&self, range: Range<usize>) -> impl Iterator<Item = BlockRect> + '_ {
        range.filter_map(move |i| self.rect(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_round_up() {
        let grid = BlockGrid::new(17, 10, 8).unwrap();
        assert_eq!(grid.blocks_x(), 3);
        assert_eq!(grid.blocks_y(), 2);
        assert_eq!(grid.total_blocks(), 6);
    }

    #[test]
    fn test_exact_multiple() {
        let grid = BlockGrid::new(16, 16, 8).unwrap();
        assert_eq!(grid.total_blocks(), 4);
        assert_eq!(
            grid.rect(3),
            Some(BlockRect {
                x: 8,
                y: 8,
                width: 8,
                height: 8
            })
        );
    }

    #[test]
    fn test_bottom_right_block_clipped_both_ways() {
        let grid = BlockGrid::new(17, 10, 8).unwrap();
        assert_eq!(grid.position(5), Some((2, 1)));
        assert_eq!(
            grid.rect(5),
            Some(BlockRect {
                x: 16,
                y: 8,
                width: 1,
                height: 2
            })
        );
    }

    #[test]
    fn test_out_of_range_index() {
        let grid = BlockGrid::new(17, 10, 8).unwrap();
        assert_eq!(grid.rect(6), None);
        assert_eq!(grid.rects(4..9).count(), 2);
    }

    #[test]
    fn test_rects_tile_image_exactly() {
        let grid = BlockGrid::new(23, 9, 4).unwrap();
        let area: usize = grid.rects(0..grid.total_blocks()).map(|r| r.area()).sum();
        assert_eq!(area, 23 * 9);
    }

    #[test]
    fn test_block_larger_than_image() {
        let grid = BlockGrid::new(3, 2, 8).unwrap();
        assert_eq!(grid.total_blocks(), 1);
        assert_eq!(grid.rect(0).unwrap().area(), 6);
    }

    #[test]
    fn test_rejects_invalid() {
        assert_eq!(
            BlockGrid::new(10, 10, 0),
            Err(RevealError::InvalidBlockSize(0))
        );
        assert!(matches!(
            BlockGrid::new(0, 10, 8),
            Err(RevealError::InvalidDimensions { .. })
        ));
    }
}
