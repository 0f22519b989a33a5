//! Inclusive tile ranges and their row-major iteration.

use serde::Serialize;

use crate::coord::TileIndex;

/// Inclusive block of tiles at one zoom level.
///
/// Never empty: `row_min <= row_max` and `col_min <= col_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileRange {
    zoom: u8,
    row_min: u32,
    row_max: u32,
    col_min: u32,
    col_max: u32,
}

impl TileRange {
    /// Creates a range, or `None` when either bound pair is inverted.
    pub fn new(zoom: u8, row_min: u32, row_max: u32, col_min: u32, col_max: u32) -> Option<Self> {
        if row_min > row_max || col_min > col_max {
            return None;
        }
        Some(Self {
            zoom,
            row_min,
            row_max,
            col_min,
            col_max,
        })
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn row_min(&self) -> u32 {
        self.row_min
    }

    pub fn row_max(&self) -> u32 {
        self.row_max
    }

    pub fn col_min(&self) -> u32 {
        self.col_min
    }

    pub fn col_max(&self) -> u32 {
        self.col_max
    }

    /// Top-left tile of the range.
    pub fn first(&self) -> TileIndex {
        TileIndex::new(self.row_min, self.col_min)
    }

    /// Bottom-right tile of the range.
    pub fn last(&self) -> TileIndex {
        TileIndex::new(self.row_max, self.col_max)
    }

    pub fn row_count(&self) -> u32 {
        self.row_max - self.row_min + 1
    }

    pub fn col_count(&self) -> u32 {
        self.col_max - self.col_min + 1
    }

    /// Number of tiles in the range.
    pub fn tile_count(&self) -> u64 {
        u64::from(self.row_count()) * u64::from(self.col_count())
    }

    pub fn contains(&self, tile: TileIndex) -> bool {
        (self.row_min..=self.row_max).contains(&tile.row)
            && (self.col_min..=self.col_max).contains(&tile.col)
    }

    /// Iterates over the tiles in row-major order.
    ///
    /// Rows go north to south; inside a row, columns go west to east. The
    /// first tile yielded is [`first`](Self::first), the last one
    /// [`last`](Self::last).
    pub fn iter(&self) -> TileRangeIter {
        TileRangeIter {
            range: *self,
            next: Some(self.first()),
            remaining: self.tile_count(),
        }
    }
}

impl IntoIterator for TileRange {
    type Item = TileIndex;
    type IntoIter = TileRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &TileRange {
    type Item = TileIndex;
    type IntoIter = TileRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major iterator over a [`TileRange`].
#[derive(Debug, Clone)]
pub struct TileRangeIter {
    range: TileRange,
    next: Option<TileIndex>,
    remaining: u64,
}

impl Iterator for TileRangeIter {
    type Item = TileIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        self.next = if current.col < self.range.col_max {
            Some(TileIndex::new(current.row, current.col + 1))
        } else if current.row < self.range.row_max {
            Some(TileIndex::new(current.row + 1, self.range.col_min))
        } else {
            None
        };
        self.remaining -= 1;

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted_bounds() {
        assert!(TileRange::new(5, 3, 2, 0, 0).is_none());
        assert!(TileRange::new(5, 0, 0, 7, 6).is_none());
        assert!(TileRange::new(5, 2, 2, 6, 6).is_some());
    }

    #[test]
    fn test_counts() {
        let range = TileRange::new(10, 100, 102, 50, 53).unwrap();

        assert_eq!(range.row_count(), 3);
        assert_eq!(range.col_count(), 4);
        assert_eq!(range.tile_count(), 12);
    }

    #[test]
    fn test_iter_row_major_order() {
        let range = TileRange::new(3, 4, 5, 1, 3).unwrap();
        let tiles: Vec<_> = range.iter().collect();

        assert_eq!(
            tiles,
            vec![
                TileIndex::new(4, 1),
                TileIndex::new(4, 2),
                TileIndex::new(4, 3),
                TileIndex::new(5, 1),
                TileIndex::new(5, 2),
                TileIndex::new(5, 3),
            ]
        );
    }

    #[test]
    fn test_iter_single_tile() {
        let range = TileRange::new(0, 0, 0, 0, 0).unwrap();
        let mut iter = range.iter();

        assert_eq!(iter.size_hint(), (1, Some(1)));
        assert_eq!(iter.next(), Some(TileIndex::new(0, 0)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_iter_at_u32_limit() {
        // The iterator must stop cleanly without overflowing past u32::MAX
        let range = TileRange::new(30, u32::MAX - 1, u32::MAX, u32::MAX, u32::MAX).unwrap();
        let tiles: Vec<_> = range.iter().collect();

        assert_eq!(
            tiles,
            vec![
                TileIndex::new(u32::MAX - 1, u32::MAX),
                TileIndex::new(u32::MAX, u32::MAX)
            ]
        );
    }

    #[test]
    fn test_contains() {
        let range = TileRange::new(3, 4, 5, 1, 3).unwrap();

        assert!(range.contains(TileIndex::new(4, 1)));
        assert!(range.contains(TileIndex::new(5, 3)));
        assert!(!range.contains(TileIndex::new(6, 3)));
        assert!(!range.contains(TileIndex::new(4, 0)));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_iter_yields_tile_count_unique_tiles(
                row_min in 0u32..10_000,
                col_min in 0u32..10_000,
                rows in 1u32..20,
                cols in 1u32..20
            ) {
                let range = TileRange::new(12, row_min, row_min + rows - 1, col_min, col_min + cols - 1).unwrap();
                let tiles: Vec<_> = range.iter().collect();

                prop_assert_eq!(tiles.len() as u64, range.tile_count());
                prop_assert_eq!(tiles.first().copied(), Some(range.first()));
                prop_assert_eq!(tiles.last().copied(), Some(range.last()));

                // Strictly increasing in (row, col) order means row-major with no duplicates
                for pair in tiles.windows(2) {
                    prop_assert!(pair[0] < pair[1]);
                }
                for tile in &tiles {
                    prop_assert!(range.contains(*tile));
                }
            }
        }
    }
}
