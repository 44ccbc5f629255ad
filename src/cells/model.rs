//! Unit cells, rectangle tokens, and deduplicated collections.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

/// A 1×1 square identified by its lower-left integer corner.
///
/// Cells order by `x` first, then `y`, which is the order every
/// [`Collection`] stores them in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitCell {
    pub x: i64,
    pub y: i64,
}

impl UnitCell {
    /// Creates a cell with the given lower-left corner.
    #[inline]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for UnitCell {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

/// A rectangle given by two opposite corners, in any orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectanglePair {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl RectanglePair {
    /// Creates a rectangle from the corners `(x1, y1)` and `(x2, y2)`.
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Number of unit columns spanned.
    pub fn width(&self) -> u64 {
        self.x1.abs_diff(self.x2)
    }

    /// Number of unit rows spanned.
    pub fn height(&self) -> u64 {
        self.y1.abs_diff(self.y2)
    }

    /// True when the rectangle has zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Number of cells produced by [`cells`](Self::cells).
    pub fn cell_count(&self) -> u64 {
        self.width().saturating_mul(self.height())
    }

    /// Decomposes the rectangle into unit cells.
    ///
    /// The decomposition is half-open: corners `(0,0)` and `(2,2)` yield
    /// the four cells `(0,0)`, `(0,1)`, `(1,0)`, `(1,1)`. The far row and
    /// column of grid points are not cells of their own.
    pub fn cells(&self) -> impl Iterator<Item = UnitCell> {
        let (xmin, xmax) = (self.x1.min(self.x2), self.x1.max(self.x2));
        let (ymin, ymax) = (self.y1.min(self.y2), self.y1.max(self.y2));
        (xmin..xmax).flat_map(move |x| (ymin..ymax).map(move |y| UnitCell::new(x, y)))
    }
}

/// Upper bound on the cells one group may span before it is decomposed.
///
/// Equal to a filled 2048×2048 block. Merging larger groups cell by cell
/// takes memory proportional to the span.
pub const MAX_GROUP_CELLS: u64 = 1 << 22;

/// Sum of [`RectanglePair::cell_count`] over `rects`, counting overlaps
/// twice. Saturates instead of overflowing.
pub fn spanned_cells<'a>(rects: impl IntoIterator<Item = &'a RectanglePair>) -> u64 {
    rects
        .into_iter()
        .fold(0u64, |total, rect| total.saturating_add(rect.cell_count()))
}

/// The deduplicated, sorted set of unit cells spanned by one group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Collection {
    cells: Vec<UnitCell>,
}

impl Collection {
    /// Builds a collection from cells in any order, dropping duplicates.
    pub fn from_cells(cells: impl IntoIterator<Item = UnitCell>) -> Self {
        let unique: BTreeSet<UnitCell> = cells.into_iter().collect();
        Self {
            cells: unique.into_iter().collect(),
        }
    }

    /// Builds a collection from the union of several rectangles.
    pub fn from_rectangles<'a>(rects: impl IntoIterator<Item = &'a RectanglePair>) -> Self {
        Self::from_cells(rects.into_iter().flat_map(|rect| rect.cells()))
    }

    /// The cells, sorted ascending by `(x, y)`.
    pub fn cells(&self) -> &[UnitCell] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UnitCell> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &UnitCell) -> bool {
        self.cells.binary_search(cell).is_ok()
    }

    /// Returns the `(min, max)` corners over all cells, or `None` when empty.
    ///
    /// `min` holds the smallest x and y seen, `max` the largest; neither
    /// needs to be a member of the collection.
    pub fn bounds(&self) -> Option<(UnitCell, UnitCell)> {
        let first = self.cells.first()?;
        let last = self.cells.last()?;
        let (ymin, ymax) = self
            .cells
            .iter()
            .fold((first.y, first.y), |(lo, hi), c| (lo.min(c.y), hi.max(c.y)));
        Some((UnitCell::new(first.x, ymin), UnitCell::new(last.x, ymax)))
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a UnitCell;
    type IntoIter = std::slice::Iter<'a, UnitCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

// Deserialized input goes through `from_cells` so the sort/dedup invariant holds.
impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cells = Vec::<UnitCell>::deserialize(deserializer)?;
        Ok(Collection::from_cells(cells))
    }
}
