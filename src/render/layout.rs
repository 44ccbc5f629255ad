//! Pixel geometry for drawing a collection.
//!
//! World space has y pointing up and spans `min - 0.5 ..= max + 1.5` on each
//! axis. Pixel space has y pointing down. Both axes share one scale.

use super::RenderOptions;
use crate::cells::{Collection, UnitCell};
use crate::error::CellplotError;

/// Canvas size and cell placement for one collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasLayout {
    /// Pixels per world unit, on both axes.
    pub scale: u32,
    /// Pixels of padding between the canvas edge and the outermost cells.
    pub margin: u32,
    pub width: u32,
    pub height: u32,
    /// Border thickness drawn inside each cell.
    pub border: u32,
    min: UnitCell,
    max: UnitCell,
}

impl CanvasLayout {
    /// Computes the layout, or `None` for an empty collection.
    pub fn for_collection(
        collection: &Collection,
        opts: &RenderOptions,
    ) -> Result<Option<Self>, CellplotError> {
        let Some((min, max)) = collection.bounds() else {
            return Ok(None);
        };

        // Half a cell of margin on each side adds one unit per axis.
        let span_x = max.x.abs_diff(min.x).saturating_add(2);
        let span_y = max.y.abs_diff(min.y).saturating_add(2);
        let span = span_x.max(span_y);

        let fitted = u64::from(opts.target_px) / span;
        let scale = fitted.max(u64::from(opts.min_cell_px.max(2)));
        let margin = scale / 2;

        let width = (span_x - 1).saturating_mul(scale).saturating_add(2 * margin);
        let height = (span_y - 1).saturating_mul(scale).saturating_add(2 * margin);
        let limit = opts.max_canvas_px;
        if width > u64::from(limit) || height > u64::from(limit) {
            return Err(CellplotError::CanvasTooLarge {
                width,
                height,
                limit,
            });
        }

        // All values are bounded by `limit` from here on.
        let scale = scale as u32;
        let border = opts.border_px.min(scale / 4).max(1);
        Ok(Some(Self {
            scale,
            margin: margin as u32,
            width: width as u32,
            height: height as u32,
            border,
            min,
            max,
        }))
    }

    /// Top-left pixel of a cell's square. The square is `scale` pixels wide.
    pub fn cell_origin(&self, cell: &UnitCell) -> (u32, u32) {
        let col = cell.x.abs_diff(self.min.x) as u32;
        let row = self.max.y.abs_diff(cell.y) as u32;
        (
            self.margin + col * self.scale,
            self.margin + row * self.scale,
        )
    }

    /// True if the pixel at offset `(dx, dy)` inside a cell is on its border.
    pub fn is_border(&self, dx: u32, dy: u32) -> bool {
        let far = self.scale - self.border;
        dx < self.border || dy < self.border || dx >= far || dy >= far
    }
}
