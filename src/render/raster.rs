//! PNG rendering with the `image` crate.

use std::path::Path;

use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};

use super::layout::CanvasLayout;
use super::{RenderOptions, Renderer};
use crate::cells::Collection;
use crate::error::CellplotError;

pub(crate) const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub(crate) const FILL: Rgb<u8> = Rgb([211, 211, 211]);
pub(crate) const BORDER: Rgb<u8> = Rgb([0, 0, 0]);

/// Draws light gray unit squares with black borders on a white canvas.
#[derive(Clone, Debug, Default)]
pub struct RasterRenderer {
    opts: RenderOptions,
}

impl RasterRenderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts }
    }

    /// Draws a collection into an in-memory image.
    ///
    /// An empty collection yields a single background pixel.
    pub fn draw(&self, collection: &Collection) -> Result<RgbImage, CellplotError> {
        let Some(layout) = CanvasLayout::for_collection(collection, &self.opts)? else {
            return Ok(ImageBuffer::from_pixel(1, 1, BACKGROUND));
        };

        let mut img = ImageBuffer::from_pixel(layout.width, layout.height, BACKGROUND);
        for cell in collection {
            let (left, top) = layout.cell_origin(cell);
            for dy in 0..layout.scale {
                for dx in 0..layout.scale {
                    let color = if layout.is_border(dx, dy) { BORDER } else { FILL };
                    img.put_pixel(left + dx, top + dy, color);
                }
            }
        }
        Ok(img)
    }
}

impl Renderer for RasterRenderer {
    fn render(&self, collection: &Collection, dest: &Path) -> Result<(), CellplotError> {
        let img = self.draw(collection)?;
        img.save_with_format(dest, ImageFormat::Png)
            .map_err(|source| CellplotError::ImageWrite {
                path: dest.to_path_buf(),
                source,
            })
    }
}
