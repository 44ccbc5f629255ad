//! Rendering collections to image files.
//!
//! Rendering is a capability: the PNG backend is compiled in behind the
//! `render` cargo feature. Call [`detect`] once per run and either get a
//! [`Renderer`] or the reason none is available.

mod layout;
#[cfg(feature = "render")]
mod raster;

pub use layout::CanvasLayout;
#[cfg(feature = "render")]
pub use raster::RasterRenderer;

use std::fs;
use std::path::{Path, PathBuf};

use crate::cells::Collection;
use crate::error::CellplotError;
use crate::output;

/// Options for raster output.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Size in pixels of the longer canvas side, before clamping.
    pub target_px: u32,
    /// Smallest allowed cell size in pixels.
    pub min_cell_px: u32,
    /// Border thickness in pixels; reduced for small cells.
    pub border_px: u32,
    /// Largest canvas side that will be allocated.
    pub max_canvas_px: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            target_px: 800,
            min_cell_px: 4,
            border_px: 2,
            max_canvas_px: 16384,
        }
    }
}

/// Something that can turn one collection into an image file.
pub trait Renderer {
    fn render(&self, collection: &Collection, dest: &Path) -> Result<(), CellplotError>;
}

/// Whether this build can render images.
pub enum Capability {
    Available(Box<dyn Renderer>),
    Unavailable { reason: &'static str },
}

impl Capability {
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }
}

/// Detect the rendering capability of this build.
#[cfg(feature = "render")]
pub fn detect(opts: RenderOptions) -> Capability {
    Capability::Available(Box::new(RasterRenderer::new(opts)))
}

/// Detect the rendering capability of this build.
#[cfg(not(feature = "render"))]
pub fn detect(_opts: RenderOptions) -> Capability {
    Capability::Unavailable {
        reason: "built without the `render` feature",
    }
}

/// A collection that could not be rendered.
#[derive(Debug)]
pub struct RenderFailure {
    pub index: usize,
    pub path: PathBuf,
    pub error: CellplotError,
}

/// Outcome of rendering a batch of collections.
#[derive(Debug, Default)]
pub struct RenderSummary {
    pub out_dir: PathBuf,
    /// Written files, in collection order.
    pub saved: Vec<PathBuf>,
    pub failed: Vec<RenderFailure>,
}

impl RenderSummary {
    /// True if every collection was written.
    pub fn all_saved(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Progress of [`render_collections`], reported as each file is handled.
#[derive(Debug)]
pub enum RenderEvent<'a> {
    Saved { index: usize, path: &'a Path },
    Skipped(&'a RenderFailure),
}

/// Render each collection to `<out_dir>/<prefix>_<n>.png`, `n` from 1.
///
/// The directory is created if absent. `on_event` is called once per
/// collection, right after its file is written or skipped. A collection
/// that fails for a non-filesystem reason (e.g. an oversized canvas) is
/// recorded in the summary and the batch continues; filesystem errors
/// abort it.
pub fn render_collections(
    renderer: &dyn Renderer,
    collections: &[Collection],
    out_dir: &Path,
    prefix: &str,
    mut on_event: impl FnMut(RenderEvent<'_>),
) -> Result<RenderSummary, CellplotError> {
    fs::create_dir_all(out_dir).map_err(|source| CellplotError::OutputDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut summary = RenderSummary {
        out_dir: out_dir.to_path_buf(),
        ..Default::default()
    };

    for (idx, collection) in collections.iter().enumerate() {
        let index = idx + 1;
        let path = output::image_path(out_dir, prefix, index);
        match renderer.render(collection, &path) {
            Ok(()) => {
                log::debug!("rendered {} cell(s) to {}", collection.len(), path.display());
                on_event(RenderEvent::Saved { index, path: &path });
                summary.saved.push(path);
            }
            Err(err) if err.is_io() => return Err(err),
            Err(error) => {
                let failure = RenderFailure { index, path, error };
                on_event(RenderEvent::Skipped(&failure));
                summary.failed.push(failure);
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::UnitCell;
    use std::cell::RefCell;

    /// Writes the cell count as text; fails on collections listed in `reject`.
    struct FakeRenderer {
        reject: Vec<usize>,
        io_fail: bool,
        calls: RefCell<usize>,
    }

    impl FakeRenderer {
        fn new() -> Self {
            Self {
                reject: Vec::new(),
                io_fail: false,
                calls: RefCell::new(0),
            }
        }
    }

    impl Renderer for FakeRenderer {
        fn render(&self, collection: &Collection, dest: &Path) -> Result<(), CellplotError> {
            *self.calls.borrow_mut() += 1;
            let call = *self.calls.borrow();
            if self.io_fail {
                return Err(std::io::Error::other("disk full").into());
            }
            if self.reject.contains(&call) {
                return Err(CellplotError::CanvasTooLarge {
                    width: 1 << 20,
                    height: 1,
                    limit: 16384,
                });
            }
            fs::write(dest, collection.len().to_string())?;
            Ok(())
        }
    }

    fn collections(n: i64) -> Vec<Collection> {
        (1..=n)
            .map(|k| Collection::from_cells((0..k).map(|x| UnitCell::new(x, 0))))
            .collect()
    }

    #[test]
    fn files_are_numbered_from_one() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let out_dir = temp.path().join("nested").join("out");
        let summary = render_collections(
            &FakeRenderer::new(),
            &collections(3),
            &out_dir,
            "cells_row",
            |_| {},
        )
        .expect("render");

        assert!(summary.all_saved());
        let names: Vec<String> = summary
            .saved
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["cells_row_1.png", "cells_row_2.png", "cells_row_3.png"]);
        assert_eq!(fs::read_to_string(&summary.saved[2]).unwrap(), "3");
    }

    #[test]
    fn one_failure_does_not_stop_the_batch() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let renderer = FakeRenderer {
            reject: vec![2],
            ..FakeRenderer::new()
        };
        let mut events = Vec::new();
        let summary = render_collections(&renderer, &collections(3), temp.path(), "p", |event| {
            events.push(match event {
                RenderEvent::Saved { index, .. } => format!("saved {}", index),
                RenderEvent::Skipped(failure) => format!("skipped {}", failure.index),
            })
        })
        .expect("render");

        assert_eq!(events, ["saved 1", "skipped 2", "saved 3"]);
        assert_eq!(summary.saved.len(), 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].index, 2);
        assert!(!temp.path().join("p_2.png").exists());
        assert!(temp.path().join("p_3.png").exists());
    }

    #[test]
    fn io_failure_aborts_the_batch() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let renderer = FakeRenderer {
            io_fail: true,
            ..FakeRenderer::new()
        };
        let mut events = 0;
        let err = render_collections(&renderer, &collections(3), temp.path(), "p", |_| events += 1)
            .unwrap_err();
        assert!(err.is_io());
        assert_eq!(*renderer.calls.borrow(), 1);
        assert_eq!(events, 0);
    }

    #[test]
    fn existing_output_dir_is_reused() {
        let temp = tempfile::tempdir().expect("create temp dir");
        render_collections(&FakeRenderer::new(), &collections(1), temp.path(), "p", |_| {})
            .expect("first run");
        render_collections(&FakeRenderer::new(), &collections(1), temp.path(), "p", |_| {})
            .expect("second run");
    }

    #[cfg(feature = "render")]
    #[test]
    fn detect_finds_raster_backend() {
        assert!(detect(RenderOptions::default()).is_available());
    }

    #[cfg(not(feature = "render"))]
    #[test]
    fn detect_reports_missing_backend() {
        assert!(!detect(RenderOptions::default()).is_available());
    }
}
