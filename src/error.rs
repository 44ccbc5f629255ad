use std::path::PathBuf;
use thiserror::Error;

use crate::validation::CheckReport;

/// The main error type for cellplot operations.
#[derive(Debug, Error)]
pub enum CellplotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read input from {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "render")]
    #[error("Failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Canvas of {width}x{height} px exceeds the {limit} px limit")]
    CanvasTooLarge { width: u64, height: u64, limit: u32 },

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input check failed with {error_count} error(s) and {warning_count} warning(s)")]
    CheckFailed {
        error_count: usize,
        warning_count: usize,
        report: CheckReport,
    },

    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),
}

impl CellplotError {
    /// Returns true for filesystem failures, which abort a render batch.
    pub fn is_io(&self) -> bool {
        match self {
            CellplotError::Io(_)
            | CellplotError::InputRead { .. }
            | CellplotError::OutputDir { .. } => true,
            #[cfg(feature = "render")]
            CellplotError::ImageWrite { source, .. } => {
                matches!(source, image::ImageError::IoError(_))
            }
            _ => false,
        }
    }
}
