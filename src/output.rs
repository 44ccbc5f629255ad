//! Output directory and file naming.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Default file name prefix for rendered images.
pub const DEFAULT_PREFIX: &str = "cells_row";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// A run directory under `base` named after the current local time.
pub fn timestamped_dir(base: &Path) -> PathBuf {
    dir_for_time(base, &Local::now())
}

/// A run directory under `base` named after `time`, e.g. `2024-05-01_13-45-09`.
pub fn dir_for_time(base: &Path, time: &DateTime<Local>) -> PathBuf {
    base.join(time.format(TIMESTAMP_FORMAT).to_string())
}

/// Path of the `index`-th image (1-based) in `dir`.
pub fn image_path(dir: &Path, prefix: &str, index: usize) -> PathBuf {
    dir.join(format!("{prefix}_{index}.png"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn image_path_uses_prefix_and_index() {
        let path = image_path(Path::new("out"), "cells_row", 7);
        assert_eq!(path, Path::new("out").join("cells_row_7.png"));
    }

    #[test]
    fn dir_for_time_formats_timestamp() {
        let time = Local
            .with_ymd_and_hms(2024, 5, 1, 13, 45, 9)
            .single()
            .expect("unambiguous local time");
        let dir = dir_for_time(Path::new("base"), &time);
        assert_eq!(dir, Path::new("base").join("2024-05-01_13-45-09"));
    }
}
