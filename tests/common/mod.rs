#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const SAMPLE: &str = "tests/fixtures/sample_collections.txt";
pub const UNBALANCED: &str = "tests/fixtures/unbalanced.txt";

/// 26 bytes of input spanning 10^10 cells.
pub const OVERSIZED: &str = "{{{0,0},{100000,100000}}}";

pub fn write_input(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("input_collections.txt");
    fs::write(&path, text).expect("write input file");
    path
}

/// Sorted file names of the PNGs directly inside `dir`.
pub fn png_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read output dir")
        .map(|entry| entry.expect("dir entry").file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".png"))
        .collect();
    names.sort();
    names
}

/// The only subdirectory of `dir`.
pub fn single_subdir(dir: &Path) -> PathBuf {
    let dirs: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read base dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.is_dir())
        .collect();
    assert_eq!(dirs.len(), 1, "expected one run directory, found {dirs:?}");
    dirs.into_iter().next().expect("one dir")
}
