//! Lenient parser for brace-delimited rectangle collections.
//!
//! Input looks like a nested literal list:
//!
//! ```text
//! {
//!   { {{0,0},{2,1}}, {{1,0},{3,1}} },
//!   { {{5,5},{6,6}} }
//! }
//! ```
//!
//! Each top-level group becomes one [`Collection`]. Parsing never fails:
//! anything that does not look like a `{{x1,y1},{x2,y2}}` token is skipped,
//! and unbalanced braces produce a best-effort split. Groups spanning more
//! than [`MAX_GROUP_CELLS`] cells are dropped before decomposition. Use
//! [`crate::validation::check_text`] to find out what was skipped.

use std::fs;
use std::path::Path;

use super::model::{spanned_cells, Collection, RectanglePair, MAX_GROUP_CELLS};
use crate::error::CellplotError;

/// Result of the top-level brace scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct GroupScan<'a> {
    pub groups: Vec<&'a str>,
    /// Brace depth left over at end of input.
    pub final_depth: i64,
    /// Lowest depth reached; negative means a stray `}`.
    pub min_depth: i64,
}

/// Read a collections file and parse it.
///
/// Only the file read can fail; the contents are parsed leniently.
pub fn read_collections(path: &Path) -> Result<Vec<Collection>, CellplotError> {
    let text = fs::read_to_string(path).map_err(|source| CellplotError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_collections(&text))
}

/// Parse text into the ordered sequence of non-empty collections.
pub fn parse_collections(text: &str) -> Vec<Collection> {
    let groups = split_groups(text);
    log::debug!("found {} top-level group(s)", groups.len());

    groups
        .iter()
        .enumerate()
        .filter_map(|(idx, group)| {
            let collection = collection_from_group(group);
            if collection.is_none() {
                log::debug!("group {} produced no collection", idx + 1);
            }
            collection
        })
        .collect()
}

/// Split text into its top-level brace-balanced groups, in source order.
///
/// When the whole text is a single brace block wrapping a list of groups,
/// that one outer layer is removed first.
pub fn split_groups(text: &str) -> Vec<&str> {
    scan_groups(text).groups
}

pub(crate) fn scan_groups(text: &str) -> GroupScan<'_> {
    let trimmed = text.trim();
    let body = strip_list_wrapper(trimmed).unwrap_or(trimmed);

    let mut scan = GroupScan::default();
    let mut depth: i64 = 0;
    let mut start = 0;

    for (idx, ch) in body.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                scan.min_depth = scan.min_depth.min(depth);
            }
            _ => {}
        }

        let end = idx + ch.len_utf8();
        let buffer = body[start..end].trim();
        if depth == 0 && !buffer.is_empty() {
            let group = buffer.trim_end_matches(',').trim_end();
            // A lone separator between groups is not a group of its own.
            if !group.is_empty() {
                scan.groups.push(group);
            }
            start = end;
        }
    }

    scan.final_depth = depth;
    scan
}

/// Brace depth of a point inside a rectangle inside a group inside a list.
const LIST_DEPTH: i64 = 4;

/// Returns the inside of `text` when it is one brace block wrapping a list
/// of groups.
///
/// The outer braces must match each other and the block must nest deep
/// enough to hold groups of rectangles. A bare group such as
/// `{{{0,0},{1,1}},{{5,5},{6,6}}}` is left intact so its rectangles stay
/// together.
fn strip_list_wrapper(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('{')?.strip_suffix('}')?;

    let mut depth: i64 = 1;
    let mut max_depth = depth;
    for ch in inner.chars() {
        match ch {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => continue,
        }
        if depth == 0 {
            // The first brace closes before the end of the text.
            return None;
        }
        max_depth = max_depth.max(depth);
    }

    (depth == 1 && max_depth >= LIST_DEPTH).then(|| inner.trim())
}

/// Find every `{{x1,y1},{x2,y2}}` token in a group, left to right.
///
/// Matches never overlap. Whitespace is allowed between any two tokens and
/// integers may carry a leading minus sign. Integers that do not fit in an
/// `i64` make the surrounding token fail to match.
pub fn find_rectangles(group: &str) -> Vec<RectanglePair> {
    let mut rects = Vec::new();
    let mut pos = 0;

    while pos < group.len() {
        let mut cursor = Cursor::new(group, pos);
        if let Some(rect) = cursor.rectangle() {
            rects.push(rect);
            pos = cursor.pos;
        } else {
            // Advance to the next char boundary and retry.
            pos += group[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }

    rects
}

/// Decompose and merge every rectangle in a group.
///
/// Returns `None` when the group spans no cells at all, or more than
/// [`MAX_GROUP_CELLS`].
pub fn collection_from_group(group: &str) -> Option<Collection> {
    let rects = find_rectangles(group);
    let spanned = spanned_cells(&rects);
    if spanned > MAX_GROUP_CELLS {
        log::warn!(
            "group spans {} cell(s), above the limit of {}; skipping",
            spanned,
            MAX_GROUP_CELLS
        );
        return None;
    }
    let collection = Collection::from_rectangles(&rects);
    (!collection.is_empty()).then_some(collection)
}

/// Fuzz-only entrypoint for the collections parser.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_collections(input: &str) -> usize {
    parse_collections(input).iter().map(Collection::len).sum()
}

/// Hand-written matcher for a single rectangle token.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str, pos: usize) -> Self {
        Self { src, pos }
    }

    fn rectangle(&mut self) -> Option<RectanglePair> {
        self.expect('{')?;
        let (x1, y1) = self.point()?;
        self.skip_whitespace();
        self.expect(',')?;
        let (x2, y2) = self.point()?;
        self.skip_whitespace();
        self.expect('}')?;
        Some(RectanglePair::new(x1, y1, x2, y2))
    }

    fn point(&mut self) -> Option<(i64, i64)> {
        self.skip_whitespace();
        self.expect('{')?;
        self.skip_whitespace();
        let x = self.integer()?;
        self.skip_whitespace();
        self.expect(',')?;
        self.skip_whitespace();
        let y = self.integer()?;
        self.skip_whitespace();
        self.expect('}')?;
        Some((x, y))
    }

    fn integer(&mut self) -> Option<i64> {
        let rest = &self.src[self.pos..];
        let sign_len = usize::from(rest.starts_with('-'));
        let digits = rest[sign_len..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return None;
        }
        let len = sign_len + digits;
        let value = rest[..len].parse::<i64>().ok()?;
        self.pos += len;
        Some(value)
    }

    fn expect(&mut self, want: char) -> Option<()> {
        if self.src[self.pos..].starts_with(want) {
            self.pos += want.len_utf8();
            Some(())
        } else {
            None
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.src[self.pos..];
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }
}
