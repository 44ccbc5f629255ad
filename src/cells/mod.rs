//! Unit-cell collections and the text parser that produces them.
//!
//! A collection file is a brace-nested list of groups, each holding
//! rectangle tokens of the form `{{x1,y1},{x2,y2}}`. Every rectangle is
//! decomposed into the 1×1 cells it spans, and the cells of one group are
//! merged into a single sorted, duplicate-free [`Collection`].
//!
//! # Example
//!
//! ```
//! use cellplot::cells::{parse_collections, UnitCell};
//!
//! let collections = parse_collections("{ { {{0,0},{2,1}} }, { {{4,4},{5,5}} } }");
//! assert_eq!(collections.len(), 2);
//! assert_eq!(collections[0].cells(), &[UnitCell::new(0, 0), UnitCell::new(1, 0)]);
//! ```

mod model;
mod parse;

pub use model::{spanned_cells, Collection, RectanglePair, UnitCell, MAX_GROUP_CELLS};
pub(crate) use parse::scan_groups;
pub use parse::{
    collection_from_group, find_rectangles, parse_collections, read_collections, split_groups,
};

#[cfg(feature = "fuzzing")]
pub use parse::fuzz_parse_collections;
