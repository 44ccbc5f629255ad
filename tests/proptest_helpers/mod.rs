#![allow(dead_code)]

use std::collections::BTreeSet;

use cellplot::cells::{RectanglePair, UnitCell};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Coordinates stay small so decomposed rectangles stay cheap.
pub const COORD_RANGE: std::ops::RangeInclusive<i64> = -20..=20;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_rect() -> impl Strategy<Value = RectanglePair> {
    (
        COORD_RANGE.clone(),
        COORD_RANGE.clone(),
        COORD_RANGE.clone(),
        COORD_RANGE.clone(),
    )
        .prop_map(|(x1, y1, x2, y2)| RectanglePair::new(x1, y1, x2, y2))
}

/// A group of up to `max_rects` rectangles (possibly none).
pub fn arb_group(max_rects: usize) -> impl Strategy<Value = Vec<RectanglePair>> {
    prop::collection::vec(arb_rect(), 0..=max_rects)
}

/// Several groups, each with its rectangles.
pub fn arb_groups(max_groups: usize, max_rects: usize) -> impl Strategy<Value = Vec<Vec<RectanglePair>>> {
    prop::collection::vec(arb_group(max_rects), 1..=max_groups)
}

/// Whitespace that may sit between tokens.
pub fn arb_ws() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", " ", "  ", "\n", "\t", " \n  "]).prop_map(String::from)
}

pub fn rect_text(rect: &RectanglePair, ws: &str) -> String {
    format!(
        "{{{ws}{{{ws}{}{ws},{ws}{}{ws}}}{ws},{ws}{{{ws}{}{ws},{ws}{}{ws}}}{ws}}}",
        rect.x1, rect.y1, rect.x2, rect.y2
    )
}

pub fn group_text(rects: &[RectanglePair], ws: &str) -> String {
    let body: Vec<String> = rects.iter().map(|r| rect_text(r, ws)).collect();
    format!("{{{ws}{}{ws}}}", body.join(&format!(",{ws}")))
}

/// A list-wrapped document, `{ group, group, ... }`.
pub fn document_text(groups: &[Vec<RectanglePair>], ws: &str) -> String {
    let body: Vec<String> = groups.iter().map(|g| group_text(g, ws)).collect();
    format!("{{{ws}{}{ws}}}", body.join(&format!(",{ws}")))
}

/// Reference decomposition: test every grid point in the bounding box.
pub fn brute_force_cells(rects: &[RectanglePair]) -> BTreeSet<UnitCell> {
    let mut out = BTreeSet::new();
    for r in rects {
        let (xlo, xhi) = (r.x1.min(r.x2), r.x1.max(r.x2));
        let (ylo, yhi) = (r.y1.min(r.y2), r.y1.max(r.y2));
        for x in *COORD_RANGE.start()..=*COORD_RANGE.end() {
            for y in *COORD_RANGE.start()..=*COORD_RANGE.end() {
                if xlo <= x && x < xhi && ylo <= y && y < yhi {
                    out.insert(UnitCell::new(x, y));
                }
            }
        }
    }
    out
}
