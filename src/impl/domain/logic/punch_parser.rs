use std::sync::LazyLock;

use regex::Regex;

use crate::entities::{CellValue, ClockTime, PunchSet};

/// Punches beyond this count are ignored.
pub const MAX_PUNCHES: usize = 4;

// Stamps may be glued together ("08:0313:58"), so no word boundaries.
static TIME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,2}):([0-9]{2})").expect("hardcoded regex should be valid")
});

/// Extracts clock times from the free text of one cell, in order of
/// appearance. Non-text and empty cells yield an empty set. Chronological
/// order is not checked here.
pub fn parse_punches(cell: &CellValue) -> PunchSet {
    let Some(text) = cell.as_text() else {
        return PunchSet::default();
    };

    let mut punches = PunchSet::default();
    for caps in TIME_TOKEN.captures_iter(text) {
        let hour = caps[1].parse::<u32>().ok();
        let minute = caps[2].parse::<u32>().ok();
        match hour.zip(minute).and_then(|(h, m)| ClockTime::from_hm(h, m)) {
            Some(t) if punches.times.len() < MAX_PUNCHES => punches.times.push(t),
            Some(_) => punches.excess += 1,
            None => punches.malformed += 1,
        }
    }
    punches
}
