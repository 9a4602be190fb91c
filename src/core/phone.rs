use crate::domain::model::CellValue;
use regex::Regex;
use std::sync::LazyLock;

// Russian mobile shape after punctuation is stripped: 10 digits starting
// with 9, with an optional 7/8 trunk prefix in front. Both column scoring
// and final normalization go through this one pattern.
static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[78]?9\d{9}$").expect("phone shape regex"));

/// Normalizes a raw candidate to the canonical `+7XXXXXXXXXX` form.
///
/// Keeps digits (a leading `+` is tolerated and dropped), strips a 7/8 trunk
/// prefix from 11-digit numbers, and accepts only a 10-digit remainder
/// starting with 9. Anything else yields `None`; candidates are never
/// coerced into a best guess.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = rest.chars().filter(|c| c.is_ascii_digit()).collect();
    if !PHONE_SHAPE.is_match(&digits) {
        return None;
    }
    Some(format!("+7{}", &digits[digits.len() - 10..]))
}

/// Column-scoring predicate: a cell is phone-like when normalization
/// succeeds on its rendered value.
pub fn is_phone_like(cell: &CellValue) -> bool {
    !cell.is_empty() && normalize(&cell.render()).is_some()
}
