use crate::core::phone::normalize;
use crate::domain::model::{CellValue, Extraction, ImportStats, RawTable};
use std::collections::HashSet;

/// Walks every data row of the chosen column, normalizing, counting and
/// deduplicating. Empty cells are skipped entirely and appear in no tally.
pub fn extract(table: &RawTable, column: usize) -> Extraction {
    let mut seen = HashSet::new();
    let mut phones = Vec::new();
    let mut stats = ImportStats::default();
    let mut normalized_count = 0;

    for row in table.data_rows() {
        let cell = row.get(column).unwrap_or(&CellValue::Empty);
        if cell.is_empty() {
            continue;
        }
        stats.total += 1;
        match normalize(&cell.render()) {
            Some(phone) => {
                normalized_count += 1;
                if seen.insert(phone.clone()) {
                    phones.push(phone);
                }
            }
            None => stats.invalid += 1,
        }
    }

    stats.unique = phones.len();
    stats.duplicates_in_file = normalized_count - phones.len();

    tracing::debug!(
        total = stats.total,
        unique = stats.unique,
        duplicates = stats.duplicates_in_file,
        invalid = stats.invalid,
        "Extraction finished"
    );

    Extraction { phones, stats }
}
