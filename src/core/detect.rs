use crate::core::phone::is_phone_like;
use crate::domain::model::{ColumnScore, RawTable};
use std::cmp::Ordering;

/// Columns scoring at or above this ratio are picked without asking the
/// operator.
pub const AUTO_SELECT_THRESHOLD: f64 = 0.8;

/// Scores every column of the table (header excluded) by the share of its
/// non-empty values that look like phones, ranked best-first. Ties keep
/// column order.
pub fn score_columns(table: &RawTable) -> Vec<ColumnScore> {
    let mut scores: Vec<ColumnScore> = (0..table.width())
        .map(|column| {
            let mut phone_count = 0;
            let mut total = 0;
            for row in table.data_rows() {
                let cell = &row[column];
                if cell.is_empty() {
                    continue;
                }
                total += 1;
                if is_phone_like(cell) {
                    phone_count += 1;
                }
            }
            ColumnScore {
                index: column,
                label: table.header_label(column),
                phone_count,
                total,
            }
        })
        .collect();

    scores.sort_by(|a, b| {
        b.ratio()
            .partial_cmp(&a.ratio())
            .unwrap_or(Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    scores
}

/// The top-ranked column, but only when its score clears the threshold.
/// Below it the operator has to pick.
pub fn auto_select(scores: &[ColumnScore]) -> Option<&ColumnScore> {
    scores
        .first()
        .filter(|score| score.ratio() >= AUTO_SELECT_THRESHOLD)
}
