use serde::{Deserialize, Serialize};

/// One cell of a parsed input table. Numeric spreadsheet cells are kept
/// numeric so large phone-like numbers are not mangled by display formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Renders the cell for phone matching. Whole numbers become plain
    /// integer strings: no exponent, no decimal point.
    pub fn render(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 9_007_199_254_740_992.0 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }
}

/// Input file kind, decided by extension before any parsing happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Spreadsheet,
    Delimited,
    Lines,
}

/// A rectangular table read from one input file. Row 0 is the header row and
/// never carries data; every row has a cell (possibly empty) for every column.
#[derive(Debug, Clone)]
pub struct RawTable {
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Builds a table from parsed rows, padding ragged rows with empty cells
    /// up to the widest row.
    pub fn new(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        if self.rows.len() > 1 {
            &self.rows[1..]
        } else {
            &[]
        }
    }

    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Header text for a column, or a synthetic "Column N" label (1-based)
    /// when the header cell is empty.
    pub fn header_label(&self, column: usize) -> String {
        let header = self
            .rows
            .first()
            .and_then(|row| row.get(column))
            .map(CellValue::render)
            .unwrap_or_default();
        if header.is_empty() {
            format!("Column {}", column + 1)
        } else {
            header
        }
    }
}

/// Phone-likeness score for one column, computed once per import and
/// discarded after a column is chosen.
#[derive(Debug, Clone)]
pub struct ColumnScore {
    pub index: usize,
    pub label: String,
    pub phone_count: usize,
    pub total: usize,
}

impl ColumnScore {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.phone_count as f64 / self.total as f64
        }
    }

    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }
}

/// Aggregate counters for one extraction pass over the chosen column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub total: usize,
    pub unique: usize,
    pub duplicates_in_file: usize,
    pub invalid: usize,
}

pub const PREVIEW_LIMIT: usize = 10;

/// Deduplicated extraction result for the chosen column. Phones keep their
/// first-appearance order.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub phones: Vec<String>,
    pub stats: ImportStats,
}

impl Extraction {
    /// Up to the first [`PREVIEW_LIMIT`] unique phones, plus how many more
    /// are not shown.
    pub fn preview(&self) -> (&[String], usize) {
        let shown = self.phones.len().min(PREVIEW_LIMIT);
        (&self.phones[..shown], self.phones.len() - shown)
    }

    pub fn can_submit(&self) -> bool {
        !self.phones.is_empty()
    }
}

/// A named, deduplicated set of normalized phones ready for hand-off to the
/// backend. The client discards its copy after a successful submission.
#[derive(Debug, Clone)]
pub struct ImportBatch {
    pub name: String,
    pub phones: Vec<String>,
    pub stats: ImportStats,
}

impl ImportBatch {
    pub fn new(name: impl Into<String>, extraction: &Extraction) -> Self {
        Self {
            name: name.into(),
            phones: extraction.phones.clone(),
            stats: extraction.stats,
        }
    }
}

// Wire types for the backend JSON contract.

#[derive(Debug, Clone, Serialize)]
pub struct CreateBatchRequest {
    pub batch_name: String,
    /// Newline-joined normalized phones, one per line.
    pub phones: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBatchResponse {
    pub success: bool,
    #[serde(default)]
    pub added: Option<u64>,
    #[serde(default)]
    pub duplicates: Option<u64>,
    #[serde(default)]
    pub invalid: Option<u64>,
    #[serde(default)]
    pub batch_name: Option<String>,
    #[serde(default)]
    pub worker_triggered: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TriggerWorkerRequest {
    pub batch_size: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerWorkerResponse {
    pub triggered: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchSummary {
    pub batch_name: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub processed: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchListResponse {
    pub success: bool,
    #[serde(default)]
    pub batches: Vec<BatchSummary>,
}

/// What the backend accepted from one submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitOutcome {
    pub added: u64,
    pub duplicates: u64,
    pub invalid: u64,
    pub worker_triggered: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_render_without_exponent() {
        assert_eq!(CellValue::Number(89001234567.0).render(), "89001234567");
        assert_eq!(CellValue::Number(7.0).render(), "7");
    }

    #[test]
    fn fractional_numbers_keep_their_point() {
        assert_eq!(CellValue::Number(1.5).render(), "1.5");
    }

    #[test]
    fn whitespace_text_counts_as_empty() {
        assert!(CellValue::Text("   ".to_string()).is_empty());
        assert!(!CellValue::Text("x".to_string()).is_empty());
        assert!(CellValue::Empty.is_empty());
    }

    #[test]
    fn ragged_rows_are_padded_to_the_widest() {
        let table = RawTable::new(vec![
            vec![CellValue::Text("A".into()), CellValue::Text("B".into())],
            vec![CellValue::Text("only one".into())],
        ]);
        assert_eq!(table.width(), 2);
        assert_eq!(table.data_rows()[0][1], CellValue::Empty);
    }

    #[test]
    fn header_label_falls_back_to_column_number() {
        let table = RawTable::new(vec![
            vec![CellValue::Text("Phone".into()), CellValue::Empty],
            vec![CellValue::Empty, CellValue::Empty],
        ]);
        assert_eq!(table.header_label(0), "Phone");
        assert_eq!(table.header_label(1), "Column 2");
    }

    #[test]
    fn empty_column_scores_zero_without_dividing() {
        let score = ColumnScore {
            index: 0,
            label: "Empty".to_string(),
            phone_count: 0,
            total: 0,
        };
        assert_eq!(score.ratio(), 0.0);
    }

    #[test]
    fn preview_is_capped_at_ten() {
        let phones: Vec<String> = (0..12).map(|i| format!("+790012345{:02}", i)).collect();
        let extraction = Extraction {
            phones,
            stats: ImportStats::default(),
        };
        let (shown, more) = extraction.preview();
        assert_eq!(shown.len(), 10);
        assert_eq!(more, 2);
    }
}
