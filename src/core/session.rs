use crate::core::{detect, extract};
use crate::domain::model::{ColumnScore, Extraction, RawTable};
use crate::utils::error::{ImportError, Result};

/// In-memory state of one import dialog. Everything here is rebuilt when a
/// new file is loaded and discarded when the dialog closes; the pipeline
/// stages never touch ambient globals.
#[derive(Debug, Default)]
pub struct ImportSession {
    source_name: Option<String>,
    table: Option<RawTable>,
    scores: Vec<ColumnScore>,
    selected: Option<usize>,
    extraction: Option<Extraction>,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards all state, as on dialog open/close.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replaces the session contents with a freshly parsed table, scores its
    /// columns, and extracts immediately when one column is a confident
    /// match.
    pub fn load(&mut self, source_name: &str, table: RawTable) {
        self.reset();
        self.scores = detect::score_columns(&table);
        self.source_name = Some(source_name.to_string());
        self.table = Some(table);

        if let Some(best) = detect::auto_select(&self.scores) {
            let index = best.index;
            tracing::info!(
                "Auto-selected column '{}' ({:.0}% phone-like)",
                best.label,
                best.percent()
            );
            // Freshly computed index, always in range.
            let _ = self.select_column(index);
        }
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn scores(&self) -> &[ColumnScore] {
        &self.scores
    }

    pub fn selected_column(&self) -> Option<usize> {
        self.selected
    }

    pub fn extraction(&self) -> Option<&Extraction> {
        self.extraction.as_ref()
    }

    pub fn can_submit(&self) -> bool {
        self.extraction
            .as_ref()
            .map(Extraction::can_submit)
            .unwrap_or(false)
    }

    /// Switches the extraction target. Re-runs extraction against the new
    /// column without re-parsing the file.
    pub fn select_column(&mut self, column: usize) -> Result<&Extraction> {
        let table = self.table.as_ref().ok_or_else(|| ImportError::ValidationError {
            message: "No file loaded in this import session".to_string(),
        })?;
        if column >= table.width() {
            return Err(ImportError::ValidationError {
                message: format!(
                    "Column {} does not exist; the file has {} columns",
                    column,
                    table.width()
                ),
            });
        }
        self.selected = Some(column);
        Ok(self.extraction.insert(extract::extract(table, column)))
    }
}
