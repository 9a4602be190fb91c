use crate::core::session::ImportSession;
use crate::domain::model::{BatchSummary, ColumnScore, Extraction, ImportBatch, SubmitOutcome};
use crate::domain::ports::ImportPipeline;
use crate::utils::error::{ImportError, Result};

/// Operator inputs for one import run.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub file: String,
    pub batch_name: String,
    /// Detection override: the CLI stand-in for the operator column picker.
    pub column: Option<usize>,
    /// Stop after the preview; no network traffic.
    pub dry_run: bool,
}

/// Everything one run produced, for the caller to render or assert on.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub scores: Vec<ColumnScore>,
    pub column: usize,
    pub extraction: Extraction,
    pub outcome: Option<SubmitOutcome>,
    pub batches: Vec<BatchSummary>,
}

pub struct ImportEngine<P: ImportPipeline> {
    pipeline: P,
}

impl<P: ImportPipeline> ImportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self, request: &ImportRequest) -> Result<ImportReport> {
        println!("Reading {}...", request.file);
        let table = self.pipeline.load_table(&request.file).await?;
        println!(
            "Parsed {} data rows x {} columns",
            table.data_row_count(),
            table.width()
        );

        let mut session = ImportSession::new();
        session.load(&request.file, table);

        let column = match request.column {
            Some(index) => {
                session.select_column(index)?;
                index
            }
            None => match session.selected_column() {
                Some(index) => index,
                None => {
                    return Err(ImportError::ValidationError {
                        message: ambiguous_columns_message(session.scores()),
                    })
                }
            },
        };

        let scores = session.scores().to_vec();
        if let Some(score) = scores.iter().find(|s| s.index == column) {
            println!(
                "Extracting from column '{}' ({}/{} phone-like, {:.0}%)",
                score.label, score.phone_count, score.total, score.percent()
            );
        }

        let extraction = session
            .extraction()
            .cloned()
            .ok_or_else(|| ImportError::ValidationError {
                message: "No column selected for extraction".to_string(),
            })?;

        print_preview(&extraction);

        if request.dry_run {
            println!("Dry run: nothing was submitted.");
            return Ok(ImportReport {
                scores,
                column,
                extraction,
                outcome: None,
                batches: Vec::new(),
            });
        }

        let batch = ImportBatch::new(request.batch_name.clone(), &extraction);
        let outcome = self.pipeline.submit(&batch).await?;
        println!(
            "Batch accepted: {} added, {} already known, {} rejected by the server",
            outcome.added, outcome.duplicates, outcome.invalid
        );

        // View refresh is an independent follow-up; its failure must not
        // turn a successful submission into an error.
        let batches = match self.pipeline.refresh_batches().await {
            Ok(batches) => batches,
            Err(e) => {
                tracing::warn!("Batch list refresh failed: {}", e);
                Vec::new()
            }
        };

        Ok(ImportReport {
            scores,
            column,
            extraction,
            outcome: Some(outcome),
            batches,
        })
    }
}

fn print_preview(extraction: &Extraction) {
    let stats = &extraction.stats;
    println!(
        "Found {} unique phones ({} cells, {} duplicates, {} invalid)",
        stats.unique, stats.total, stats.duplicates_in_file, stats.invalid
    );
    let (sample, more) = extraction.preview();
    for phone in sample {
        println!("  {}", phone);
    }
    if more > 0 {
        println!("  ... and {} more", more);
    }
    if stats.invalid > 0 {
        println!("⚠️  {} values were not recognized as phone numbers", stats.invalid);
    }
    if stats.duplicates_in_file > 0 {
        println!("⚠️  {} duplicate entries were collapsed", stats.duplicates_in_file);
    }
}

fn ambiguous_columns_message(scores: &[ColumnScore]) -> String {
    let mut message = String::from(
        "No column looks confidently like phone numbers; re-run with --column and one of:\n",
    );
    for score in scores {
        message.push_str(&format!(
            "  {}: {} ({}/{}, {:.0}%)\n",
            score.index,
            score.label,
            score.phone_count,
            score.total,
            score.percent()
        ));
    }
    message
}
