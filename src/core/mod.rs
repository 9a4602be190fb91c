pub mod detect;
pub mod engine;
pub mod extract;
pub mod parser;
pub mod phone;
pub mod pipeline;
pub mod session;
pub mod submit;

pub use crate::domain::model::{
    BatchSummary, CellValue, ColumnScore, Extraction, ImportBatch, ImportStats, RawTable,
    SourceFormat, SubmitOutcome,
};
pub use crate::domain::ports::{ConfigProvider, ImportPipeline, Storage};
pub use crate::utils::error::Result;
