use crate::domain::model::{BatchSummary, ImportBatch, RawTable, SubmitOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn create_batch_url(&self) -> &str;
    fn trigger_worker_url(&self) -> &str;
    fn list_batches_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

/// The I/O seams of one import: read+parse the file, submit the finished
/// batch, refresh the batch list after a successful submission. The pure
/// stages (scoring, extraction) live in `core` and need no seam.
#[async_trait]
pub trait ImportPipeline: Send + Sync {
    async fn load_table(&self, path: &str) -> Result<RawTable>;
    async fn submit(&self, batch: &ImportBatch) -> Result<SubmitOutcome>;
    async fn refresh_batches(&self) -> Result<Vec<BatchSummary>>;
}
