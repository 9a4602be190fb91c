use crate::core::{parser, submit};
use crate::domain::model::{
    BatchListResponse, BatchSummary, CreateBatchRequest, CreateBatchResponse, ImportBatch,
    RawTable, SubmitOutcome, TriggerWorkerRequest, TriggerWorkerResponse,
};
use crate::domain::ports::{ConfigProvider, ImportPipeline, Storage};
use crate::utils::error::{ImportError, Result};
use reqwest::Client;
use std::time::Duration;

pub struct StandardPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) client: Client,
}

impl<S: Storage, C: ConfigProvider> StandardPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    /// One worker wake-up call, sized to the new records. Public so the
    /// best-effort path stays testable on its own.
    pub async fn trigger_worker(&self, batch_size: u64) -> Result<TriggerWorkerResponse> {
        trigger_worker(
            &self.client,
            self.config.trigger_worker_url(),
            self.config.request_timeout(),
            batch_size,
        )
        .await
    }

    /// Best-effort side task: spawned, never awaited, failure logged and
    /// swallowed. The operator-visible outcome of the submission does not
    /// depend on it.
    fn spawn_worker_trigger(&self, batch_size: u64) {
        let client = self.client.clone();
        let url = self.config.trigger_worker_url().to_string();
        let timeout = self.config.request_timeout();
        tokio::spawn(async move {
            match trigger_worker(&client, &url, timeout, batch_size).await {
                Ok(response) => {
                    tracing::debug!(
                        triggered = response.triggered,
                        message = response.message.as_deref().unwrap_or(""),
                        "Worker trigger acknowledged"
                    );
                }
                Err(e) => tracing::warn!("Worker trigger failed (ignored): {}", e),
            }
        });
    }
}

async fn trigger_worker(
    client: &Client,
    url: &str,
    timeout: Duration,
    batch_size: u64,
) -> Result<TriggerWorkerResponse> {
    let response = client
        .post(url)
        .timeout(timeout)
        .json(&TriggerWorkerRequest { batch_size })
        .send()
        .await?;
    let status = response.status();
    let body = response.text().await?;
    submit::decode_json_response(status, &body)
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> ImportPipeline for StandardPipeline<S, C> {
    async fn load_table(&self, path: &str) -> Result<RawTable> {
        // Extension check happens before any read or parse attempt.
        let format = parser::detect_format(path)?;
        tracing::debug!("Source format for {}: {:?}", path, format);

        let data = self.storage.read_file(path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), path);

        parser::parse(format, &data)
    }

    async fn submit(&self, batch: &ImportBatch) -> Result<SubmitOutcome> {
        let batch_name = batch.name.trim();
        if batch_name.is_empty() {
            return Err(ImportError::ValidationError {
                message: "Batch name must not be empty".to_string(),
            });
        }
        if batch.phones.is_empty() {
            return Err(ImportError::ValidationError {
                message: "No valid phone numbers to submit".to_string(),
            });
        }

        let request = CreateBatchRequest {
            batch_name: batch_name.to_string(),
            phones: batch.phones.join("\n"),
        };
        tracing::info!(
            "Submitting batch '{}' with {} unique phones",
            request.batch_name,
            batch.phones.len()
        );

        let response = self
            .client
            .post(self.config.create_batch_url())
            .timeout(self.config.request_timeout())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let decoded: CreateBatchResponse = submit::decode_json_response(status, &body)?;
        let outcome = submit::outcome_from_response(decoded)?;

        if outcome.added > 0 {
            self.spawn_worker_trigger(submit::worker_batch_size(outcome.added));
        }

        Ok(outcome)
    }

    async fn refresh_batches(&self) -> Result<Vec<BatchSummary>> {
        let response = self
            .client
            .get(self.config.list_batches_url())
            .timeout(self.config.request_timeout())
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let decoded: BatchListResponse = submit::decode_json_response(status, &body)?;
        if !decoded.success {
            return Err(ImportError::ServerError {
                message: "batch list refresh rejected by the backend".to_string(),
            });
        }
        Ok(decoded.batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, path: &str, data: &[u8]) {
            self.files
                .lock()
                .await
                .insert(path.to_string(), data.to_vec());
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ImportError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }
    }

    struct MockConfig {
        create_batch_url: String,
        trigger_worker_url: String,
        list_batches_url: String,
    }

    impl MockConfig {
        fn new(server: &MockServer) -> Self {
            Self {
                create_batch_url: server.url("/create_batch"),
                trigger_worker_url: server.url("/trigger_worker"),
                list_batches_url: server.url("/list_batches"),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn create_batch_url(&self) -> &str {
            &self.create_batch_url
        }

        fn trigger_worker_url(&self) -> &str {
            &self.trigger_worker_url
        }

        fn list_batches_url(&self) -> &str {
            &self.list_batches_url
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(5)
        }
    }

    fn batch(name: &str, phones: &[&str]) -> ImportBatch {
        ImportBatch {
            name: name.to_string(),
            phones: phones.iter().map(|p| p.to_string()).collect(),
            stats: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_load_table_reads_and_parses_csv() {
        let server = MockServer::start();
        let storage = MockStorage::new();
        storage
            .put("leads.csv", b"Name,Phone\nIvan,89001234567\n")
            .await;
        let pipeline = StandardPipeline::new(storage, MockConfig::new(&server));

        let table = pipeline.load_table("leads.csv").await.unwrap();
        assert_eq!(table.width(), 2);
        assert_eq!(table.data_row_count(), 1);
    }

    #[tokio::test]
    async fn test_load_table_rejects_unknown_extension_before_reading() {
        let server = MockServer::start();
        // Storage is empty on purpose: with a read attempt this would be an
        // IO error, not an unsupported-format error.
        let pipeline = StandardPipeline::new(MockStorage::new(), MockConfig::new(&server));

        let err = pipeline.load_table("report.pdf").await.unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat { .. }));
    }

    #[tokio::test]
    async fn test_submit_sends_newline_joined_phones() {
        let server = MockServer::start();
        let create_mock = server.mock(|when, then| {
            when.method(POST).path("/create_batch").json_body(
                serde_json::json!({
                    "batch_name": "May leads",
                    "phones": "+79001234567\n+79001234568",
                }),
            );
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "success": true,
                    "added": 2,
                    "duplicates": 0,
                    "invalid": 0,
                    "worker_triggered": false,
                }));
        });
        server.mock(|when, then| {
            when.method(POST).path("/trigger_worker");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"triggered": true}));
        });

        let pipeline = StandardPipeline::new(MockStorage::new(), MockConfig::new(&server));
        let outcome = pipeline
            .submit(&batch("May leads", &["+79001234567", "+79001234568"]))
            .await
            .unwrap();

        create_mock.assert();
        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.duplicates, 0);
    }

    #[tokio::test]
    async fn test_whitespace_batch_name_makes_no_network_call() {
        let server = MockServer::start();
        let create_mock = server.mock(|when, then| {
            when.method(POST).path("/create_batch");
            then.status(200);
        });

        let pipeline = StandardPipeline::new(MockStorage::new(), MockConfig::new(&server));
        let err = pipeline
            .submit(&batch("   ", &["+79001234567"]))
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::ValidationError { .. }));
        assert_eq!(create_mock.hits(), 0);
    }

    #[tokio::test]
    async fn test_empty_phone_set_makes_no_network_call() {
        let server = MockServer::start();
        let create_mock = server.mock(|when, then| {
            when.method(POST).path("/create_batch");
            then.status(200);
        });

        let pipeline = StandardPipeline::new(MockStorage::new(), MockConfig::new(&server));
        let err = pipeline.submit(&batch("May leads", &[])).await.unwrap_err();

        assert!(matches!(err, ImportError::ValidationError { .. }));
        assert_eq!(create_mock.hits(), 0);
    }

    #[tokio::test]
    async fn test_submit_surfaces_http_500_as_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/create_batch");
            then.status(500).body("Internal Server Error");
        });

        let pipeline = StandardPipeline::new(MockStorage::new(), MockConfig::new(&server));
        let err = pipeline
            .submit(&batch("May leads", &["+79001234567"]))
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::ServerError { .. }));
    }

    #[tokio::test]
    async fn test_submit_distinguishes_html_body_from_bad_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/create_batch");
            then.status(200).body("<br />\n<b>Warning</b>: mysqli_connect()");
        });

        let pipeline = StandardPipeline::new(MockStorage::new(), MockConfig::new(&server));
        let err = pipeline
            .submit(&batch("May leads", &["+79001234567"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::ServerError { .. }));

        let server2 = MockServer::start();
        server2.mock(|when, then| {
            when.method(POST).path("/create_batch");
            then.status(200).body("success=true");
        });
        let pipeline2 = StandardPipeline::new(MockStorage::new(), MockConfig::new(&server2));
        let err2 = pipeline2
            .submit(&batch("May leads", &["+79001234567"]))
            .await
            .unwrap_err();
        assert!(matches!(err2, ImportError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_trigger_worker_posts_capped_batch_size() {
        let server = MockServer::start();
        let worker_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/trigger_worker")
                .json_body(serde_json::json!({"batch_size": 50}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"triggered": true, "message": "started"}));
        });

        let pipeline = StandardPipeline::new(MockStorage::new(), MockConfig::new(&server));
        let response = pipeline
            .trigger_worker(submit::worker_batch_size(120))
            .await
            .unwrap();

        worker_mock.assert();
        assert!(response.triggered);
        assert_eq!(response.message.as_deref(), Some("started"));
    }

    #[tokio::test]
    async fn test_refresh_batches_decodes_the_list() {
        let server = MockServer::start();
        let list_mock = server.mock(|when, then| {
            when.method(GET).path("/list_batches");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "success": true,
                    "batches": [
                        {"batch_name": "May leads", "total": 120, "processed": 37},
                        {"batch_name": "Cold calls", "total": 15, "processed": 15},
                    ],
                }));
        });

        let pipeline = StandardPipeline::new(MockStorage::new(), MockConfig::new(&server));
        let batches = pipeline.refresh_batches().await.unwrap();

        list_mock.assert();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].batch_name, "May leads");
        assert_eq!(batches[0].total, 120);
    }
}
