use crate::core::builder::RecordBuilder;
use crate::core::dataset::Dataset;
use crate::core::relevance::RelevanceFilter;
use crate::core::table::dataset_to_csv;
use crate::core::{ConfigProvider, Pipeline, RawEntry, Storage};
use crate::utils::error::{EtlError, Result};
use reqwest::{Client, StatusCode};
use std::io::Write;
use std::time::Duration;
use zip::write::{FileOptions, ZipWriter};

pub const CSV_FILENAME: &str = "tuition_fees.csv";
pub const JSON_FILENAME: &str = "tuition_fees.json";

/// Fetches the course catalogue, builds the fee dataset and persists it.
pub struct TuitionPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> TuitionPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    fn record_builder(&self) -> RecordBuilder {
        match self.config.keywords() {
            Some(keywords) => RecordBuilder::new(RelevanceFilter::new(keywords)),
            None => RecordBuilder::default(),
        }
    }

    async fn fetch_once(&self) -> std::result::Result<serde_json::Value, FetchFailure> {
        let mut request = self
            .client
            .get(self.config.api_endpoint())
            .timeout(Duration::from_secs(self.config.timeout_seconds()));

        if let Some(headers) = self.config.headers() {
            for (key, value) in headers {
                request = request.header(key, value);
            }
        }

        let response = request.send().await.map_err(FetchFailure::Transient)?;
        let status = response.status();
        tracing::debug!("Catalogue response status: {}", status);

        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchFailure::RetryableStatus(status));
        }
        if !status.is_success() {
            return Err(FetchFailure::RejectedStatus(status));
        }

        response.json().await.map_err(FetchFailure::Fatal)
    }

    /// GET with retry; transport errors, 429 and 5xx are retried, other statuses are not.
    async fn fetch_catalogue(&self) -> Result<serde_json::Value> {
        let endpoint = self.config.api_endpoint();
        let attempts = self.config.retry_attempts() + 1;
        let delay = Duration::from_secs(self.config.retry_delay_seconds());
        let mut last_failure = String::new();

        for attempt in 1..=attempts {
            tracing::debug!("Requesting catalogue (attempt {}/{}): {}", attempt, attempts, endpoint);

            match self.fetch_once().await {
                Ok(json) => return Ok(json),
                Err(FetchFailure::Fatal(e)) => return Err(EtlError::ApiError(e)),
                Err(FetchFailure::RejectedStatus(status)) => {
                    return Err(EtlError::ProcessingError {
                        message: format!("Catalogue endpoint returned HTTP {}", status),
                    })
                }
                Err(failure) => {
                    last_failure = failure.to_string();
                    tracing::warn!(
                        "⚠️ Catalogue request attempt {}/{} failed: {}",
                        attempt,
                        attempts,
                        last_failure
                    );
                    if attempt < attempts && !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(EtlError::RetryExhausted {
            endpoint: endpoint.to_string(),
            attempts,
            message: last_failure,
        })
    }

    fn wants(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }
}

enum FetchFailure {
    Transient(reqwest::Error),
    RetryableStatus(StatusCode),
    RejectedStatus(StatusCode),
    Fatal(reqwest::Error),
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailure::Transient(e) | FetchFailure::Fatal(e) => write!(f, "{}", e),
            FetchFailure::RetryableStatus(status) | FetchFailure::RejectedStatus(status) => {
                write!(f, "HTTP {}", status)
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for TuitionPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawEntry>> {
        tracing::info!("🚀 Fetching course catalogue from: {}", self.config.api_endpoint());

        let items = match self.fetch_catalogue().await? {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(EtlError::ProcessingError {
                    message: format!(
                        "Expected a JSON array of courses, got {}",
                        json_kind(&other)
                    ),
                })
            }
        };

        let limit = self.config.max_records().unwrap_or(items.len());
        let mut entries = Vec::with_capacity(limit.min(items.len()));
        let mut malformed = 0usize;

        for item in items.into_iter().take(limit) {
            match serde_json::from_value::<RawEntry>(item) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    malformed += 1;
                    tracing::debug!("Skipping malformed catalogue item: {}", e);
                }
            }
        }

        if malformed > 0 {
            tracing::warn!("⚠️ Skipped {} malformed catalogue items", malformed);
        }

        Ok(entries)
    }

    async fn transform(&self, entries: Vec<RawEntry>) -> Result<Dataset> {
        Ok(self.record_builder().build(&entries))
    }

    async fn load(&self, dataset: &Dataset) -> Result<String> {
        let mut outputs: Vec<(&str, Vec<u8>)> = Vec::new();

        if self.wants("csv") {
            outputs.push((CSV_FILENAME, dataset_to_csv(dataset)?));
        }
        if self.wants("json") {
            outputs.push((
                JSON_FILENAME,
                serde_json::to_vec_pretty(dataset.records())?,
            ));
        }

        if outputs.is_empty() {
            return Err(EtlError::ValidationError {
                message: "No output format selected".to_string(),
            });
        }

        if let Some(archive) = self.config.compression_filename() {
            tracing::debug!("Creating ZIP archive with {} files", outputs.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, data) in &outputs {
                    zip.start_file::<_, ()>(*name, FileOptions::default())?;
                    zip.write_all(data)?;
                }
                zip.finish()?.into_inner()
            };

            self.storage.write_file(archive, &zip_data).await?;
            return Ok(format!("{}/{}", self.config.output_path(), archive));
        }

        for (name, data) in &outputs {
            tracing::debug!("Writing {} ({} bytes)", name, data.len());
            self.storage.write_file(name, data).await?;
        }

        let primary = outputs[0].0;
        Ok(format!("{}/{}", self.config.output_path(), primary))
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
