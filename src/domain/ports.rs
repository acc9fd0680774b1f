use crate::core::dataset::Dataset;
use crate::domain::model::RawEntry;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn timeout_seconds(&self) -> u64;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_seconds(&self) -> u64;

    /// Archive name when CSV/JSON outputs are bundled into a ZIP.
    fn compression_filename(&self) -> Option<&str> {
        None
    }

    fn headers(&self) -> Option<&HashMap<String, String>> {
        None
    }

    /// Overrides the default relevance keyword set.
    fn keywords(&self) -> Option<&[String]> {
        None
    }

    fn max_records(&self) -> Option<usize> {
        None
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawEntry>>;
    async fn transform(&self, entries: Vec<RawEntry>) -> Result<Dataset>;
    async fn load(&self, dataset: &Dataset) -> Result<String>;
}
