use crate::core::dataset::{Dataset, SharedDataset};
use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::sync::Arc;

/// Outcome of one ingestion run.
#[derive(Debug, Clone)]
pub struct EtlRun {
    pub dataset: Arc<Dataset>,
    pub output_path: String,
    pub extracted: usize,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<EtlRun> {
        tracing::info!("Starting tuition ingestion...");

        // Extract
        let entries = self.pipeline.extract().await?;
        let extracted = entries.len();
        tracing::info!("📥 Extracted {} catalogue entries", extracted);
        self.monitor.log_phase("Extract", extracted);

        // Transform
        let dataset = self.pipeline.transform(entries).await?;
        tracing::info!("🔧 Built dataset with {} records", dataset.len());
        self.monitor.log_phase("Transform", dataset.len());

        // Load
        let output_path = self.pipeline.load(&dataset).await?;
        tracing::info!("💾 Dataset saved to: {}", output_path);
        self.monitor.log_phase("Load", dataset.len());
        self.monitor.log_final();

        Ok(EtlRun {
            dataset: Arc::new(dataset),
            output_path,
            extracted,
        })
    }

    /// Runs a full ingestion and installs the result in `shared`.
    ///
    /// On failure the previously installed dataset stays in place.
    pub async fn refresh(&self, shared: &SharedDataset) -> Result<EtlRun> {
        let run = self.run().await?;
        shared.replace(Arc::clone(&run.dataset));
        Ok(run)
    }
}
