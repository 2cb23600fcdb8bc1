use detectcore::prelude::ResultProducer;
use detectcore::report::{DetectionReport, FileHandle};
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    #[error("an analysis is already in progress")]
    InProgress,
    #[error("analysis was cancelled")]
    Cancelled,
    #[error("analysis task failed: {0}")]
    Failed(String),
}

/// Runs one analysis at a time behind a simulated latency.
#[derive(Clone)]
pub struct AnalysisRunner {
    producer: Arc<dyn ResultProducer>,
    delay: Duration,
    slot: Arc<Semaphore>,
}

impl AnalysisRunner {
    pub fn new(producer: Arc<dyn ResultProducer>, delay: Duration) -> Self {
        Self {
            producer,
            delay,
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.slot.available_permits() == 0
    }

    /// Spawns the analysis of `file`. Fails while another one is in flight.
    pub fn start(&self, file: FileHandle) -> Result<AnalysisTask, AnalysisError> {
        let permit = self
            .slot
            .clone()
            .try_acquire_owned()
            .map_err(|_| AnalysisError::InProgress)?;
        let producer = self.producer.clone();
        let delay = self.delay;

        info!("analyzing {} ({} bytes)", file.name, file.size_bytes);
        let handle = tokio::spawn(async move {
            // Held until the task completes or is aborted.
            let _permit = permit;
            tokio::time::sleep(delay).await;
            producer.produce(&file)
        });

        Ok(AnalysisTask { handle })
    }

    #[cfg(test)]
    pub async fn analyze(&self, file: FileHandle) -> Result<DetectionReport, AnalysisError> {
        self.start(file)?.wait().await
    }
}

/// In-flight analysis.
pub struct AnalysisTask {
    handle: JoinHandle<DetectionReport>,
}

impl AnalysisTask {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Resolves once the task finishes. Must not be called again after it
    /// has returned.
    pub async fn wait(&mut self) -> Result<DetectionReport, AnalysisError> {
        match (&mut self.handle).await {
            Ok(report) => Ok(report),
            Err(err) if err.is_cancelled() => Err(AnalysisError::Cancelled),
            Err(err) => Err(AnalysisError::Failed(err.to_string())),
        }
    }
}
