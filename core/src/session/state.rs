use crate::prelude::ReportResult;
use crate::report::{DetectionReport, PreviewImage};
use crate::session::preview::{PreviewRef, PreviewRegistry};
use crate::telemetry::LogManager;

struct CurrentResult {
    report: DetectionReport,
    preview: Option<PreviewRef>,
}

/// Owns the single "current" detection result of a session.
///
/// Replacing or clearing the result releases the preview registered for the
/// previous one, so repeated analyses never accumulate image buffers.
pub struct AnalysisSession {
    current: Option<CurrentResult>,
    previews: PreviewRegistry,
    logger: LogManager,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::with_preview_capacity(1)
    }

    fn with_preview_capacity(capacity: usize) -> Self {
        Self {
            current: None,
            previews: PreviewRegistry::with_capacity(capacity),
            logger: LogManager::new("session"),
        }
    }

    pub fn current(&self) -> Option<&DetectionReport> {
        self.current.as_ref().map(|current| &current.report)
    }

    pub fn has_result(&self) -> bool {
        self.current.is_some()
    }

    /// Preview bytes of the current result, if it carried any.
    pub fn preview(&self) -> Option<&PreviewImage> {
        let handle = self.current.as_ref()?.preview?;
        self.previews.get(handle)
    }

    pub fn live_previews(&self) -> usize {
        self.previews.live_count()
    }

    /// Installs `report` as the current result and hands back the one it displaced.
    ///
    /// On failure the previous result stays current.
    pub fn replace(&mut self, report: DetectionReport) -> ReportResult<Option<DetectionReport>> {
        let previous = self.current.take();
        let previous_image = previous
            .as_ref()
            .and_then(|current| current.preview)
            .and_then(|handle| {
                let image = self.previews.get(handle).cloned();
                self.previews.release(handle);
                image
            });

        let preview = match report.preview() {
            Some(image) => match self.previews.checkout(image.clone()) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    self.restore(previous, previous_image);
                    return Err(err);
                }
            },
            None => None,
        };

        let previous = previous.map(|current| {
            if current.preview.is_some() {
                self.logger.detail(&format!(
                    "released preview of report {}",
                    current.report.id()
                ));
            }
            current.report
        });
        self.logger.record(&format!(
            "current result is now report {} ({})",
            report.id(),
            report.file_name()
        ));
        // The slot owns the preview; the stored record keeps only the handle.
        let report = report.with_preview(None);
        self.current = Some(CurrentResult { report, preview });
        Ok(previous)
    }

    fn restore(&mut self, previous: Option<CurrentResult>, image: Option<PreviewImage>) {
        let previews = &mut self.previews;
        self.current = previous.map(|mut current| {
            current.preview = image.and_then(|image| previews.checkout(image).ok());
            current
        });
    }

    /// Empties the slot, releasing its preview.
    pub fn clear(&mut self) -> Option<DetectionReport> {
        let CurrentResult { report, preview } = self.current.take()?;
        if let Some(handle) = preview {
            self.previews.release(handle);
            self.logger
                .detail(&format!("released preview of report {}", report.id()));
        }
        Some(report)
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}
