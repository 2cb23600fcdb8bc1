use crate::prelude::{ReportError, ReportResult};
use crate::report::file::PreviewImage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static LAST_REPORT_ID: AtomicU64 = AtomicU64::new(0);

/// Time-based identifier, strictly increasing within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(u64);

impl ReportId {
    pub fn next() -> Self {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut last = LAST_REPORT_ID.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match LAST_REPORT_ID.compare_exchange_weak(
                last,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Self(candidate),
                Err(current) => last = current,
            }
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a single indicator sub-test.
///
/// Anything other than exactly `pass`, `warning`, or `fail` read from a saved
/// report lands in `Unrecognized` and is rendered with a neutral badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IndicatorStatus {
    Pass,
    Warning,
    Fail,
    Unrecognized(String),
}

impl IndicatorStatus {
    pub fn as_str(&self) -> &str {
        match self {
            IndicatorStatus::Pass => "pass",
            IndicatorStatus::Warning => "warning",
            IndicatorStatus::Fail => "fail",
            IndicatorStatus::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for IndicatorStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pass" => IndicatorStatus::Pass,
            "warning" => IndicatorStatus::Warning,
            "fail" => IndicatorStatus::Fail,
            _ => IndicatorStatus::Unrecognized(raw),
        }
    }
}

impl From<IndicatorStatus> for String {
    fn from(status: IndicatorStatus) -> Self {
        match status {
            IndicatorStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// One named sub-test of a detection report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub label: String,
    pub score_percent: f64,
    pub status: IndicatorStatus,
}

impl Indicator {
    pub fn new(label: impl Into<String>, score_percent: f64, status: IndicatorStatus) -> Self {
        Self {
            label: label.into(),
            score_percent,
            status,
        }
    }
}

/// Full result record for one analyzed file. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    id: ReportId,
    file_name: String,
    file_size_bytes: u64,
    created_at: DateTime<Utc>,
    is_synthetic: bool,
    confidence_percent: f64,
    indicators: Vec<Indicator>,
    #[serde(skip)]
    preview: Option<PreviewImage>,
}

impl DetectionReport {
    pub fn new(
        file_name: impl Into<String>,
        file_size_bytes: u64,
        created_at: DateTime<Utc>,
        is_synthetic: bool,
        confidence_percent: f64,
        indicators: Vec<Indicator>,
    ) -> Self {
        Self {
            id: ReportId::next(),
            file_name: file_name.into(),
            file_size_bytes,
            created_at,
            is_synthetic,
            confidence_percent,
            indicators,
            preview: None,
        }
    }

    pub fn with_preview(mut self, preview: Option<PreviewImage>) -> Self {
        self.preview = preview;
        self
    }

    pub fn id(&self) -> ReportId {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_size_bytes(&self) -> u64 {
        self.file_size_bytes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_synthetic(&self) -> bool {
        self.is_synthetic
    }

    pub fn confidence_percent(&self) -> f64 {
        self.confidence_percent
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn preview(&self) -> Option<&PreviewImage> {
        self.preview.as_ref()
    }

    pub fn verdict_label(&self) -> &'static str {
        if self.is_synthetic {
            "AI Generated"
        } else {
            "Real Photo"
        }
    }

    /// Checks the numeric invariants the renderer relies on.
    pub fn validate(&self) -> ReportResult<()> {
        check_percent("confidence", self.confidence_percent)?;
        if self.indicators.is_empty() {
            return Err(ReportError::MalformedReport(
                "report has no indicators".into(),
            ));
        }
        for indicator in &self.indicators {
            check_percent(&indicator.label, indicator.score_percent)?;
        }
        Ok(())
    }

    pub fn from_json(contents: &str) -> ReportResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_percent(field: &str, value: f64) -> ReportResult<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ReportError::MalformedReport(format!(
            "{field} must be within [0, 100], got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(confidence: f64, indicators: Vec<Indicator>) -> DetectionReport {
        DetectionReport::new("beach.png", 2_621_440, Utc::now(), false, confidence, indicators)
    }

    #[test]
    fn report_ids_strictly_increase() {
        let first = ReportId::next();
        let second = ReportId::next();
        assert!(second > first);
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        let indicators = vec![Indicator::new("Edge Detection", 50.0, IndicatorStatus::Pass)];
        assert!(sample(87.3, indicators.clone()).validate().is_ok());
        assert!(matches!(
            sample(100.5, indicators.clone()).validate(),
            Err(ReportError::MalformedReport(_))
        ));
        assert!(sample(f64::NAN, indicators).validate().is_err());

        let bad_score = vec![Indicator::new("Noise Patterns", -1.0, IndicatorStatus::Fail)];
        assert!(sample(70.0, bad_score).validate().is_err());
    }

    #[test]
    fn validation_rejects_empty_indicator_list() {
        assert!(matches!(
            sample(70.0, Vec::new()).validate(),
            Err(ReportError::MalformedReport(_))
        ));
    }

    #[test]
    fn unknown_status_survives_json_and_validation() {
        let json = r#"{
            "id": 7,
            "file_name": "photo.JPG",
            "file_size_bytes": 1048576,
            "created_at": "2024-05-01T12:00:00Z",
            "is_synthetic": true,
            "confidence_percent": 91.0,
            "indicators": [
                {"label": "Pixel Consistency", "score_percent": 40.0, "status": "pass"},
                {"label": "Noise Patterns", "score_percent": 60.0, "status": "inconclusive"}
            ]
        }"#;
        let report = DetectionReport::from_json(json).unwrap();
        assert_eq!(report.indicators()[0].status, IndicatorStatus::Pass);
        assert_eq!(
            report.indicators()[1].status,
            IndicatorStatus::Unrecognized("inconclusive".into())
        );
        assert!(report.validate().is_ok());
        assert!(report.preview().is_none());

        let round = report.to_json().unwrap();
        assert!(round.contains("\"inconclusive\""));
    }

    #[test]
    fn status_spelling_is_matched_exactly() {
        assert_eq!(IndicatorStatus::from("warning".to_string()), IndicatorStatus::Warning);
        for raw in ["PASS", "Fail", "Warning "] {
            let status = IndicatorStatus::from(raw.to_string());
            assert_eq!(status, IndicatorStatus::Unrecognized(raw.into()));
            assert_eq!(String::from(status), raw);
        }
    }
}
