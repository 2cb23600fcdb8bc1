use chrono::Utc;
use detectcore::prelude::ResultProducer;
use detectcore::report::{DetectionReport, FileHandle, Indicator, IndicatorStatus};
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;

/// Configuration for the placeholder result producer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fixed RNG seed for reproducible results; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Simulated analysis latency.
    pub delay_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            delay_ms: 2000,
        }
    }
}

impl GeneratorConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusRule {
    AlwaysPass,
    PassOrWarning,
    PassOrFail,
}

impl StatusRule {
    fn draw<R: Rng>(&self, rng: &mut R) -> IndicatorStatus {
        match self {
            StatusRule::AlwaysPass => IndicatorStatus::Pass,
            StatusRule::PassOrWarning if rng.gen_bool(0.5) => IndicatorStatus::Pass,
            StatusRule::PassOrWarning => IndicatorStatus::Warning,
            StatusRule::PassOrFail if rng.gen_bool(0.5) => IndicatorStatus::Pass,
            StatusRule::PassOrFail => IndicatorStatus::Fail,
        }
    }
}

const INDICATORS: [(&str, StatusRule); 5] = [
    ("Pixel Consistency", StatusRule::PassOrWarning),
    ("Noise Patterns", StatusRule::PassOrFail),
    ("Edge Detection", StatusRule::AlwaysPass),
    ("Color Distribution", StatusRule::PassOrWarning),
    ("Frequency Analysis", StatusRule::AlwaysPass),
];

/// Stand-in scorer: random verdicts shaped like a real detector's output.
/// File contents are never inspected.
pub struct PlaceholderProducer {
    rng: Mutex<StdRng>,
}

impl PlaceholderProducer {
    pub fn new(config: &GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl ResultProducer for PlaceholderProducer {
    fn produce(&self, file: &FileHandle) -> DetectionReport {
        let mut guard = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let rng = &mut *guard;

        let is_synthetic = rng.gen_bool(0.5);
        let confidence: f64 = rng.gen_range(60.0..=100.0);
        let indicators = INDICATORS
            .iter()
            .map(|(label, rule)| {
                let score: f64 = rng.gen_range(0.0..=100.0);
                Indicator::new(*label, score, rule.draw(&mut *rng))
            })
            .collect();

        debug!(
            "placeholder verdict for {}: synthetic={} confidence={:.1}",
            file.name, is_synthetic, confidence
        );

        DetectionReport::new(
            file.name.clone(),
            file.size_bytes,
            Utc::now(),
            is_synthetic,
            confidence,
            indicators,
        )
        .with_preview(file.bytes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> PlaceholderProducer {
        PlaceholderProducer::new(&GeneratorConfig {
            seed: Some(seed),
            delay_ms: 0,
        })
    }

    #[test]
    fn produces_five_fixed_indicators_within_range() {
        let producer = seeded(7);
        let file = FileHandle::new("beach.png", 2048, "image/png");

        for _ in 0..50 {
            let report = producer.produce(&file);
            assert!(report.validate().is_ok());
            assert!((60.0..=100.0).contains(&report.confidence_percent()));
            let labels: Vec<&str> = report.indicators().iter().map(|i| i.label.as_str()).collect();
            assert_eq!(
                labels,
                vec![
                    "Pixel Consistency",
                    "Noise Patterns",
                    "Edge Detection",
                    "Color Distribution",
                    "Frequency Analysis"
                ]
            );
            assert_eq!(report.indicators()[2].status, IndicatorStatus::Pass);
            assert_eq!(report.indicators()[4].status, IndicatorStatus::Pass);
            assert_ne!(report.indicators()[0].status, IndicatorStatus::Fail);
            assert_ne!(report.indicators()[1].status, IndicatorStatus::Warning);
            assert_eq!(report.file_name(), "beach.png");
            assert_eq!(report.file_size_bytes(), 2048);
        }
    }

    #[test]
    fn same_seed_gives_same_scores() {
        let file = FileHandle::new("a.jpg", 1, "image/jpeg");
        let first = seeded(42).produce(&file);
        let second = seeded(42).produce(&file);
        assert_eq!(first.is_synthetic(), second.is_synthetic());
        assert_eq!(first.confidence_percent(), second.confidence_percent());
        assert_eq!(first.indicators(), second.indicators());
        assert!(second.id() > first.id());
    }

    #[test]
    fn preview_bytes_are_shared_not_copied() {
        let file = FileHandle::new("a.png", 0, "image/png").with_bytes(vec![1, 2, 3, 4]);
        let report = seeded(1).produce(&file);
        let preview = report.preview().unwrap();
        assert!(preview.ptr_eq(file.bytes.as_ref().unwrap()));
    }
}
