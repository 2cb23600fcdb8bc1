use crate::prelude::ReportResult;
use crate::render::config::{LayoutConfig, FOOTER_OFFSET, INDICATOR_BAR_DROP, SECTION_ADVANCE};
use crate::render::layout::{Page, PageCursor, TextStyle};
use crate::render::palette::{self, status_badge, verdict_color};
use crate::render::pdf;
use crate::report::{format_file_size, format_label, report_file_name, DetectionReport};
use crate::telemetry::{LogManager, MetricsRecorder};
use crate::text::{TextWrapper, POINTS_PER_MM};
use chrono::{DateTime, Local, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};

const TITLE: TextStyle = TextStyle::left(20.0, palette::HEADING);
const SECTION: TextStyle = TextStyle::left(14.0, palette::HEADING);
const BODY: TextStyle = TextStyle::left(10.0, palette::BODY);
const LABEL: TextStyle = TextStyle::left(10.0, palette::HEADING);
const VERDICT: TextStyle = TextStyle::centered(12.0, palette::WHITE);
const BADGE: TextStyle = TextStyle::centered(8.0, palette::WHITE);
const FOOTER: TextStyle = TextStyle::centered(8.0, palette::MUTED);

const VERDICT_BOX: (f64, f64) = (60.0, 10.0);
const BADGE_BOX: (f64, f64) = (20.0, 6.0);
const BADGE_OFFSET_X: f64 = 80.0;
const SCORE_OFFSET_X: f64 = 105.0;
const INDICATOR_LABEL_ADVANCE: f64 = 5.0;
const SEPARATOR_WIDTH: f64 = 0.5;
/// Baseline-to-baseline distance of wrapped summary lines, as a multiple of the font size.
const SUMMARY_LEADING: f64 = 1.15;

/// Locale-style timestamp used for upload and generation dates.
const DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// A finished report: laid-out pages plus their PDF serialization.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub file_name: String,
    pub pages: Vec<Page>,
    pub bytes: Vec<u8>,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Writes the PDF into `dir` under its download name.
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> ReportResult<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Cursor-based layout engine producing paginated PDF reports.
pub struct ReportRenderer {
    config: LayoutConfig,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl ReportRenderer {
    pub fn new(config: LayoutConfig) -> ReportResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            logger: LogManager::new("renderer"),
            metrics: MetricsRecorder::new(),
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    /// Renders `report`, stamping the footer with the current local time.
    pub fn render(&self, report: &DetectionReport) -> ReportResult<RenderedDocument> {
        self.render_at(report, Local::now())
    }

    /// Renders `report` with an explicit footer timestamp.
    ///
    /// The report is validated before any layout happens, so a malformed
    /// record never yields a partial document.
    pub fn render_at<Tz>(
        &self,
        report: &DetectionReport,
        generated_at: DateTime<Tz>,
    ) -> ReportResult<RenderedDocument>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let result = report
            .validate()
            .map(|_| self.layout(report, generated_at))
            .and_then(|pages| {
                let bytes = pdf::encode(&pages, self.config.page_size)?;
                Ok((pages, bytes))
            });

        match result {
            Ok((pages, bytes)) => {
                self.metrics.record_rendered(pages.len());
                self.logger.record(&format!(
                    "report {} rendered: {} page(s), {} bytes",
                    report.id(),
                    pages.len(),
                    bytes.len()
                ));
                Ok(RenderedDocument {
                    file_name: report_file_name(report.file_name()),
                    pages,
                    bytes,
                })
            }
            Err(err) => {
                self.metrics.record_failure();
                self.logger
                    .warn(&format!("report {} not rendered: {}", report.id(), err));
                Err(err)
            }
        }
    }

    fn layout<Tz>(
        &self,
        report: &DetectionReport,
        generated_at: DateTime<Tz>,
    ) -> Vec<Page>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let margin = self.config.margin;
        let mut cursor = PageCursor::new(margin);

        cursor.text(margin, 0.0, TITLE, "AI Photo Detection Report");
        cursor.advance(15.0);
        cursor.rule(
            margin,
            self.config.page_size.width - margin,
            SEPARATOR_WIDTH,
            palette::TRACK,
        );
        cursor.advance(15.0);

        self.file_information(&mut cursor, report);
        self.detection_result(&mut cursor, report);
        self.indicators(&mut cursor, report);
        self.summary(&mut cursor, report);

        let footer = format!(
            "Generated on {} | AI Photo Detector",
            generated_at.format(DATE_FORMAT)
        );
        cursor.place_text(
            self.config.page_size.width / 2.0,
            self.config.page_size.height - FOOTER_OFFSET,
            FOOTER,
            footer,
        );

        cursor.finish()
    }

    fn file_information(&self, cursor: &mut PageCursor, report: &DetectionReport) {
        let margin = self.config.margin;
        cursor.text(margin, 0.0, SECTION, "File Information");
        cursor.advance(10.0);

        let uploaded = report.created_at().with_timezone(&Local);
        let lines = [
            format!("File Name: {}", report.file_name()),
            format!("Upload Date: {}", uploaded.format(DATE_FORMAT)),
            format!("File Size: {}", format_file_size(report.file_size_bytes())),
            format!(
                "Format: {}",
                format_label(report.file_name()).unwrap_or_default()
            ),
        ];
        for (index, line) in lines.into_iter().enumerate() {
            if index > 0 {
                cursor.advance(7.0);
            }
            cursor.text(margin, 0.0, BODY, line);
        }
        cursor.advance(15.0);
    }

    fn detection_result(&self, cursor: &mut PageCursor, report: &DetectionReport) {
        let margin = self.config.margin;
        cursor.text(margin, 0.0, SECTION, "Detection Result");
        cursor.advance(10.0);

        let (box_width, box_height) = VERDICT_BOX;
        cursor.rect(
            margin,
            -5.0,
            box_width,
            box_height,
            verdict_color(report.is_synthetic()),
        );
        cursor.text(margin + box_width / 2.0, 2.0, VERDICT, report.verdict_label());
        cursor.advance(15.0);

        cursor.text(
            margin,
            0.0,
            BODY,
            format!("Confidence Score: {:.1}%", report.confidence_percent()),
        );
        cursor.advance(10.0);

        self.progress_bar(
            cursor,
            self.config.bar_width,
            self.config.bar_height,
            -3.0,
            report.confidence_percent(),
        );
        cursor.advance(15.0);
    }

    fn indicators(&self, cursor: &mut PageCursor, report: &DetectionReport) {
        let margin = self.config.margin;
        cursor.text(margin, 0.0, SECTION, "Detection Indicators");
        cursor.advance(10.0);

        for indicator in report.indicators() {
            if cursor.break_if_past(self.config.overflow_threshold_y) {
                self.logger.detail(&format!(
                    "indicator '{}' moved to page {}",
                    indicator.label,
                    cursor.page_index() + 1
                ));
            }

            cursor.text(margin, 0.0, LABEL, indicator.label.as_str());

            let badge = status_badge(&indicator.status);
            let (badge_width, badge_height) = BADGE_BOX;
            cursor.rect(
                margin + BADGE_OFFSET_X,
                -4.0,
                badge_width,
                badge_height,
                badge.color,
            );
            cursor.text(
                margin + BADGE_OFFSET_X + badge_width / 2.0,
                0.0,
                BADGE,
                badge.text,
            );
            cursor.text(
                margin + SCORE_OFFSET_X,
                0.0,
                BODY,
                format!("{:.1}%", indicator.score_percent),
            );
            cursor.advance(INDICATOR_LABEL_ADVANCE);

            self.progress_bar(
                cursor,
                self.config.indicator_bar_width,
                self.config.indicator_bar_height,
                INDICATOR_BAR_DROP - INDICATOR_LABEL_ADVANCE,
                indicator.score_percent,
            );
            cursor.advance(10.0);
        }
        cursor.advance(10.0);
    }

    fn summary(&self, cursor: &mut PageCursor, report: &DetectionReport) {
        let margin = self.config.margin;
        cursor.break_if_past(self.config.summary_threshold_y);

        cursor.text(margin, 0.0, SECTION, "Analysis Summary");
        cursor.advance(SECTION_ADVANCE);

        let wrapper = TextWrapper::new(self.config.usable_width(), BODY.size_pt);
        let lines = wrapper.wrap(&summary_text(report));
        let leading = BODY.size_pt * SUMMARY_LEADING / POINTS_PER_MM;
        for (index, line) in lines.iter().enumerate() {
            cursor.text(margin, index as f64 * leading, BODY, line.as_str());
        }
        cursor.advance(lines.len() as f64 * self.config.line_height + 10.0);
    }

    fn progress_bar(&self, cursor: &mut PageCursor, width: f64, height: f64, dy: f64, percent: f64) {
        let margin = self.config.margin;
        cursor.rect(margin, dy, width, height, palette::TRACK);
        cursor.rect(margin, dy, width * percent / 100.0, height, palette::ACCENT);
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self {
            config: LayoutConfig::default(),
            logger: LogManager::new("renderer"),
            metrics: MetricsRecorder::new(),
        }
    }
}

/// Natural-language paragraph closing the report.
pub fn summary_text(report: &DetectionReport) -> String {
    let verdict = if report.is_synthetic() {
        "likely AI-generated"
    } else {
        "likely a real photograph"
    };
    format!(
        "Based on advanced AI detection algorithms, this image has been analyzed across \
         multiple indicators including pixel consistency, noise patterns, edge detection, \
         and color distribution. The overall confidence score of {:.1}% indicates that \
         this image is {}.",
        report.confidence_percent(),
        verdict
    )
}
