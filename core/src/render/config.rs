use crate::prelude::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};

/// Cursor advance from a section heading to its first line.
pub(crate) const SECTION_ADVANCE: f64 = 10.0;
/// Distance from an indicator's label baseline to the top of its score bar.
pub(crate) const INDICATOR_BAR_DROP: f64 = 3.0;
/// Footer baseline, measured up from the bottom edge.
pub(crate) const FOOTER_OFFSET: f64 = 10.0;

/// Physical page dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 210.0,
        height: 297.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Layout constants for the report renderer. All values are millimetres,
/// measured from the top-left corner of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub margin: f64,
    pub page_size: PageSize,
    pub bar_width: f64,
    pub bar_height: f64,
    pub indicator_bar_width: f64,
    pub indicator_bar_height: f64,
    /// An indicator whose start position lies below this line moves to a new page.
    pub overflow_threshold_y: f64,
    /// Same check, applied once before the summary section.
    pub summary_threshold_y: f64,
    /// Cursor advance per wrapped summary line.
    pub line_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 20.0,
            page_size: PageSize::A4,
            bar_width: 100.0,
            bar_height: 6.0,
            indicator_bar_width: 80.0,
            indicator_bar_height: 4.0,
            overflow_threshold_y: 250.0,
            summary_threshold_y: 245.0,
            line_height: 7.0,
        }
    }
}

impl LayoutConfig {
    pub fn usable_width(&self) -> f64 {
        self.page_size.width - 2.0 * self.margin
    }

    pub fn validate(&self) -> ReportResult<()> {
        let dimensions = [
            ("page width", self.page_size.width),
            ("page height", self.page_size.height),
            ("bar width", self.bar_width),
            ("bar height", self.bar_height),
            ("indicator bar width", self.indicator_bar_width),
            ("indicator bar height", self.indicator_bar_height),
            ("line height", self.line_height),
        ];
        for (name, value) in dimensions {
            if !(value.is_finite() && value > 0.0) {
                return Err(ReportError::InvalidLayout(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !(self.margin.is_finite() && self.margin >= 0.0) || self.usable_width() <= 0.0 {
            return Err(ReportError::InvalidLayout(format!(
                "margin {} leaves no usable width on a {} mm page",
                self.margin, self.page_size.width
            )));
        }
        if self.bar_width > self.usable_width() || self.indicator_bar_width > self.usable_width() {
            return Err(ReportError::InvalidLayout(
                "bars are wider than the usable page width".into(),
            ));
        }

        let thresholds = [
            ("overflow threshold", self.overflow_threshold_y),
            ("summary threshold", self.summary_threshold_y),
        ];
        for (name, value) in thresholds {
            if !(value.is_finite() && value >= self.margin && value < self.page_size.height) {
                return Err(ReportError::InvalidLayout(format!(
                    "{name} {value} must lie between the top margin and the page height {}",
                    self.page_size.height
                )));
            }
        }

        // An indicator starting exactly on the threshold must still fit above the bottom margin.
        let indicator_bottom =
            self.overflow_threshold_y + INDICATOR_BAR_DROP + self.indicator_bar_height;
        if indicator_bottom > self.page_size.height - self.margin {
            return Err(ReportError::InvalidLayout(format!(
                "overflow threshold {} lets an indicator end at {indicator_bottom}, past the bottom margin at {}",
                self.overflow_threshold_y,
                self.page_size.height - self.margin
            )));
        }

        // Summary heading plus its first line must clear the footer.
        let summary_first_line = self.summary_threshold_y + SECTION_ADVANCE + self.line_height;
        if summary_first_line > self.page_size.height - FOOTER_OFFSET {
            return Err(ReportError::InvalidLayout(format!(
                "summary threshold {} pushes the first summary line to {summary_first_line}, into the footer at {}",
                self.summary_threshold_y,
                self.page_size.height - FOOTER_OFFSET
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_valid_a4() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.usable_width(), 170.0);
    }

    #[test]
    fn threshold_at_page_height_is_rejected() {
        let config = LayoutConfig {
            overflow_threshold_y: 297.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ReportError::InvalidLayout(_))
        ));
    }

    #[test]
    fn overflow_threshold_must_leave_room_for_one_indicator() {
        // 270 + 3 + 4 lands exactly on the bottom margin at 277.
        let at_limit = LayoutConfig {
            overflow_threshold_y: 270.0,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        for threshold in [271.0, 295.0] {
            let config = LayoutConfig {
                overflow_threshold_y: threshold,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ReportError::InvalidLayout(_))
            ));
        }

        let taller_bars = LayoutConfig {
            overflow_threshold_y: 270.0,
            indicator_bar_height: 5.0,
            ..Default::default()
        };
        assert!(taller_bars.validate().is_err());
    }

    #[test]
    fn summary_threshold_must_clear_the_footer() {
        // 270 + 10 + 7 reaches the footer baseline at 287.
        let at_limit = LayoutConfig {
            summary_threshold_y: 270.0,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        for threshold in [271.0, 295.0] {
            let config = LayoutConfig {
                summary_threshold_y: threshold,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ReportError::InvalidLayout(_))
            ));
        }
    }

    #[test]
    fn oversized_margin_is_rejected() {
        let config = LayoutConfig {
            margin: 110.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{"margin": 15.0}"#).unwrap();
        assert_eq!(config.margin, 15.0);
        assert_eq!(config.page_size, PageSize::A4);
        assert_eq!(config.overflow_threshold_y, 250.0);
    }
}
