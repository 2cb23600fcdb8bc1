use crate::report::IndicatorStatus;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to the 0..1 range PDF color operators expect.
    pub fn components(&self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

pub const HEADING: Rgb = Rgb(31, 41, 55);
pub const BODY: Rgb = Rgb(75, 85, 99);
pub const TRACK: Rgb = Rgb(229, 231, 235);
pub const ACCENT: Rgb = Rgb(59, 130, 246);
pub const PASS: Rgb = Rgb(22, 163, 74);
pub const WARNING: Rgb = Rgb(234, 179, 8);
pub const FAIL: Rgb = Rgb(220, 38, 38);
pub const MUTED: Rgb = Rgb(156, 163, 175);
pub const WHITE: Rgb = Rgb(255, 255, 255);

/// Color and caption of an indicator status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub color: Rgb,
    pub text: &'static str,
}

pub fn status_badge(status: &IndicatorStatus) -> Badge {
    match status {
        IndicatorStatus::Pass => Badge {
            color: PASS,
            text: "PASS",
        },
        IndicatorStatus::Warning => Badge {
            color: WARNING,
            text: "WARNING",
        },
        IndicatorStatus::Fail => Badge {
            color: FAIL,
            text: "FAIL",
        },
        IndicatorStatus::Unrecognized(_) => Badge {
            color: MUTED,
            text: "N/A",
        },
    }
}

pub fn verdict_color(is_synthetic: bool) -> Rgb {
    if is_synthetic {
        FAIL
    } else {
        PASS
    }
}
