//! Core model and report export for the AI photo detector.
//!
//! The modules cover the detection record itself, text measurement, the
//! cursor-based page layout engine that turns a record into a paginated PDF,
//! and the session state that owns the single current result.

pub mod prelude;
pub mod render;
pub mod report;
pub mod session;
pub mod telemetry;
pub mod text;

pub use prelude::{ReportError, ReportResult, ResultProducer};
pub use render::{LayoutConfig, RenderedDocument, ReportRenderer};
pub use report::{DetectionReport, FileHandle, Indicator, IndicatorStatus};
