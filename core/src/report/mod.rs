pub mod file;
pub mod model;

pub use file::{
    content_type_for, format_file_size, format_label, report_file_name, FileHandle, PreviewImage,
};
pub use model::{DetectionReport, Indicator, IndicatorStatus, ReportId};
