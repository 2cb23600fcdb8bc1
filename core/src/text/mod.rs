pub mod metrics;
pub mod wrap;

pub use metrics::{FontMetrics, POINTS_PER_MM};
pub use wrap::TextWrapper;
