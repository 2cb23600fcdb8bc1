pub mod config;
pub mod layout;
pub mod palette;
pub mod pdf;
pub mod renderer;

pub use config::{LayoutConfig, PageSize};
pub use layout::{Element, Page, PageCursor, TextAlign, TextStyle};
pub use renderer::{summary_text, RenderedDocument, ReportRenderer};
