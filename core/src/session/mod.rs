pub mod preview;
pub mod selection;
pub mod state;

pub use preview::{PreviewRef, PreviewRegistry};
pub use selection::PendingSelection;
pub use state::AnalysisSession;
