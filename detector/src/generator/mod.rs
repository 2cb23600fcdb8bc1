pub mod placeholder;

pub use placeholder::{GeneratorConfig, PlaceholderProducer};
