mod settings;

pub use settings::{ExtractionSettings, OllamaSettings, ServerSettings, Settings, StoreSettings};
