pub mod settings;

pub use settings::{DisplaySettings, Settings, DEFAULT_MAX_LENGTH, ENV_PREFIX};
