mod settings;

pub use settings::{Config, ConfigError, StoreBackend, EXAMPLE_CONFIG};
