mod config;

pub use config::{ConfigError, PolicyKind, RingSettings};
