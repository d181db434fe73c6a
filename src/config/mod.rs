//! Layered settings loading.

mod builder;
mod env;
mod error;
mod settings;

pub use builder::Config;
pub use error::ConfigError;
pub use settings::Settings;
