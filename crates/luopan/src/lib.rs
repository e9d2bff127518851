//! Configuration, theming and JSON output around the `compass` ring engine.

pub mod config;
pub mod document;
pub mod events;
pub mod session;
pub mod theme;

pub use config::{Config, ConfigError};
pub use document::Document;
pub use session::Session;
pub use theme::ThemeColors;
