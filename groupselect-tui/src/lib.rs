//! Terminal host for the `groupselect` dropdown.

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod paths;
pub mod terminal;

pub use app::{App, Control};
pub use config::Config;
pub use error::{AppError, ConfigError};
