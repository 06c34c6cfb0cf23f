pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::{content_tables::ContentTables, FacadeSettings};
pub use crate::core::facade::StaticContentSource;
pub use crate::core::hooks::{ContentHook, LoadState, SharedSource, UnitHook};
pub use crate::domain::ports::ContentSource;
pub use crate::utils::error::{CmsError, Result};
