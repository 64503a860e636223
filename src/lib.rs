pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::notifier::{ConsoleNotifier, RecordingNotifier, TracingNotifier};
pub use crate::app::console::ConsoleSession;
pub use crate::config::{toml_config::AssistConfig, NotifierKind};
pub use crate::core::dispatch::{AssistanceService, DispatchOutcome, ResolveOutcome};
pub use crate::core::store::DataStore;
pub use crate::utils::error::{AssistError, Result};
