pub mod toml_config;

use crate::adapters::notifier::{ConsoleNotifier, TracingNotifier};
use crate::domain::ports::Notifier;
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

/// Where service notifications go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    /// `[NOTIFICATION] ...` lines on stdout
    #[default]
    Console,
    /// tracing events at info level
    Log,
}

impl NotifierKind {
    pub fn build(self) -> Box<dyn Notifier> {
        match self {
            NotifierKind::Console => Box::new(ConsoleNotifier),
            NotifierKind::Log => Box::new(TracingNotifier),
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "roadside-assist")]
#[command(about = "Console dispatcher for roadside assistance requests")]
pub struct CliConfig {
    /// Path to a TOML file with the service settings and helper roster
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the notifier from the config file
    #[arg(long, value_enum)]
    pub notifier: Option<NotifierKind>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}
