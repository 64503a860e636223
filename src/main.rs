use anyhow::Context;
use clap::Parser;
use roadside_assist::utils::error::ErrorSeverity;
use roadside_assist::utils::{logger, validation::Validate};
use roadside_assist::{AssistConfig, AssistError, AssistanceService, CliConfig, ConsoleSession};

fn exit_on_config_error(e: &AssistError) -> ! {
    tracing::error!(
        "❌ Configuration failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting roadside-assist");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AssistConfig::from_file(path).unwrap_or_else(|e| exit_on_config_error(&e))
        }
        None => AssistConfig::default(),
    };

    if let Err(e) = config.validate() {
        exit_on_config_error(&e);
    }

    let notifier_kind = cli.notifier.unwrap_or_else(|| config.notifier_kind());
    let store = config.build_store();
    tracing::info!(
        helpers = store.helpers().len(),
        notifier = ?notifier_kind,
        "✅ Service ready"
    );

    let mut service = AssistanceService::new(store, notifier_kind.build());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    ConsoleSession::new(&mut service, stdin.lock(), stdout.lock())
        .run(config.service_name())
        .context("console session ended with an I/O error")?;

    tracing::info!(requests = service.history().len(), "Session finished");
    Ok(())
}
