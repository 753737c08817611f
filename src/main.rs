//! Strokecheck: stroke risk screening form.
//!
//! Main entry point for the terminal application.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use strokecheck::adapters::load_artifacts;
use strokecheck::adapters::sanitize::SanitizingMakeWriter;
use strokecheck::application::AssessmentService;
use strokecheck::config::AppConfig;
use strokecheck::tui::App;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    // Writing logs to the terminal would corrupt the TUI (alternate screen).
    // - interactive TTY: log to a file
    // - non-interactive: log to stdout
    let interactive = std::io::stdout().is_terminal();
    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: a missing directory surfaces on open below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("Failed to open log file {:?}", config.log_file))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting strokecheck...");

    // Refuse to start without a usable model; no form is shown.
    let model_path = config.model_path();
    let columns_path = config.columns_path();
    let artifacts = load_artifacts(&model_path, &columns_path).with_context(|| {
        format!(
            "Failed to load model artifacts ({:?}, {:?}). Set STROKECHECK_MODEL_DIR to a directory containing them.",
            model_path, columns_path
        )
    })?;

    let service = AssessmentService::new(
        artifacts.classifier,
        artifacts.schema,
        config.schema_policy,
    );

    let mut app = App::new(service);
    app.run()?;

    tracing::info!("strokecheck shutdown complete.");
    Ok(())
}
