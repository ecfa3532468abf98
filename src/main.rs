use anyhow::{Context, Result};
use report_tree::config::Settings;
use report_tree::domain::config_types::LogFormat;
use report_tree::infrastructure::log_messages::{application, configuration};
use report_tree::Application;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[instrument]
fn main() -> Result<()> {
    let settings = Settings::new().context(configuration::LOADING_CONFIG)?;

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.as_str()));
    match settings.logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .init(),
    }
    info!("{}", configuration::CONFIG_LOADED);

    let app = Application::from_settings(&settings)?;
    info!(root = %app.output_root().display(), "{}", application::STARTING);
    let summary = app.run()?;

    info!("{}:\n{summary}", application::SUMMARY);
    Ok(())
}
