use tracing_subscriber::EnvFilter;

use crate::config;

/// Load settings and start logging. Config problems are logged and the
/// defaults are used instead.
pub fn load_settings() -> config::Settings {
    let loaded = config::Settings::load();

    let filter = loaded
        .as_ref()
        .map(|s| s.logging.filter.clone())
        .unwrap_or_else(|_| config::LoggingSettings::default().filter);
    init_logging(&filter);

    match loaded {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                tracing::warn!("invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            tracing::warn!("failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// `RUST_LOG` wins over the configured filter. Output goes to stderr so it
/// does not interleave with the command prompt.
fn init_logging(filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
