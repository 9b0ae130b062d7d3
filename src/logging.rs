//! Simple tracing subscriber setup used by the application.

use std::env;

use tracing_subscriber::{EnvFilter, fmt};

/// Logs go to stderr so command output stays clean on stdout.
/// `LOG_FORMAT=json` switches to one JSON object per line.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    let json = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(true).init();
    }

    tracing::debug!("logger initialized");
}
