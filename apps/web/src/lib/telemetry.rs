//! Browser console logging through `tracing`. Events from the API client and
//! view-models are formatted by `tracing-subscriber` and written to the
//! devtools console by `tracing-web`.

use tracing_subscriber::filter::LevelFilter;

/// Maps a configured level name (or 0-4 verbosity) to a filter, defaulting to INFO.
pub fn parse_level(raw: &str) -> LevelFilter {
    let value = raw.trim();
    if value.is_empty() {
        return LevelFilter::INFO;
    }
    if let Ok(verbosity) = value.parse::<u8>() {
        return match verbosity {
            0 => LevelFilter::ERROR,
            1 => LevelFilter::WARN,
            2 => LevelFilter::INFO,
            3 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
    }

    value.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO)
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
#[cfg(target_arch = "wasm32")]
pub fn init(level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{Registry, fmt, layer::SubscriberExt};
    use tracing_web::MakeWebConsoleWriter;

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(MakeWebConsoleWriter::new());

    let subscriber = Registry::default()
        .with(fmt_layer)
        .with(parse_level(level));
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
