//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn, LevelFilter};

/// Initialize the logging system
///
/// `RUST_LOG` wins when it is set; otherwise `default_level` applies to every
/// module. Calling this twice is harmless: the second logger is discarded.
pub fn init(default_level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if builder.try_init().is_err() {
        debug!("Logger already initialized, keeping the existing one");
    }
}

/// Parse a textual log level ("info", "debug", ...) falling back to `Info`
pub fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or_else(|_| {
        warn!("Unknown log level '{level}', using info");
        LevelFilter::Info
    })
}
