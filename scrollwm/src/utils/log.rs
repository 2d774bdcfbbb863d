use anyhow::Result;
use tracing::{metadata::LevelFilter, Subscriber};
use tracing_subscriber::{filter::ParseError, layer::SubscriberExt, registry::LookupSpan, EnvFilter};

#[cfg(feature = "file-log")]
pub mod file;

/// Level used when the configured one cannot be parsed.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the subscriber for `level_regex`. An invalid filter falls back to
/// [`DEFAULT_LOG_LEVEL`] and the parse error is handed back.
#[must_use]
pub fn parse_log_level(level_regex: &str) -> (impl Subscriber, Option<ParseError>) {
    let (filter, parse_err) = match EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse(level_regex)
    {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_LOG_LEVEL), Some(err)),
    };
    (get_subscribers(filter), parse_err)
}

#[allow(clippy::let_and_return)]
pub fn get_subscribers(filter: EnvFilter) -> impl Subscriber + for<'span> LookupSpan<'span> {
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    #[cfg(feature = "file-log")]
    let subscriber = file::add_layer(subscriber);

    subscriber
}

/// Install the global subscriber.
///
/// # Errors
///
/// Errors when a global subscriber is already set.
pub fn setup_logging(level_regex: &str) -> Result<()> {
    let (subscriber, parse_err) = parse_log_level(level_regex);
    tracing::subscriber::set_global_default(subscriber)?;
    if let Some(err) = parse_err {
        tracing::warn!(
            "Invalid log_level '{}', using '{}': {}",
            level_regex,
            DEFAULT_LOG_LEVEL,
            err
        );
    }
    Ok(())
}
