use std::sync::OnceLock;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use xdg::BaseDirectories;

const LOG_FILE_NAME: &str = "scrollwm.log";

/// Keeps the writer thread alive, dropping it would lose buffered lines.
static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Add a layer writing to `$XDG_CACHE_HOME/scrollwm/scrollwm.log`. Without a
/// cache directory the subscriber is returned without it.
pub fn add_layer<S>(subscriber: S) -> impl Subscriber + for<'span> LookupSpan<'span>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync,
{
    let writer = BaseDirectories::with_prefix("scrollwm")
        .ok()
        .and_then(|dirs| dirs.create_cache_directory("").ok())
        .map(|dir| {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            // A second subscriber keeps writing through the first guard.
            let _ = GUARD.set(guard);
            writer
        });
    if writer.is_none() {
        eprintln!("Could not create the scrollwm cache directory, logging to stderr only");
    }
    let layer = writer.map(|w| tracing_subscriber::fmt::layer().with_ansi(false).with_writer(w));
    subscriber.with(layer)
}
