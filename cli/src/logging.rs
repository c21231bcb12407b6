use tracing_subscriber::EnvFilter;

pub(crate) const LOG_ENV: &str = "CHOMP_LOG";
const DEFAULT_LEVEL: &str = "warn";

/// Log to stderr so report output on stdout stays clean.
pub(crate) fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
