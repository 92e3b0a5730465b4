use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging to stderr.
///
/// RUST_LOG takes precedence (e.g. `RUST_LOG=skidsheet_core=debug`).
/// Without it, only warnings are shown, or debug output with `--verbose`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
