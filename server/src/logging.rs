use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins when set; otherwise `debug` with `--debug` and `info`
/// without.
pub fn init(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
