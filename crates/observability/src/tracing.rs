//! Subscriber installation.
//!
//! The filter comes from `RUST_LOG`; without it, engines log state transitions
//! at `info` and rejected requests only at `debug`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// JSON logs with timestamps.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Compact logs captured per test by libtest.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .compact()
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn repeated_initialisation_is_harmless() {
        super::init_test();
        super::init_test();
        super::init();
        ::tracing::info!("observability initialised");
    }
}
