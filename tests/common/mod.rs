use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs a fmt subscriber once per test binary so `RUST_LOG` controls
/// engine diagnostics during test runs.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}
