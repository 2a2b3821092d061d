use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the test log subscriber.
///
/// `RUST_LOG` narrows the output. Everything down to debug level is printed otherwise.
pub fn setup_test_environment() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(tracing_core::LevelFilter::DEBUG.into())
                    .from_env_lossy(),
            )
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_test_writer()
            .init();
    });
}
