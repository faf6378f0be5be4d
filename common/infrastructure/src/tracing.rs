use std::sync::Once;
use tracing_subscriber::{field::MakeExt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the logging subsystem.
///
/// Filtering is controlled through `RUST_LOG`, falling back to a sensible default.
pub fn init_logging(_name: &str) {
    INIT.call_once(init_log);
}

fn init_log() {
    const RUST_LOG: &str = "info,actix_web_prom=error";

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        eprintln!("RUST_LOG is unset, using default: '{RUST_LOG}'");
        EnvFilter::new(RUST_LOG)
    });

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .map_fmt_fields(|f| f.debug_alt())
                .with_ansi(true)
                .with_level(true)
                .compact(),
        )
        .try_init();

    if let Err(err) = result {
        eprintln!("Error initializing logging: {:?}", err);
    }
}
