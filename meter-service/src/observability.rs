use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// `base` plus `meter_service=info`, so the crate's own events show up even
/// when `RUST_LOG` is unset.
pub fn service_filter(base: EnvFilter) -> EnvFilter {
    base.add_directive(
        "meter_service=info"
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into()),
    )
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(service_filter(EnvFilter::from_default_env()))
        .with_target(false)
        .init();
}
