use std::backtrace::Backtrace;

use tracing_subscriber::{EnvFilter, fmt};

// Baseline directives when neither RUST_LOG nor the config level parses.
// sea_orm's query logging is too chatty below warn for a CMS workload.
const FALLBACK_DIRECTIVES: &str = "info,korsvagen_server=debug,sea_orm=warn";

/// Installs the global subscriber and the panic hook. `log_level` comes from
/// configuration and is overridden by `RUST_LOG` when that is set.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVES));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    std::panic::set_hook(Box::new(|info| {
        let message = match info.payload().downcast_ref::<&str>() {
            Some(message) => message,
            None => info
                .payload()
                .downcast_ref::<String>()
                .map(String::as_str)
                .unwrap_or("unknown panic"),
        };
        let location = info
            .location()
            .map(|location| location.to_string())
            .unwrap_or_else(|| "unknown location".to_string());
        tracing::error!(
            panic = %message,
            %location,
            backtrace = %Backtrace::capture(),
            "panic"
        );
    }));
}
