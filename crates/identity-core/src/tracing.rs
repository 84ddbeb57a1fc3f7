use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var selecting the log output; `pretty` for humans, JSON otherwise.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Initialize stdout tracing filtered by `RUST_LOG`. Call once at startup.
///
/// Later calls are ignored.
pub fn init_tracing() {
    let pretty = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("pretty"));
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    let _ = if pretty {
        registry.with(fmt::layer().pretty()).try_init()
    } else {
        registry.with(fmt::layer().json()).try_init()
    };
}
