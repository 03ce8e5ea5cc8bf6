use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::AppError;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `log_level`. JSON lines when `ENVIRONMENT=production`,
/// readable console output otherwise.
pub fn init_logging(log_level: &str, production: bool) -> Result<(), AppError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let result = if production {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_filter(env_filter))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(env_filter),
            )
            .try_init()
    };

    result.map_err(|e| AppError::ConfigError(format!("Failed to initialise logging: {}", e)))
}

pub fn is_production() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|env| env == "production")
        .unwrap_or(false)
}
