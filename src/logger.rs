use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initializes the global subscriber.
///
/// Filter precedence: `CHRONOMAP_LOG`, then `RUST_LOG`, then a crate-scoped
/// default keyed on `verbose`. An unparseable directive falls back to the
/// default rather than failing initialization.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "chronomap=debug"
    } else {
        "chronomap=info"
    };
    let filter = std::env::var("CHRONOMAP_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(false);
        init_logging(true);
    }
}
