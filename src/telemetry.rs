//! Opt-in tracing setup for hosts embedding the navigation core.
//!
//! Nothing here runs implicitly. Hosts that already own a `tracing`
//! subscriber should skip this module and rely on the spans and events the
//! crate emits.

/// Installs a compact subscriber filtered by `RUST_LOG`, falling back to
/// `info` when the variable is unset or unparsable.
///
/// Returns `false` when the `telemetry` feature is off or another global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

/// Like [`init_default_tracing`], but with an explicit fallback filter
/// directive, e.g. `"organizer_rs=debug"`.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
