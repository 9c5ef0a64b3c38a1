//! Logging bootstrap for applications using polyseq.
//!
//! The crate emits `tracing` events for storage changes (grow, shrink,
//! release at `trace`, failed shrinks at `warn`, allocation failures at
//! `error`). This module installs a stderr subscriber for them and forwards
//! `log` crate records to the same place.
//!
//! ```
//! polyseq::logger::init_logging();
//!
//! let mut a = polyseq::Array::of::<i64>();
//! a.push(&1i64)?;
//! polyseq::logger::info!(len = a.len(), "array ready");
//! # Ok::<(), polyseq::Error>(())
//! ```

use std::sync::OnceLock;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber.
///
/// `RUST_LOG` selects the filter, `info` when unset; use
/// `RUST_LOG=polyseq=trace` to follow capacity changes. Calling this more than
/// once, or after another subscriber was installed, does nothing.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        tracing_log::LogTracer::init().ok();

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .ok();
    });
}

/// Re-export tracing macros for convenience.
pub use tracing::{debug, error, info, trace, warn};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Array;

    #[test]
    fn test_init_logging() {
        init_logging();
        // idempotent
        init_logging();
    }

    #[test]
    fn test_storage_events() {
        init_logging();

        let mut a = Array::of::<i64>();
        for i in 0..8i64 {
            a.push(&i).unwrap();
        }
        while !a.is_empty() {
            a.pop().unwrap();
        }
        trace!(capacity = a.capacity(), "drained");
        assert_eq!(a.capacity(), 0);
    }

    #[test]
    fn test_log_crate_forwarding() {
        init_logging();

        log::info!("log crate info");
        log::warn!("log crate warn");
    }
}
