//! Opt-in tracing for the `stencil` binary.
//!
//! Library code only emits events. Nothing is printed unless `RUST_LOG` is
//! set, e.g. `RUST_LOG=stencilc=debug,stencil_eval=trace`. With
//! `STENCIL_TRACE_TREE` set, events are indented by span nesting.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Later calls do nothing.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let registry = tracing_subscriber::registry().with(filter);
        if std::env::var_os("STENCIL_TRACE_TREE").is_some() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
