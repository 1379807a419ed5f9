//! Subscriber installation for `RUST_LOG`-driven diagnostics.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=braid=trace`.
/// With `tree` the events are nested under their spans instead of printed
/// flat. Safe to call more than once; only the first call has an effect.
pub fn init_tracing(tree: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }

        let (flat, nested) = if tree {
            let layer = tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_indent_lines(true);
            (None, Some(layer))
        } else {
            let layer = fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr);
            (Some(layer), None)
        };

        tracing_subscriber::registry()
            .with(flat)
            .with(nested)
            .with(EnvFilter::from_default_env())
            .init();
    });
}
