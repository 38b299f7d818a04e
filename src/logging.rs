// Diagnostics for grid state transitions.
//
// The library only emits `tracing` events. Binaries call [`init`] to print
// them, filtered by `RUST_LOG`:
// - `RUST_LOG=debug` - every focus, edit and selection transition
// - `RUST_LOG=grid_cell_editor::grid=info` - commits only

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install a console subscriber. A second call keeps the first subscriber.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    if let Err(e) = tracing_subscriber::registry().with(console_layer).try_init() {
        eprintln!("Warning: Could not initialize logging: {}", e);
    }
}
