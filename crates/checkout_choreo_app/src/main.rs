// SPDX-License-Identifier: MIT OR Apache-2.0
//! Checkout choreography host harness.
//!
//! Plays the part of the components that drive the choreography layer:
//! - A form controller revealing and shaking a validation error
//! - A presentation controller re-laying out the modal panel on rotation,
//!   keyboard and content-size changes
//!
//! Usage: `checkout_choreo [choreography.ron] [dimensions.ron]`

mod app;
mod error;
mod form_controller;
mod presentation_controller;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    // Fall back to harness defaults when RUST_LOG is unset or invalid
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,checkout_choreo_animation=debug")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting checkout choreography harness v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = app::run(args.first().map(String::as_str), args.get(1).map(String::as_str)) {
        tracing::error!("Harness failed: {e}");
        std::process::exit(1);
    }
}
