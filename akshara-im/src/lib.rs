//! akshara-im: input method core for Tamil and other Indic scripts
//!
//! This crate wires the key translators from akshara-engine into a typing
//! session: key classification, the shift/symbol mode machine, layout
//! resolution, prediction-aware commit handling and a text sink.

pub mod config;
pub mod core;

use std::sync::Once;

pub use config::Settings;
pub use core::controller::KeyboardController;
pub use core::engine::{CompositionEngine, EngineConfig, EngineEvent, EngineOutcome};
pub use core::keycode::{KeyClass, KeyCode, KeyEvent};
pub use core::session::{KeyOutcome, Session};
pub use core::sink::{DocumentBuffer, TextSink};
pub use core::state::InputState;

static INIT_LOGGING: Once = Once::new();

/// Install the stderr `tracing` subscriber once per process.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`.
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    });
}
