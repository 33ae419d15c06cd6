//! Core infrastructure: errors, constants, shared types and logging setup.

pub mod constants;
pub mod error;
pub mod types;

use std::sync::Once;

static LOGGING_INIT: Once = Once::new();

/// Initialize the logging subsystem.
///
/// Uses `RUST_LOG` when set and falls back to `info`. Safe to call more than
/// once; an already-installed global logger is left untouched.
pub fn initialize_logging() {
    LOGGING_INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or("info");
        if env_logger::Builder::from_env(env).try_init().is_ok() {
            log::debug!(
                "greedy-binning {} logging initialized",
                constants::GREEDY_BINNING_VERSION
            );
        }
    });
}
