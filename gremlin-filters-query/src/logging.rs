//! Logging setup for gremlin-filters.
//!
//! Logging is controlled by environment variables:
//!
//! - `GREMLIN_FILTERS_DEBUG=true|1|yes` - Enable debug logging
//! - `GREMLIN_FILTERS_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `GREMLIN_FILTERS_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! A subscriber is only installed with the `tracing-subscriber` feature.
//! Without it, events go to whatever subscriber the application set up.
//!
//! ```rust,no_run
//! use gremlin_filters_query::logging;
//!
//! logging::init();
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const DEBUG_VAR: &str = "GREMLIN_FILTERS_DEBUG";
const LEVEL_VAR: &str = "GREMLIN_FILTERS_LOG_LEVEL";
const FORMAT_VAR: &str = "GREMLIN_FILTERS_LOG_FORMAT";

/// Check if debug logging is enabled via `GREMLIN_FILTERS_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var(DEBUG_VAR)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level from `GREMLIN_FILTERS_LOG_LEVEL`.
///
/// Defaults to "debug" if debug logging is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };

    match env::var(LEVEL_VAR) {
        Ok(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

/// Get the configured log format from `GREMLIN_FILTERS_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    env::var(FORMAT_VAR)
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Initialize logging. Subsequent calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var(LEVEL_VAR).is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!(
                "gremlin_filters={},gremlin_filters_query={}",
                level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            let registry = tracing_subscriber::registry().with(filter);
            let installed = match get_log_format() {
                "json" => registry.with(fmt::layer().json()).try_init(),
                "compact" => registry.with(fmt::layer().compact()).try_init(),
                _ => registry.with(fmt::layer().pretty()).try_init(),
            };

            if installed.is_ok() {
                tracing::info!(level = level, format = get_log_format(), "gremlin-filters logging initialized");
            }
        }
    });
}

/// Initialize logging with a specific level.
///
/// # Safety
///
/// This function modifies environment variables, which is unsafe in
/// multi-threaded programs. Call this early in your program before
/// spawning threads.
pub fn init_with_level(level: &str) {
    // SAFETY: This should only be called at program startup before threads are spawned.
    unsafe {
        env::set_var(LEVEL_VAR, level);
    }
    init();
}
