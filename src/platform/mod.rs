//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (requestAnimationFrame on web)
//! - Input events
//! - Visibility/focus detection
//! - Logging backends

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Install the logging backend for this platform. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}

/// Install the logging backend for this platform. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}
