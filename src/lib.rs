#![doc(test(attr(deny(warnings))))]

//! Billion Tracker keeps a running net-worth total toward a fixed goal,
//! persists it between sessions, and derives progress and milestone views
//! for the terminal front end.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Billion Tracker tracing initialized.");
    });
}
