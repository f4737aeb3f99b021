pub mod config;
pub mod core;
pub mod planner;
pub mod storage;

use std::sync::atomic::{AtomicBool, Ordering};

pub use crate::core::id::ItemId;
pub use crate::core::key::{DayKey, MonthKey};
pub use planner::Planner;

/// Whether debug logging is active, shared between the logger filter and the config flag.
static DEBUG_LOGGING: AtomicBool = AtomicBool::new(false);

pub fn set_debug_logging(enabled: bool) {
    DEBUG_LOGGING.store(enabled, Ordering::Relaxed);
}

pub fn debug_logging() -> bool {
    DEBUG_LOGGING.load(Ordering::Relaxed)
}
