//! Process-wide library load.
//!
//! The native activity loads `libvrcubeworld.so` once per process and keeps it
//! mapped until the process dies. Activity recreation re-enters the library
//! without loading it again, so the one-time setup that belongs to the load
//! (logger installation) lives behind a `OnceLock`.

use crate::config::ShimConfig;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use web_time::Instant;

static LOADED: OnceLock<LoadRecord> = OnceLock::new();
static LOAD_COUNT: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
pub struct LoadRecord {
    pub library_name: String,
    pub loaded_at: Instant,
}

/// Runs the library load on first use and returns the record of it.
pub fn load(config: &ShimConfig) -> &'static LoadRecord {
    LOADED.get_or_init(|| {
        LOAD_COUNT.fetch_add(1, Ordering::SeqCst);
        crate::logging::init(config);
        log::info!(
            "loaded lib{}.so (xrapi {})",
            config.library_name,
            crate::version::XrApiVersion::CURRENT
        );
        LoadRecord {
            library_name: config.library_name.clone(),
            loaded_at: Instant::now(),
        }
    })
}

pub fn is_loaded() -> bool {
    LOADED.get().is_some()
}

/// Number of times the load has actually run in this process (0 or 1).
pub fn load_count() -> usize {
    LOAD_COUNT.load(Ordering::SeqCst)
}
