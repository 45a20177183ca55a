//! Logger setup for device and desktop builds

use crate::config::ShimConfig;

/// Installs the platform logger. Safe to call more than once; later calls are ignored.
pub fn init(config: &ShimConfig) {
    cfg_if::cfg_if! {
        if #[cfg(target_os = "android")] {
            android_logger::init_once(
                android_logger::Config::default()
                    .with_max_level(config.max_log_level)
                    .with_tag(config.log_tag.as_str()),
            );
        } else if #[cfg(test)] {
            // unit tests capture records through testing_logger instead
            let _ = config;
        } else {
            // an embedding binary may already own the logger
            let _ = env_logger::builder()
                .filter_level(config.max_log_level)
                .parse_default_env()
                .try_init();
        }
    }
}
