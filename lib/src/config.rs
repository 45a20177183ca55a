//! Shim configuration

use crate::error::{Result, ShimError};
use log::LevelFilter;

/// Name of the shared object the native activity loads (`libvrcubeworld.so`)
pub const LIBRARY_NAME: &str = "vrcubeworld";

/// Log tag used for the sample on device
pub const LOG_TAG: &str = "cubeworld";

#[derive(Debug, Clone, PartialEq)]
pub struct ShimConfig {
    pub library_name: String,
    pub log_tag: String,
    pub max_log_level: LevelFilter,
    /// Desktop window title, ignored on device
    pub window_title: String,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            library_name: LIBRARY_NAME.to_string(),
            log_tag: LOG_TAG.to_string(),
            max_log_level: LevelFilter::Debug,
            window_title: "Cube World".to_string(),
        }
    }
}

impl ShimConfig {
    pub fn with_library_name(mut self, name: impl Into<String>) -> Self {
        self.library_name = name.into();
        self
    }

    pub fn with_log_tag(mut self, tag: impl Into<String>) -> Self {
        self.log_tag = tag.into();
        self
    }

    pub fn with_max_log_level(mut self, level: LevelFilter) -> Self {
        self.max_log_level = level;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.library_name.trim().is_empty() {
            return Err(ShimError::Config("library name is empty".to_string()));
        }
        if self.log_tag.trim().is_empty() {
            return Err(ShimError::Config("log tag is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ShimConfig::default();
        assert_eq!(config.library_name, "vrcubeworld");
        assert_eq!(config.log_tag, "cubeworld");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_names_are_rejected() {
        let config = ShimConfig::default().with_library_name("  ");
        assert!(matches!(config.validate(), Err(ShimError::Config(_))));

        let config = ShimConfig::default().with_log_tag("");
        assert!(matches!(config.validate(), Err(ShimError::Config(_))));
    }
}
