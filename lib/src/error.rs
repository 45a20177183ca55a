//! Error types for the activity shim

use thiserror::Error;

/// Errors raised while bringing the activity up or talking to the VR services
#[derive(Error, Debug)]
pub enum ShimError {
    /// Invalid shim configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The application context could not be constructed
    #[error("Application context creation failed: {0}")]
    ContextCreation(String),

    /// The base (native) implementation failed a lifecycle callback
    #[error("Native base failed during {callback}: {reason}")]
    Base {
        callback: &'static str,
        reason: String,
    },

    /// Controller buffer did not match the service layout
    #[error("Malformed controller data: {0}")]
    ControllerData(String),

    /// Controller service call returned a non-zero status
    #[error("Controller service error: {0}")]
    ControllerService(String),

    /// Host event loop could not be created or failed while running
    #[error("Event loop error: {0}")]
    EventLoop(String),
}

/// Result type for shim operations
pub type Result<T> = std::result::Result<T, ShimError>;
