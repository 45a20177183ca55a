//! Cube World activity shim.
//!
//! `libvrcubeworld.so` is loaded by the Android native activity. The shim
//! builds the application context, forwards the lifecycle to the native side
//! and passes key events through untouched.

#[cfg(not(target_os = "android"))]
use winit::event_loop::EventLoop;
#[cfg(target_os = "android")]
use winit::platform::android::activity::AndroidApp;

pub mod activity;
pub mod app;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod framework;
pub mod input;
pub mod lifecycle;
pub mod loader;
mod logging;
pub mod version;

pub use activity::{ActivityAdapter, ActivityBase};
pub use config::ShimConfig;
pub use context::XrContext;
pub use error::{Result, ShimError};
pub use input::{KeyAction, KeyInput};
pub use lifecycle::{LifecycleDispatcher, LifecycleEvent, Phase};

#[allow(dead_code)]
#[cfg(target_os = "android")]
#[no_mangle]
fn android_main(app: AndroidApp) {
    std::env::set_var("RUST_BACKTRACE", "1");
    let config = ShimConfig::default();
    loader::load(&config);
    if let Err(e) = framework::run(app, config) {
        log::error!("activity failed: {:#}", e);
    }
}

/// Desktop entry point: a winit window plays the part of the activity.
#[cfg(not(target_os = "android"))]
pub fn desktop_main() -> anyhow::Result<()> {
    std::env::set_var("RUST_BACKTRACE", "1");
    let config = ShimConfig::default();
    loader::load(&config);
    let event_loop = EventLoop::new().map_err(|e| ShimError::EventLoop(e.to_string()))?;
    framework::run(event_loop, config)
}
