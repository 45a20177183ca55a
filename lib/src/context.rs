//! Application context.
//!
//! One `XrContext` is built per activity creation and handed by reference to
//! whatever needs it; nothing reaches it through a global.

use crate::config::ShimConfig;
use crate::controller::{ControllerClient, ControllerSnapshot};
use crate::error::{Result, ShimError};
use crate::version::XrApiVersion;
use std::time::Duration;
use web_time::Instant;

pub struct XrContext<A> {
    activity: A,
    config: ShimConfig,
    version: XrApiVersion,
    created_at: Instant,
    controllers: ControllerSnapshot,
}

impl<A> XrContext<A> {
    /// Builds the context for the hosting activity.
    pub fn create(activity: A, config: &ShimConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ShimError::ContextCreation(e.to_string()))?;

        let version = XrApiVersion::CURRENT;
        log::info!(
            "creating xr context for lib{}.so, xrapi {} ({})",
            config.library_name,
            version,
            version.description
        );

        Ok(Self {
            activity,
            config: config.clone(),
            version,
            created_at: Instant::now(),
            controllers: ControllerSnapshot::default(),
        })
    }

    pub fn activity(&self) -> &A {
        &self.activity
    }

    pub fn config(&self) -> &ShimConfig {
        &self.config
    }

    pub fn version(&self) -> XrApiVersion {
        self.version
    }

    pub fn uptime(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Last snapshot read by [`XrContext::poll_controllers`]
    pub fn controllers(&self) -> &ControllerSnapshot {
        &self.controllers
    }

    /// Reads the controller service through `client`, which the native
    /// library supplies together with its connection lifetime.
    pub fn poll_controllers<C: ControllerClient + ?Sized>(
        &mut self,
        client: &mut C,
    ) -> Result<&ControllerSnapshot> {
        self.controllers = ControllerSnapshot::poll(client)?;
        Ok(&self.controllers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Handedness, DATA_LEN};

    #[test]
    fn create_keeps_activity_reference() {
        let ctx = XrContext::create("main-activity", &ShimConfig::default()).unwrap();
        assert_eq!(*ctx.activity(), "main-activity");
        assert_eq!(ctx.version(), XrApiVersion::CURRENT);
        assert_eq!(ctx.config().library_name, "vrcubeworld");
        assert!(ctx.controllers().get(Handedness::Right).is_none());
    }

    #[test]
    fn create_rejects_bad_config() {
        let config = ShimConfig::default().with_library_name("");
        let err = XrContext::create((), &config).err().unwrap();
        assert!(matches!(err, ShimError::ContextCreation(_)));
    }

    struct Offline;

    impl ControllerClient for Offline {
        fn connect(&mut self) -> Result<()> {
            Err(ShimError::ControllerService("status -1".to_string()))
        }

        fn disconnect(&mut self) -> Result<()> {
            Ok(())
        }

        fn is_connected(&self) -> bool {
            false
        }

        fn read(&mut self, data: &mut [f32]) -> Result<usize> {
            Ok(data.len().min(DATA_LEN))
        }
    }

    #[test]
    fn controller_service_errors_propagate() {
        let mut ctx = XrContext::create(1u32, &ShimConfig::default()).unwrap();
        let err = ctx.poll_controllers(&mut Offline).err().unwrap();
        assert!(matches!(err, ShimError::ControllerService(_)));
    }
}
