use crate::activity::ActivityBase;
use crate::error::Result;
use crate::input::KeyInput;

/// The native side of the sample. Rendering and tracking live in the engine
/// behind this; the shim only needs to hand it the lifecycle.
#[derive(Debug, Default)]
pub struct CubeWorld {
    bridged: bool,
    focused: bool,
    restored_bytes: usize,
}

impl CubeWorld {
    pub fn is_bridged(&self) -> bool {
        self.bridged
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl ActivityBase for CubeWorld {
    fn on_create(&mut self, saved_state: Option<&[u8]>) -> Result<()> {
        self.restored_bytes = saved_state.map_or(0, <[u8]>::len);
        self.bridged = true;
        log::info!(
            "native bridge ready ({} bytes of saved state)",
            self.restored_bytes
        );
        Ok(())
    }

    // Keys are never consumed here; the system default still applies.
    fn on_key_down(&mut self, _key_code: u32, _event: &KeyInput) -> bool {
        false
    }

    fn on_key_up(&mut self, _key_code: u32, _event: &KeyInput) -> bool {
        false
    }

    fn on_resume(&mut self, restored_state: Option<&[u8]>) {
        if let Some(state) = restored_state {
            self.restored_bytes = state.len();
        }
    }

    fn on_focus_changed(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn on_destroy(&mut self) {
        self.bridged = false;
        self.focused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityAdapter;
    use crate::config::ShimConfig;
    use crate::input::keycodes;

    #[test]
    fn cube_world_leaves_keys_to_the_system() {
        let mut adapter = ActivityAdapter::new(CubeWorld::default(), ShimConfig::default());
        adapter.on_create((), Some(&b"state"[..])).unwrap();
        assert!(adapter.base().is_bridged());

        let back = KeyInput::down(keycodes::BACK);
        assert!(!adapter.on_key_down(keycodes::BACK, &back));
        assert!(!adapter.on_key_up(keycodes::BACK, &KeyInput::up(keycodes::BACK)));

        adapter.on_focus_changed(true);
        assert!(adapter.base().is_focused());
        adapter.on_destroy();
        assert!(!adapter.base().is_bridged());
    }
}
