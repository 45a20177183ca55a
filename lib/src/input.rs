//! Key input model.
//!
//! Key codes always use Android numbering so the adapter and the native side
//! see the same values on device and on the desktop host.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
}

/// A key event as delivered to the activity callbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key_code: u32,
    pub action: KeyAction,
    pub repeat_count: i32,
    pub meta_state: u32,
    pub scan_code: i32,
    pub device_id: i32,
    /// Event time in nanoseconds, host clock
    pub event_time: i64,
}

impl KeyInput {
    pub fn new(key_code: u32, action: KeyAction) -> Self {
        Self {
            key_code,
            action,
            repeat_count: 0,
            meta_state: 0,
            scan_code: 0,
            device_id: 0,
            event_time: 0,
        }
    }

    pub fn down(key_code: u32) -> Self {
        Self::new(key_code, KeyAction::Down)
    }

    pub fn up(key_code: u32) -> Self {
        Self::new(key_code, KeyAction::Up)
    }

    pub fn with_repeat_count(mut self, repeat_count: i32) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    pub fn with_device_id(mut self, device_id: i32) -> Self {
        self.device_id = device_id;
        self
    }
}

/// Android key codes the sample cares about
pub mod keycodes {
    pub const HOME: u32 = 3;
    pub const BACK: u32 = 4;
    pub const DIGIT_0: u32 = 7;
    pub const DPAD_UP: u32 = 19;
    pub const DPAD_DOWN: u32 = 20;
    pub const DPAD_LEFT: u32 = 21;
    pub const DPAD_RIGHT: u32 = 22;
    pub const DPAD_CENTER: u32 = 23;
    pub const VOLUME_UP: u32 = 24;
    pub const VOLUME_DOWN: u32 = 25;
    pub const A: u32 = 29;
    pub const TAB: u32 = 61;
    pub const SPACE: u32 = 62;
    pub const ENTER: u32 = 66;
    pub const DEL: u32 = 67;
    pub const MENU: u32 = 82;
    pub const VOLUME_MUTE: u32 = 164;
}

#[cfg(target_os = "android")]
pub use native::from_native;

#[cfg(not(target_os = "android"))]
pub use desktop::{android_keycode, from_winit};

#[cfg(target_os = "android")]
mod native {
    use super::{KeyAction, KeyInput};
    use winit::platform::android::activity::input::{KeyAction as NativeAction, KeyEvent};

    /// Converts a native key event. `Multiple` and unknown actions yield `None`.
    pub fn from_native(event: &KeyEvent) -> Option<KeyInput> {
        let action = match event.action() {
            NativeAction::Down => KeyAction::Down,
            NativeAction::Up => KeyAction::Up,
            _ => return None,
        };
        Some(KeyInput {
            key_code: u32::from(event.key_code()),
            action,
            repeat_count: event.repeat_count(),
            meta_state: event.meta_state().0,
            scan_code: event.scan_code(),
            device_id: event.device_id(),
            event_time: event.event_time(),
        })
    }
}

#[cfg(not(target_os = "android"))]
mod desktop {
    use super::{keycodes, KeyAction, KeyInput};
    use winit::event::{ElementState, KeyEvent};
    use winit::keyboard::{KeyCode, PhysicalKey};

    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA,
        KeyCode::KeyB,
        KeyCode::KeyC,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::KeyF,
        KeyCode::KeyG,
        KeyCode::KeyH,
        KeyCode::KeyI,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::KeyM,
        KeyCode::KeyN,
        KeyCode::KeyO,
        KeyCode::KeyP,
        KeyCode::KeyQ,
        KeyCode::KeyR,
        KeyCode::KeyS,
        KeyCode::KeyT,
        KeyCode::KeyU,
        KeyCode::KeyV,
        KeyCode::KeyW,
        KeyCode::KeyX,
        KeyCode::KeyY,
        KeyCode::KeyZ,
    ];

    const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0,
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];

    /// Maps a desktop key to the Android key code the headset would report.
    /// Escape stands in for the headset back button.
    pub fn android_keycode(key: PhysicalKey) -> Option<u32> {
        let PhysicalKey::Code(code) = key else {
            return None;
        };
        if let Some(i) = LETTERS.iter().position(|k| *k == code) {
            return Some(keycodes::A + i as u32);
        }
        if let Some(i) = DIGITS.iter().position(|k| *k == code) {
            return Some(keycodes::DIGIT_0 + i as u32);
        }
        Some(match code {
            KeyCode::Escape | KeyCode::BrowserBack => keycodes::BACK,
            KeyCode::BrowserHome => keycodes::HOME,
            KeyCode::ArrowUp => keycodes::DPAD_UP,
            KeyCode::ArrowDown => keycodes::DPAD_DOWN,
            KeyCode::ArrowLeft => keycodes::DPAD_LEFT,
            KeyCode::ArrowRight => keycodes::DPAD_RIGHT,
            KeyCode::NumpadEnter => keycodes::DPAD_CENTER,
            KeyCode::AudioVolumeUp => keycodes::VOLUME_UP,
            KeyCode::AudioVolumeDown => keycodes::VOLUME_DOWN,
            KeyCode::AudioVolumeMute => keycodes::VOLUME_MUTE,
            KeyCode::Tab => keycodes::TAB,
            KeyCode::Space => keycodes::SPACE,
            KeyCode::Enter => keycodes::ENTER,
            KeyCode::Backspace => keycodes::DEL,
            KeyCode::ContextMenu => keycodes::MENU,
            _ => return None,
        })
    }

    pub fn from_winit(event: &KeyEvent) -> Option<KeyInput> {
        let key_code = android_keycode(event.physical_key)?;
        let action = match event.state {
            ElementState::Pressed => KeyAction::Down,
            ElementState::Released => KeyAction::Up,
        };
        Some(KeyInput::new(key_code, action).with_repeat_count(i32::from(event.repeat)))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn maps_desktop_keys_to_android_codes() {
            assert_eq!(android_keycode(PhysicalKey::Code(KeyCode::KeyA)), Some(29));
            assert_eq!(android_keycode(PhysicalKey::Code(KeyCode::KeyZ)), Some(54));
            assert_eq!(android_keycode(PhysicalKey::Code(KeyCode::Digit9)), Some(16));
            assert_eq!(
                android_keycode(PhysicalKey::Code(KeyCode::Escape)),
                Some(keycodes::BACK)
            );
            assert_eq!(
                android_keycode(PhysicalKey::Code(KeyCode::ArrowLeft)),
                Some(keycodes::DPAD_LEFT)
            );
            assert_eq!(android_keycode(PhysicalKey::Code(KeyCode::F13)), None);
        }
    }
}
