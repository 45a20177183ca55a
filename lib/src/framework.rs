//! Host loops.
//!
//! On device the native-activity glue runs `android_main` on its own thread
//! and hands us lifecycle commands and input through `AndroidApp`. On desktop a
//! winit window stands in for the activity so the same adapter can be driven
//! during development.

use crate::activity::{ActivityAdapter, ActivityBase};
use crate::app::CubeWorld;
use crate::config::ShimConfig;
use crate::input::{keycodes, KeyAction, KeyInput};

/// Routes a key event to the matching adapter callback and returns the
/// base implementation's answer.
fn forward_key<A, B: ActivityBase>(
    adapter: &mut ActivityAdapter<A, B>,
    input: &KeyInput,
) -> bool {
    match input.action {
        KeyAction::Down => adapter.on_key_down(input.key_code, input),
        KeyAction::Up => adapter.on_key_up(input.key_code, input),
    }
}

/// System default for an unconsumed back release: finish the activity.
#[cfg_attr(target_os = "android", allow(dead_code))]
fn finishes_activity(input: &KeyInput, consumed: bool) -> bool {
    !consumed && input.action == KeyAction::Up && input.key_code == keycodes::BACK
}

#[cfg(target_os = "android")]
pub use self::android::run;

#[cfg(not(target_os = "android"))]
pub use self::desktop::run;

#[cfg(target_os = "android")]
mod android {
    use super::*;
    use winit::platform::android::activity::input::InputEvent;
    use winit::platform::android::activity::{AndroidApp, InputStatus, MainEvent, PollEvent};

    type Adapter = ActivityAdapter<AndroidApp, CubeWorld>;

    pub fn run(app: AndroidApp, config: ShimConfig) -> anyhow::Result<()> {
        let mut adapter = Adapter::new(CubeWorld::default(), config);
        // native activity restores saved state on resume, not here
        adapter.on_create(app.clone(), None)?;

        let mut destroyed = false;
        while !destroyed {
            app.poll_events(None, |event| {
                if let PollEvent::Main(main_event) = event {
                    match main_event {
                        MainEvent::Start => adapter.on_start(),
                        MainEvent::Resume { loader, .. } => {
                            let restored = loader.load();
                            adapter.on_resume(restored.as_deref());
                        }
                        MainEvent::InitWindow { .. } => adapter.on_window_created(),
                        MainEvent::TerminateWindow { .. } => adapter.on_window_destroyed(),
                        MainEvent::GainedFocus => adapter.on_focus_changed(true),
                        MainEvent::LostFocus => adapter.on_focus_changed(false),
                        MainEvent::LowMemory => adapter.on_low_memory(),
                        MainEvent::SaveState { saver, .. } => {
                            if let Some(state) = adapter.on_save_state() {
                                saver.store(&state);
                            }
                        }
                        MainEvent::Pause => adapter.on_pause(),
                        MainEvent::Stop => adapter.on_stop(),
                        MainEvent::Destroy => {
                            adapter.on_destroy();
                            destroyed = true;
                        }
                        _ => {}
                    }
                }
            });

            if !destroyed {
                drain_input(&app, &mut adapter);
            }
        }

        log::info!("android_main exiting");
        Ok(())
    }

    fn drain_input(app: &AndroidApp, adapter: &mut Adapter) {
        let mut iter = match app.input_events_iter() {
            Ok(iter) => iter,
            Err(err) => {
                log::error!("failed to read input events: {:?}", err);
                return;
            }
        };

        loop {
            let read = iter.next(|event| {
                let InputEvent::KeyEvent(key) = event else {
                    return InputStatus::Unhandled;
                };
                let Some(input) = crate::input::from_native(key) else {
                    return InputStatus::Unhandled;
                };
                if forward_key(adapter, &input) {
                    InputStatus::Handled
                } else {
                    InputStatus::Unhandled
                }
            });
            if !read {
                break;
            }
        }
    }
}

#[cfg(not(target_os = "android"))]
mod desktop {
    use super::*;
    use crate::error::ShimError;
    use winit::event::{Event, WindowEvent};
    use winit::event_loop::{ControlFlow, EventLoop};
    use winit::window::{Window, WindowBuilder, WindowId};

    type Adapter = ActivityAdapter<WindowId, CubeWorld>;

    pub fn run(event_loop: EventLoop<()>, config: ShimConfig) -> anyhow::Result<()> {
        let title = config.window_title.clone();
        let mut adapter = Adapter::new(CubeWorld::default(), config);
        let mut window: Option<Window> = None;
        let mut failure: Option<anyhow::Error> = None;

        event_loop
            .run(|event, elwt| {
                elwt.set_control_flow(ControlFlow::Wait);
                match event {
                    Event::Resumed => {
                        if window.is_some() {
                            adapter.on_resume(None);
                            return;
                        }
                        let created = WindowBuilder::new()
                            .with_title(title.as_str())
                            .build(elwt)
                            .map_err(anyhow::Error::from)
                            .and_then(|w| {
                                adapter.on_create(w.id(), None)?;
                                Ok(w)
                            });
                        match created {
                            Ok(w) => {
                                window = Some(w);
                                adapter.on_start();
                                adapter.on_resume(None);
                                adapter.on_window_created();
                            }
                            Err(err) => {
                                log::error!("activity creation failed: {:#}", err);
                                failure = Some(err);
                                elwt.exit();
                            }
                        }
                    }
                    Event::Suspended => adapter.on_pause(),
                    Event::MemoryWarning => adapter.on_low_memory(),
                    Event::WindowEvent { event, .. } => match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Focused(focused) => adapter.on_focus_changed(focused),
                        WindowEvent::KeyboardInput { event, .. } => {
                            let Some(input) = crate::input::from_winit(&event) else {
                                return;
                            };
                            let consumed = forward_key(&mut adapter, &input);
                            if finishes_activity(&input, consumed) {
                                elwt.exit();
                            }
                        }
                        _ => {}
                    },
                    Event::LoopExiting => {
                        if adapter.context().is_some() {
                            adapter.on_pause();
                            let _ = adapter.on_save_state();
                            adapter.on_stop();
                            adapter.on_window_destroyed();
                            adapter.on_destroy();
                        }
                        window = None;
                    }
                    _ => {}
                }
            })
            .map_err(|e| ShimError::EventLoop(e.to_string()))?;

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[derive(Default)]
    struct Keys {
        downs: Vec<u32>,
        ups: Vec<u32>,
        consume: bool,
    }

    impl ActivityBase for Keys {
        fn on_create(&mut self, _saved_state: Option<&[u8]>) -> Result<()> {
            Ok(())
        }

        fn on_key_down(&mut self, key_code: u32, _event: &KeyInput) -> bool {
            self.downs.push(key_code);
            self.consume
        }

        fn on_key_up(&mut self, key_code: u32, _event: &KeyInput) -> bool {
            self.ups.push(key_code);
            self.consume
        }
    }

    #[test]
    fn forward_key_routes_by_action() {
        let mut adapter = ActivityAdapter::new(
            Keys {
                consume: true,
                ..Default::default()
            },
            ShimConfig::default(),
        );
        adapter.on_create((), None).unwrap();

        assert!(forward_key(&mut adapter, &KeyInput::down(keycodes::DPAD_UP)));
        assert!(forward_key(&mut adapter, &KeyInput::up(keycodes::ENTER)));
        assert_eq!(adapter.base().downs, vec![keycodes::DPAD_UP]);
        assert_eq!(adapter.base().ups, vec![keycodes::ENTER]);
    }

    #[test]
    fn only_unconsumed_back_release_finishes() {
        assert!(finishes_activity(&KeyInput::up(keycodes::BACK), false));
        assert!(!finishes_activity(&KeyInput::up(keycodes::BACK), true));
        assert!(!finishes_activity(&KeyInput::down(keycodes::BACK), false));
        assert!(!finishes_activity(&KeyInput::up(keycodes::ENTER), false));
    }

    #[test]
    fn cube_world_back_release_finishes() {
        let mut adapter = ActivityAdapter::new(CubeWorld::default(), ShimConfig::default());
        adapter.on_create((), None).unwrap();

        let release = KeyInput::up(keycodes::BACK);
        let consumed = forward_key(&mut adapter, &release);
        assert!(finishes_activity(&release, consumed));
    }
}
