//! Activity lifecycle adapter.
//!
//! Sits between the host callbacks and the native application. Creation builds
//! the application context before the base implementation runs; key events are
//! logged, shown to observers and handed to the base, whose answer is returned
//! untouched.

use crate::config::ShimConfig;
use crate::context::XrContext;
use crate::error::Result;
use crate::input::KeyInput;
use crate::lifecycle::{LifecycleDispatcher, LifecycleEvent, Phase};

/// What the native application does for each host callback.
///
/// Key handlers return whether the event was consumed; `false` leaves the
/// system default behaviour in place.
pub trait ActivityBase {
    fn on_create(&mut self, saved_state: Option<&[u8]>) -> Result<()>;

    fn on_key_down(&mut self, key_code: u32, event: &KeyInput) -> bool;

    fn on_key_up(&mut self, key_code: u32, event: &KeyInput) -> bool;

    fn on_start(&mut self) {}

    fn on_resume(&mut self, _restored_state: Option<&[u8]>) {}

    fn on_pause(&mut self) {}

    fn on_stop(&mut self) {}

    fn on_save_state(&mut self) -> Option<Vec<u8>> {
        None
    }

    fn on_low_memory(&mut self) {}

    fn on_focus_changed(&mut self, _focused: bool) {}

    fn on_window_created(&mut self) {}

    fn on_window_destroyed(&mut self) {}

    fn on_destroy(&mut self) {}
}

pub struct ActivityAdapter<A, B> {
    config: ShimConfig,
    base: B,
    dispatcher: LifecycleDispatcher<XrContext<A>>,
    context: Option<XrContext<A>>,
    creations: usize,
}

impl<A, B: ActivityBase> ActivityAdapter<A, B> {
    pub fn new(base: B, config: ShimConfig) -> Self {
        Self {
            config,
            base,
            dispatcher: LifecycleDispatcher::new(),
            context: None,
            creations: 0,
        }
    }

    /// Register lifecycle and key handlers here.
    pub fn dispatcher_mut(&mut self) -> &mut LifecycleDispatcher<XrContext<A>> {
        &mut self.dispatcher
    }

    pub fn context(&self) -> Option<&XrContext<A>> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut XrContext<A>> {
        self.context.as_mut()
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    pub fn phase(&self) -> Phase {
        self.dispatcher.phase()
    }

    /// Number of contexts built so far, one per creation callback.
    pub fn creations(&self) -> usize {
        self.creations
    }

    /// Creation callback. The context must exist before the base runs.
    pub fn on_create(&mut self, activity: A, saved_state: Option<&[u8]>) -> Result<()> {
        let mut context = XrContext::create(activity, &self.config)?;
        self.creations += 1;
        if self.context.is_some() {
            log::debug!("replacing context from previous creation");
        }

        self.dispatcher.dispatch(
            &mut context,
            &LifecycleEvent::Create {
                saved_state: saved_state.map(<[u8]>::to_vec),
            },
        );
        self.context = Some(context);

        self.base.on_create(saved_state)
    }

    pub fn on_key_down(&mut self, key_code: u32, event: &KeyInput) -> bool {
        log::debug!("key down keycode {}", key_code);
        self.observe_key(event);
        self.base.on_key_down(key_code, event)
    }

    pub fn on_key_up(&mut self, key_code: u32, event: &KeyInput) -> bool {
        log::debug!("key up keycode {}", key_code);
        self.observe_key(event);
        self.base.on_key_up(key_code, event)
    }

    fn observe_key(&mut self, event: &KeyInput) {
        match self.context.as_mut() {
            Some(ctx) => self.dispatcher.dispatch_key(ctx, event),
            None => log::warn!("key {} arrived before creation", event.key_code),
        }
    }

    pub fn on_start(&mut self) {
        self.dispatch(LifecycleEvent::Start);
        self.base.on_start();
    }

    pub fn on_resume(&mut self, restored_state: Option<&[u8]>) {
        self.dispatch(LifecycleEvent::Resume {
            restored_state: restored_state.map(<[u8]>::to_vec),
        });
        self.base.on_resume(restored_state);
    }

    pub fn on_pause(&mut self) {
        self.dispatch(LifecycleEvent::Pause);
        self.base.on_pause();
    }

    pub fn on_stop(&mut self) {
        self.dispatch(LifecycleEvent::Stop);
        self.base.on_stop();
    }

    pub fn on_save_state(&mut self) -> Option<Vec<u8>> {
        self.dispatch(LifecycleEvent::SaveState);
        self.base.on_save_state()
    }

    pub fn on_low_memory(&mut self) {
        self.dispatch(LifecycleEvent::LowMemory);
        self.base.on_low_memory();
    }

    pub fn on_focus_changed(&mut self, focused: bool) {
        self.dispatch(LifecycleEvent::FocusChanged(focused));
        self.base.on_focus_changed(focused);
    }

    pub fn on_window_created(&mut self) {
        self.dispatch(LifecycleEvent::WindowCreated);
        self.base.on_window_created();
    }

    pub fn on_window_destroyed(&mut self) {
        self.dispatch(LifecycleEvent::WindowDestroyed);
        self.base.on_window_destroyed();
    }

    /// Destroy callback. Drops the context after the base has torn down.
    pub fn on_destroy(&mut self) {
        self.dispatch(LifecycleEvent::Destroy);
        self.base.on_destroy();
        if let Some(ctx) = self.context.take() {
            log::info!("xr context destroyed after {:?}", ctx.uptime());
        }
    }

    fn dispatch(&mut self, event: LifecycleEvent) {
        match self.context.as_mut() {
            Some(ctx) => self.dispatcher.dispatch(ctx, &event),
            None => log::warn!("{} arrived without a context", event.name()),
        }
    }
}
