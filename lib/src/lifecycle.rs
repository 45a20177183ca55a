//! Lifecycle dispatch by composition.
//!
//! Instead of overriding a host base class, interested parties register
//! handlers that the activity adapter calls for each host callback.

use crate::input::KeyInput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Create { saved_state: Option<Vec<u8>> },
    Start,
    Resume { restored_state: Option<Vec<u8>> },
    Pause,
    Stop,
    SaveState,
    LowMemory,
    FocusChanged(bool),
    WindowCreated,
    WindowDestroyed,
    Destroy,
}

impl LifecycleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Start => "start",
            Self::Resume { .. } => "resume",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::SaveState => "save_state",
            Self::LowMemory => "low_memory",
            Self::FocusChanged(_) => "focus_changed",
            Self::WindowCreated => "window_created",
            Self::WindowDestroyed => "window_destroyed",
            Self::Destroy => "destroy",
        }
    }
}

/// Host lifecycle phase, tracked for diagnostics only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    Destroyed,
}

impl Phase {
    /// Phase after `event`, or `None` if the event does not move the phase.
    fn after(self, event: &LifecycleEvent) -> Option<Phase> {
        match event {
            LifecycleEvent::Create { .. } => Some(Phase::Created),
            LifecycleEvent::Start => Some(Phase::Started),
            LifecycleEvent::Resume { .. } => Some(Phase::Resumed),
            LifecycleEvent::Pause => Some(Phase::Paused),
            LifecycleEvent::Stop => Some(Phase::Stopped),
            LifecycleEvent::Destroy => Some(Phase::Destroyed),
            _ => None,
        }
    }

    fn expects(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Initialized | Destroyed, Created)
                | (Created | Stopped, Started)
                | (Started | Paused, Resumed)
                | (Resumed, Paused)
                | (Started | Paused, Stopped)
                | (_, Destroyed)
        )
    }

    pub fn is_running(self) -> bool {
        matches!(self, Phase::Started | Phase::Resumed | Phase::Paused)
    }
}

pub type LifecycleHandler<C> = Box<dyn FnMut(&mut C, &LifecycleEvent)>;
/// Key observers see every event but cannot consume it.
pub type KeyHandler<C> = Box<dyn FnMut(&mut C, &KeyInput)>;

pub struct LifecycleDispatcher<C> {
    lifecycle: Vec<LifecycleHandler<C>>,
    keys: Vec<KeyHandler<C>>,
    phase: Phase,
}

impl<C> Default for LifecycleDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> LifecycleDispatcher<C> {
    pub fn new() -> Self {
        Self {
            lifecycle: Vec::new(),
            keys: Vec::new(),
            phase: Phase::Initialized,
        }
    }

    pub fn on_lifecycle<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&mut C, &LifecycleEvent) + 'static,
    {
        self.lifecycle.push(Box::new(handler));
        self
    }

    pub fn on_key<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&mut C, &KeyInput) + 'static,
    {
        self.keys.push(Box::new(handler));
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn dispatch(&mut self, ctx: &mut C, event: &LifecycleEvent) {
        if let Some(next) = self.phase.after(event) {
            if !self.phase.expects(next) {
                log::warn!(
                    "unexpected lifecycle transition {:?} -> {:?} on {}",
                    self.phase,
                    next,
                    event.name()
                );
            }
            self.phase = next;
        }
        log::trace!("dispatching {} to {} handlers", event.name(), self.lifecycle.len());
        for handler in self.lifecycle.iter_mut() {
            handler(ctx, event);
        }
    }

    pub fn dispatch_key(&mut self, ctx: &mut C, input: &KeyInput) {
        for handler in self.keys.iter_mut() {
            handler(ctx, input);
        }
    }
}
