use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Window};

use super::dom;
use crate::config::EngineConfig;
use crate::engine::{
    Capability, DeltaCallback, Engine, EngineError, GeometrySource, Outcome, ProgressCallback,
    RegionId, SampleDecision, ScrollOffsets, SubscriptionId, TargetId, Theme, ThemeCallback,
    TimerCommand, UpdateStrategy,
};

/// Passive window listener, removed when dropped.
struct WindowListener {
    window: Window,
    event: &'static str,
    callback: Closure<dyn FnMut()>,
}

impl WindowListener {
    fn passive(
        window: &Window,
        event: &'static str,
        callback: Closure<dyn FnMut()>,
    ) -> Result<Self, EngineError> {
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        window
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| EngineError::Listener {
                event,
                message: format!("{:?}", err),
            })?;
        Ok(Self {
            window: window.clone(),
            event,
            callback,
        })
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

struct Attachment {
    window: Window,
    _scroll: WindowListener,
    _resize: WindowListener,
    frame_callback: Closure<dyn FnMut(f64)>,
}

struct Inner {
    engine: RefCell<Engine>,
    attachment: RefCell<Option<Attachment>>,
    frame_handle: Cell<Option<i32>>,
    timer: RefCell<Option<Timeout>>,
}

/// Browser driver around [`Engine`], shared with components via context.
///
/// Owns the window listeners, the animation frame and the debounce timer.
/// Registrations handed out here unregister themselves when dropped.
#[derive(Clone)]
pub struct ScrollEngine {
    inner: Rc<Inner>,
}

impl PartialEq for ScrollEngine {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ScrollEngine {
    pub fn new(config: EngineConfig, capability: Capability) -> Self {
        Self {
            inner: Rc::new(Inner {
                engine: RefCell::new(Engine::new(config, capability)),
                attachment: RefCell::new(None),
                frame_handle: Cell::new(None),
                timer: RefCell::new(None),
            }),
        }
    }

    pub fn theme(&self) -> Theme {
        self.inner.engine.borrow().theme()
    }

    pub fn high_frequency_strategy(&self) -> UpdateStrategy {
        self.inner.engine.borrow().high_frequency_strategy()
    }

    pub fn is_attached(&self) -> bool {
        self.inner.attachment.borrow().is_some()
    }

    /// Starts listening to scroll and resize and samples once right away.
    pub fn attach(&self) -> Result<(), EngineError> {
        if self.is_attached() {
            return Ok(());
        }
        let window = web_sys::window().ok_or(EngineError::NoWindow)?;

        let on_event = |weak: Weak<Inner>| {
            Closure::wrap(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Inner::raw_event(&inner);
                }
            }) as Box<dyn FnMut()>)
        };
        let weak = Rc::downgrade(&self.inner);
        let scroll = WindowListener::passive(&window, "scroll", on_event(weak.clone()))?;
        let resize = WindowListener::passive(&window, "resize", on_event(weak.clone()))?;
        let frame_callback = Closure::wrap(Box::new(move |_timestamp: f64| {
            if let Some(inner) = weak.upgrade() {
                Inner::frame(&inner);
            }
        }) as Box<dyn FnMut(f64)>);

        *self.inner.attachment.borrow_mut() = Some(Attachment {
            window,
            _scroll: scroll,
            _resize: resize,
            frame_callback,
        });
        debug!("scroll engine attached");

        Inner::request_frame(&self.inner);
        Ok(())
    }

    /// Removes listeners, cancels the pending frame and the debounce timer.
    pub fn detach(&self) {
        if let Some(attachment) = self.inner.attachment.borrow_mut().take() {
            if let Some(handle) = self.inner.frame_handle.take() {
                let _ = attachment.window.cancel_animation_frame(handle);
            }
            debug!("scroll engine detached");
        }
        self.inner.engine.borrow_mut().teardown();
        self.inner.timer.borrow_mut().take();
    }

    pub fn track_progress(
        &self,
        offsets: ScrollOffsets,
        geometry: GeometrySource,
        callback: ProgressCallback,
    ) -> ProgressRegistration {
        let id = self
            .inner
            .engine
            .borrow_mut()
            .register_target(offsets, geometry, callback);
        // new targets get a sample without waiting for the user to scroll
        if self.is_attached() {
            Inner::request_frame(&self.inner);
        }
        ProgressRegistration {
            engine: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn track_region(
        &self,
        id: RegionId,
        geometry: GeometrySource,
    ) -> Result<RegionRegistration, EngineError> {
        self.inner
            .engine
            .borrow_mut()
            .register_region(id.clone(), geometry)?;
        if self.is_attached() {
            Inner::request_frame(&self.inner);
        }
        Ok(RegionRegistration {
            engine: Rc::downgrade(&self.inner),
            id,
        })
    }

    /// Raw enter/leave deltas, for consumers other than the theme.
    pub fn subscribe_visibility(&self, callback: DeltaCallback) -> Subscription {
        let id = self.inner.engine.borrow_mut().subscribe_visibility(callback);
        Subscription {
            engine: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn subscribe_theme(&self, callback: ThemeCallback) -> Subscription {
        let id = self.inner.engine.borrow_mut().subscribe_theme(callback);
        Subscription {
            engine: Rc::downgrade(&self.inner),
            id,
        }
    }
}

impl Inner {
    fn raw_event(inner: &Rc<Inner>) {
        let decision = inner.engine.borrow_mut().on_raw_event(dom::now());
        if decision == SampleDecision::Schedule {
            Inner::schedule_frame(inner);
        }
    }

    fn request_frame(inner: &Rc<Inner>) {
        let decision = inner.engine.borrow_mut().request_frame();
        if decision == SampleDecision::Schedule {
            Inner::schedule_frame(inner);
        }
    }

    /// On failure the throttle is reset so the next event tries again.
    fn schedule_frame(inner: &Rc<Inner>) {
        if let Err(err) = Inner::try_schedule_frame(inner) {
            warn!("{}", err);
            inner.engine.borrow_mut().cancel_frame();
        }
    }

    fn try_schedule_frame(inner: &Rc<Inner>) -> Result<(), EngineError> {
        let attachment = inner.attachment.borrow();
        let Some(attachment) = attachment.as_ref() else {
            return Ok(());
        };
        let handle = attachment
            .window
            .request_animation_frame(attachment.frame_callback.as_ref().unchecked_ref())
            .map_err(|err| EngineError::AnimationFrame(format!("{:?}", err)))?;
        inner.frame_handle.set(Some(handle));
        Ok(())
    }

    fn frame(inner: &Rc<Inner>) {
        inner.frame_handle.set(None);
        let viewport = {
            let attachment = inner.attachment.borrow();
            attachment
                .as_ref()
                .and_then(|attachment| dom::viewport(&attachment.window))
        };
        let Some(viewport) = viewport else {
            inner.engine.borrow_mut().cancel_frame();
            return;
        };
        let outcome = inner.engine.borrow_mut().run_frame(&viewport, dom::now());
        Inner::finish(inner, outcome);
    }

    fn finish(inner: &Rc<Inner>, outcome: Outcome) {
        let command = outcome.dispatch();
        Inner::apply_timer(inner, command);
    }

    fn apply_timer(inner: &Rc<Inner>, command: Option<TimerCommand>) {
        match command {
            Some(TimerCommand::Arm {
                delay_ms,
                generation,
            }) => {
                let weak = Rc::downgrade(inner);
                let timeout = Timeout::new(delay_ms.max(0.0).round() as u32, move || {
                    if let Some(inner) = weak.upgrade() {
                        let outcome = inner.engine.borrow_mut().on_timer(generation);
                        Inner::finish(&inner, outcome);
                    }
                });
                // replacing the old timeout cancels it
                *inner.timer.borrow_mut() = Some(timeout);
            }
            Some(TimerCommand::Cancel) => {
                inner.timer.borrow_mut().take();
            }
            None => {}
        }
    }
}

pub struct ProgressRegistration {
    engine: Weak<Inner>,
    id: TargetId,
}

impl Drop for ProgressRegistration {
    fn drop(&mut self) {
        if let Some(inner) = self.engine.upgrade() {
            inner.engine.borrow_mut().unregister_target(self.id);
        }
    }
}

pub struct RegionRegistration {
    engine: Weak<Inner>,
    id: RegionId,
}

impl Drop for RegionRegistration {
    fn drop(&mut self) {
        if let Some(inner) = self.engine.upgrade() {
            let outcome = inner
                .engine
                .borrow_mut()
                .unregister_region(&self.id, dom::now());
            Inner::finish(&inner, outcome);
        }
    }
}

pub struct Subscription {
    engine: Weak<Inner>,
    id: SubscriptionId,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.engine.upgrade() {
            inner.engine.borrow_mut().unsubscribe(self.id);
        }
    }
}
