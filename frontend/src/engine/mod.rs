//! Scroll-synchronized view state.
//!
//! Data flows one way: raw events pass the [`FrameThrottle`], each frame
//! samples target progress and region visibility, visibility deltas feed the
//! [`ThemeResolver`], and the results come back as an [`Outcome`] the host
//! dispatches once it has released the engine.
//!
//! Nothing in here touches the browser. Time and geometry are passed in,
//! which keeps every transition reproducible in tests.

pub mod bridge;
pub mod error;
pub mod geometry;
pub mod progress;
pub mod sampler;
pub mod theme;
pub mod visibility;

use std::collections::BTreeMap;
use std::rc::Rc;

use log::debug;

use crate::config::EngineConfig;

pub use bridge::{Capability, SegmentStyle, SegmentWriter, StyleSink, UpdateStrategy};
pub use error::EngineError;
pub use geometry::{Rect, ScrollOffsets, Viewport};
pub use progress::{OutputRange, ProgressMapper, Segment};
pub use sampler::{FrameThrottle, ProgressTrack, SampleDecision};
pub use theme::{Theme, ThemeResolver, TimerCommand};
pub use visibility::{ActiveSet, DetectionBand, RegionId, VisibilityDelta, VisibilityTracker};

/// Reads an element's current document rect. `None` once the node is gone.
pub type GeometrySource = Rc<dyn Fn(&Viewport) -> Option<Rect>>;
pub type ProgressCallback = Rc<dyn Fn(f64)>;
pub type DeltaCallback = Rc<dyn Fn(&VisibilityDelta)>;
pub type ThemeCallback = Rc<dyn Fn(Theme)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

struct TrackedTarget {
    track: ProgressTrack,
    geometry: GeometrySource,
    callback: ProgressCallback,
}

struct Subscribers<T> {
    entries: Vec<(SubscriptionId, T)>,
}

impl<T: Clone> Subscribers<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add(&mut self, id: SubscriptionId, callback: T) {
        self.entries.push((id, callback));
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    fn snapshot(&self) -> Vec<T> {
        self.entries.iter().map(|(_, callback)| callback.clone()).collect()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A value waiting to be handed to its subscribers.
pub enum Notification {
    Progress(ProgressCallback, f64),
    Visibility(Vec<DeltaCallback>, VisibilityDelta),
    Theme(Vec<ThemeCallback>, Theme),
}

impl Notification {
    fn deliver(self) {
        match self {
            Self::Progress(callback, value) => callback(value),
            Self::Visibility(callbacks, delta) => {
                for callback in callbacks {
                    callback(&delta);
                }
            }
            Self::Theme(callbacks, theme) => {
                for callback in callbacks {
                    callback(theme);
                }
            }
        }
    }
}

/// Everything one engine step produced.
#[derive(Default)]
pub struct Outcome {
    pub notifications: Vec<Notification>,
    pub timer: Option<TimerCommand>,
}

impl Outcome {
    /// Delivers notifications in order and hands back the timer command.
    ///
    /// Must be called after the engine borrow is released: callbacks are
    /// free to register, unregister or subscribe.
    pub fn dispatch(self) -> Option<TimerCommand> {
        for notification in self.notifications {
            notification.deliver();
        }
        self.timer
    }
}

pub struct Engine {
    config: EngineConfig,
    capability: Capability,
    throttle: FrameThrottle,
    targets: BTreeMap<TargetId, TrackedTarget>,
    regions: BTreeMap<RegionId, GeometrySource>,
    tracker: VisibilityTracker,
    resolver: ThemeResolver,
    visibility_subscribers: Subscribers<DeltaCallback>,
    theme_subscribers: Subscribers<ThemeCallback>,
    next_id: u64,
}

impl Engine {
    pub fn new(config: EngineConfig, capability: Capability) -> Self {
        Self {
            throttle: FrameThrottle::new(config.sample_interval_ms),
            tracker: VisibilityTracker::new(config.detection_band),
            resolver: ThemeResolver::new(config.debounce_ms, config.initial_theme),
            targets: BTreeMap::new(),
            regions: BTreeMap::new(),
            visibility_subscribers: Subscribers::new(),
            theme_subscribers: Subscribers::new(),
            next_id: 0,
            config,
            capability,
        }
    }

    /// Strategy for per-frame segment updates. Fixed for the engine's life.
    pub fn high_frequency_strategy(&self) -> UpdateStrategy {
        UpdateStrategy::for_high_frequency(self.capability, self.config.prefer_direct_write)
    }

    pub fn theme(&self) -> Theme {
        self.resolver.theme()
    }

    #[cfg(test)]
    pub fn theme_state(&self) -> theme::ThemeState {
        self.resolver.state()
    }

    #[cfg(test)]
    pub fn is_region_active(&self, id: &RegionId) -> bool {
        self.tracker.is_active(id)
    }

    #[cfg(test)]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    #[cfg(test)]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn register_target(
        &mut self,
        offsets: ScrollOffsets,
        geometry: GeometrySource,
        callback: ProgressCallback,
    ) -> TargetId {
        let id = TargetId(self.next_id());
        self.targets.insert(
            id,
            TrackedTarget {
                track: ProgressTrack::new(offsets),
                geometry,
                callback,
            },
        );
        id
    }

    pub fn unregister_target(&mut self, id: TargetId) -> bool {
        self.targets.remove(&id).is_some()
    }

    pub fn register_region(
        &mut self,
        id: RegionId,
        geometry: GeometrySource,
    ) -> Result<(), EngineError> {
        if !self.tracker.register(id.clone()) {
            return Err(EngineError::DuplicateRegion(id.to_string()));
        }
        debug!("registered theme region {}", id);
        self.regions.insert(id, geometry);
        Ok(())
    }

    /// Drops the region. If it was in the band, the theme sees it leave.
    pub fn unregister_region(&mut self, id: &RegionId, now: f64) -> Outcome {
        if self.regions.remove(id).is_none() {
            return Outcome::default();
        }
        debug!("unregistered theme region {}", id);
        let delta = self.tracker.unregister(id);
        let mut outcome = Outcome::default();
        self.resolve_delta(delta, now, &mut outcome);
        outcome
    }

    pub fn subscribe_visibility(&mut self, callback: DeltaCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id());
        self.visibility_subscribers.add(id, callback);
        id
    }

    pub fn subscribe_theme(&mut self, callback: ThemeCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id());
        self.theme_subscribers.add(id, callback);
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.visibility_subscribers.remove(id) || self.theme_subscribers.remove(id)
    }

    /// Called from the raw scroll/resize handler. Computes nothing.
    pub fn on_raw_event(&mut self, now: f64) -> SampleDecision {
        self.throttle.on_raw_event(now)
    }

    pub fn request_frame(&mut self) -> SampleDecision {
        self.throttle.request()
    }

    /// Forgets a frame that will never run, e.g. when scheduling failed.
    pub fn cancel_frame(&mut self) {
        self.throttle.cancel();
    }

    /// One computation pass. Progress is settled before visibility, and
    /// visibility before the theme candidate.
    pub fn run_frame(&mut self, viewport: &Viewport, now: f64) -> Outcome {
        self.throttle.frame_ran();
        let mut outcome = Outcome::default();
        let precision = self.config.progress_precision;

        for target in self.targets.values_mut() {
            let rect = (target.geometry)(viewport);
            if let Some(progress) = target.track.sample(rect, viewport, precision) {
                outcome
                    .notifications
                    .push(Notification::Progress(target.callback.clone(), progress));
            }
        }

        let mut delta = VisibilityDelta::default();
        for (id, geometry) in &self.regions {
            self.tracker.observe(id, geometry(viewport), viewport, &mut delta);
        }
        self.resolve_delta(delta, now, &mut outcome);
        outcome
    }

    fn resolve_delta(&mut self, delta: VisibilityDelta, now: f64, outcome: &mut Outcome) {
        if delta.is_empty() {
            return;
        }
        outcome.timer = self.resolver.apply(&delta, now);
        if !self.visibility_subscribers.is_empty() {
            outcome.notifications.push(Notification::Visibility(
                self.visibility_subscribers.snapshot(),
                delta,
            ));
        }
    }

    /// The debounce timer armed with `generation` fired.
    pub fn on_timer(&mut self, generation: u64) -> Outcome {
        let mut outcome = Outcome::default();
        if let Some(theme) = self.resolver.expire(generation) {
            debug!("theme committed: {}", theme.as_str());
            outcome.notifications.push(Notification::Theme(
                self.theme_subscribers.snapshot(),
                theme,
            ));
        }
        outcome
    }

    /// Stops all pending work. Registrations stay with their owners.
    pub fn teardown(&mut self) -> Option<TimerCommand> {
        self.throttle.cancel();
        self.resolver.cancel().then_some(TimerCommand::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::theme::ThemeState;
    use super::*;

    /// Drives an engine the way the browser driver does, with simulated time.
    struct Harness {
        engine: Engine,
        now: f64,
        scroll_y: f64,
        timer: Option<(f64, u64)>,
        frame_requested: bool,
    }

    impl Harness {
        fn new(capability: Capability) -> Self {
            Self {
                engine: Engine::new(EngineConfig::default(), capability),
                now: 0.0,
                scroll_y: 0.0,
                timer: None,
                frame_requested: false,
            }
        }

        fn viewport(&self) -> Viewport {
            Viewport::new(self.scroll_y, 1280.0, 1000.0)
        }

        fn apply_timer(&mut self, command: Option<TimerCommand>) {
            match command {
                Some(TimerCommand::Arm {
                    delay_ms,
                    generation,
                }) => self.timer = Some((self.now + delay_ms, generation)),
                Some(TimerCommand::Cancel) => self.timer = None,
                None => {}
            }
        }

        /// Advances the clock, firing the debounce timer when it comes due.
        fn advance(&mut self, ms: f64) {
            self.now += ms;
            if let Some((deadline, generation)) = self.timer {
                if self.now >= deadline {
                    self.timer = None;
                    let command = self.engine.on_timer(generation).dispatch();
                    self.apply_timer(command);
                }
            }
        }

        fn scroll_to(&mut self, scroll_y: f64) {
            self.scroll_y = scroll_y;
            if self.engine.on_raw_event(self.now) == SampleDecision::Schedule {
                self.frame_requested = true;
            }
        }

        fn frame(&mut self) {
            if !self.frame_requested {
                return;
            }
            self.frame_requested = false;
            let viewport = self.viewport();
            let command = self.engine.run_frame(&viewport, self.now).dispatch();
            self.apply_timer(command);
        }

        fn scroll_and_paint(&mut self, scroll_y: f64) {
            self.scroll_to(scroll_y);
            self.advance(16.0);
            self.frame();
        }
    }

    fn fixed(rect: Rect) -> GeometrySource {
        Rc::new(move |_| Some(rect))
    }

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, Rc<dyn Fn(T)>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, Rc::new(move |value: T| sink.borrow_mut().push(value)))
    }

    #[test]
    fn progress_is_delivered_once_per_frame_and_only_on_change() {
        let mut harness = Harness::new(Capability::FinePointer);
        let (seen, callback) = recorder::<f64>();
        harness.engine.register_target(
            ScrollOffsets::ENTER_EXIT,
            fixed(Rect::new(2000.0, 3000.0)),
            callback,
        );

        harness.scroll_and_paint(2000.0);
        // burst of raw events inside one throttle interval
        harness.scroll_to(2100.0);
        harness.scroll_to(2200.0);
        harness.frame();
        harness.advance(40.0);
        harness.scroll_and_paint(2000.0);

        assert_eq!(*seen.borrow(), vec![0.5]);
    }

    #[test]
    fn dark_section_commits_after_the_debounce_window() {
        let mut harness = Harness::new(Capability::FinePointer);
        let (themes, callback) = recorder::<Theme>();
        harness.engine.subscribe_theme(callback);
        harness
            .engine
            .register_region(RegionId::from("services"), fixed(Rect::new(2000.0, 3000.0)))
            .unwrap();

        harness.scroll_and_paint(1700.0);
        assert!(harness.engine.is_region_active(&RegionId::from("services")));
        assert_eq!(harness.engine.theme(), Theme::Light);
        assert!(themes.borrow().is_empty());

        harness.advance(30.0);
        assert!(themes.borrow().is_empty());
        harness.advance(30.0);
        assert_eq!(*themes.borrow(), vec![Theme::Dark]);
        assert_eq!(harness.engine.theme(), Theme::Dark);
    }

    #[test]
    fn passing_through_the_band_quickly_keeps_the_light_theme() {
        let mut harness = Harness::new(Capability::FinePointer);
        let (themes, callback) = recorder::<Theme>();
        harness.engine.subscribe_theme(callback);
        harness
            .engine
            .register_region(RegionId::from("thin"), fixed(Rect::new(1000.0, 1040.0)))
            .unwrap();

        // one frame inside the band, the next one past it
        harness.scroll_and_paint(500.0);
        assert!(harness.engine.is_region_active(&RegionId::from("thin")));
        harness.advance(20.0);
        harness.scroll_and_paint(1000.0);
        assert!(!harness.engine.is_region_active(&RegionId::from("thin")));

        harness.advance(500.0);
        assert!(themes.borrow().is_empty());
        assert_eq!(harness.engine.theme(), Theme::Light);
    }

    #[test]
    fn visibility_subscribers_only_see_deltas() {
        let mut harness = Harness::new(Capability::FinePointer);
        let (deltas, callback) = recorder::<VisibilityDelta>();
        harness
            .engine
            .subscribe_visibility(Rc::new(move |delta: &VisibilityDelta| callback(delta.clone())));
        harness
            .engine
            .register_region(RegionId::from("tall"), fixed(Rect::new(0.0, 8000.0)))
            .unwrap();

        for step in 0..10 {
            harness.advance(40.0);
            harness.scroll_and_paint(step as f64 * 300.0);
        }

        let deltas = deltas.borrow();
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].entered, vec![RegionId::from("tall")]);
    }

    #[test]
    fn duplicate_region_ids_are_rejected() {
        let mut engine = Engine::new(EngineConfig::default(), Capability::FinePointer);
        let geometry = fixed(Rect::new(0.0, 10.0));
        engine
            .register_region(RegionId::from("a"), geometry.clone())
            .unwrap();
        let err = engine
            .register_region(RegionId::from("a"), geometry)
            .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateRegion(id) if id == "a"));
        assert_eq!(engine.region_count(), 1);
    }

    #[test]
    fn unmounted_section_stops_receiving_updates() {
        let mut harness = Harness::new(Capability::CoarsePointer);
        let (seen, callback) = recorder::<f64>();
        let rect = Rc::new(Cell::new(Some(Rect::new(2000.0, 3000.0))));
        let geometry: GeometrySource = {
            let rect = rect.clone();
            Rc::new(move |_| rect.get())
        };
        let target = harness
            .engine
            .register_target(ScrollOffsets::ENTER_EXIT, geometry.clone(), callback);
        harness
            .engine
            .register_region(RegionId::from("section"), geometry)
            .unwrap();

        harness.scroll_and_paint(1500.0);
        harness.advance(100.0);
        assert_eq!(harness.engine.theme(), Theme::Dark);
        let delivered = seen.borrow().len();

        assert!(harness.engine.unregister_target(target));
        let command = harness
            .engine
            .unregister_region(&RegionId::from("section"), harness.now)
            .dispatch();
        harness.apply_timer(command);
        rect.set(Some(Rect::new(0.0, 10_000.0)));

        for step in 0..5 {
            harness.advance(50.0);
            harness.scroll_and_paint(step as f64 * 700.0);
        }
        assert_eq!(seen.borrow().len(), delivered);
        assert_eq!(harness.engine.target_count(), 0);
        assert_eq!(harness.engine.region_count(), 0);
        // the section left while it was active, so the page goes back to light
        assert_eq!(harness.engine.theme(), Theme::Light);
    }

    #[test]
    fn removed_node_is_skipped_without_fault() {
        let mut harness = Harness::new(Capability::FinePointer);
        let (seen, callback) = recorder::<f64>();
        let rect = Rc::new(Cell::new(Some(Rect::new(2000.0, 3000.0))));
        let geometry: GeometrySource = {
            let rect = rect.clone();
            Rc::new(move |_| rect.get())
        };
        harness
            .engine
            .register_target(ScrollOffsets::ENTER_EXIT, geometry, callback);

        harness.scroll_and_paint(2000.0);
        rect.set(None);
        harness.advance(40.0);
        harness.scroll_and_paint(2500.0);

        assert_eq!(*seen.borrow(), vec![0.5]);
    }

    #[test]
    fn teardown_cancels_the_pending_theme() {
        let mut harness = Harness::new(Capability::FinePointer);
        harness
            .engine
            .register_region(RegionId::from("a"), fixed(Rect::new(0.0, 1000.0)))
            .unwrap();
        harness.scroll_and_paint(0.0);
        assert!(matches!(
            harness.engine.theme_state(),
            ThemeState::Pending { .. }
        ));

        assert_eq!(harness.engine.teardown(), Some(TimerCommand::Cancel));
        assert_eq!(harness.engine.theme_state(), ThemeState::Stable(Theme::Light));
        assert_eq!(harness.engine.teardown(), None);
    }

    #[test]
    fn callbacks_may_reenter_through_a_shared_handle() {
        let engine = Rc::new(RefCell::new(Engine::new(
            EngineConfig::default(),
            Capability::FinePointer,
        )));
        let calls = Rc::new(Cell::new(0));
        let callback: ProgressCallback = {
            let engine = engine.clone();
            let calls = calls.clone();
            Rc::new(move |_| {
                calls.set(calls.get() + 1);
                // a subscriber reacting to progress by touching the engine
                engine.borrow_mut().subscribe_theme(Rc::new(|_| {}));
            })
        };
        engine.borrow_mut().register_target(
            ScrollOffsets::ENTER_EXIT,
            fixed(Rect::new(0.0, 1000.0)),
            callback,
        );

        let viewport = Viewport::new(0.0, 1280.0, 1000.0);
        let outcome = engine.borrow_mut().run_frame(&viewport, 0.0);
        outcome.dispatch();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn strategy_is_derived_from_capability() {
        let touch = Engine::new(EngineConfig::default(), Capability::CoarsePointer);
        let mouse = Engine::new(EngineConfig::default(), Capability::FinePointer);
        assert_eq!(touch.high_frequency_strategy(), UpdateStrategy::DirectWrite);
        assert_eq!(mouse.high_frequency_strategy(), UpdateStrategy::StateTriggered);
    }
}
