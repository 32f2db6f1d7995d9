//! The choreographer: one parameterized engine per mounted page.
//!
//! Every page that hijacks scrolling owns exactly one [`Choreographer`]. The
//! host feeds it DOM input, requests an animation frame whenever a method
//! returns [`FrameRequest::Schedule`], and calls [`Choreographer::frame`] from
//! that frame. Within a frame the animator runs first, then the section
//! tracker, then the registered hooks.

use tracing::{debug, trace, warn};

use crate::animator::{Animator, FrameLoop, Step};
use crate::config::ChoreoConfig;
use crate::error::{ChoreoError, Result};
use crate::gate::{EntranceGate, GateState};
use crate::input::{InputDevice, InputNormalizer, TouchInput, TouchPhase, WheelInput};
use crate::layout::{layout, SectionLayout};
use crate::momentum::GestureContext;
use crate::section::Section;
use crate::state::ScrollState;
use crate::target::resolve_target;
use crate::tracker::{section_index, SectionHooks, SectionIndexTracker};

/// What the host must do after feeding the engine.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// Request one animation frame.
    Schedule,
    /// A frame is already on its way; the new target will be picked up.
    AlreadyScheduled,
    /// Nothing to animate.
    Ignored,
}

impl FrameRequest {
    pub fn needs_frame(self) -> bool {
        self == FrameRequest::Schedule
    }

    pub fn consumed(self) -> bool {
        self != FrameRequest::Ignored
    }
}

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Still moving: request the next frame.
    Continue,
    /// Settled on the target.
    Idle,
    /// The callback arrived after teardown or without a pending request.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

pub struct Choreographer {
    config: ChoreoConfig,
    sections: Vec<Section>,
    viewport_extent: f64,
    state: ScrollState,
    normalizer: InputNormalizer,
    gesture: Option<GestureContext>,
    gate: EntranceGate,
    tracker: SectionIndexTracker,
    animator: Animator,
    frames: FrameLoop,
    hooks: Vec<Box<dyn SectionHooks>>,
    device: InputDevice,
    mounted: bool,
}

fn max_offset_for(extent: f64, count: usize) -> f64 {
    extent * count.saturating_sub(1) as f64
}

fn valid_extent(extent: f64) -> bool {
    extent.is_finite() && extent > 0.0
}

impl Choreographer {
    pub fn new(
        config: ChoreoConfig,
        sections: Vec<Section>,
        viewport_extent: f64,
        now: f64,
    ) -> Result<Self> {
        config.validate()?;
        if sections.is_empty() {
            return Err(ChoreoError::NoSections);
        }
        if !valid_extent(viewport_extent) {
            return Err(ChoreoError::InvalidViewport(viewport_extent));
        }

        debug!(
            sections = sections.len(),
            viewport_extent,
            axis = ?config.axis,
            "choreographer mounted"
        );

        Ok(Self {
            normalizer: InputNormalizer::new(config.input.clone(), config.axis, viewport_extent),
            gate: EntranceGate::new(now, config.gate.timeout_ms),
            animator: Animator::new(config.easing.epsilon),
            state: ScrollState::new(max_offset_for(viewport_extent, sections.len())),
            tracker: SectionIndexTracker::new(),
            frames: FrameLoop::new(),
            hooks: Vec::new(),
            gesture: None,
            device: InputDevice::MouseWheel,
            mounted: true,
            config,
            sections,
            viewport_extent,
        })
    }

    pub fn add_hook(&mut self, hook: impl SectionHooks + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn config(&self) -> &ChoreoConfig {
        &self.config
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    pub fn current_section(&self) -> &Section {
        &self.sections[self.state.current_section_index.min(self.sections.len() - 1)]
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn frame_pending(&self) -> bool {
        self.frames.is_pending()
    }

    pub fn gesture(&self) -> Option<&GestureContext> {
        self.gesture.as_ref()
    }

    pub fn layout(&self) -> Vec<SectionLayout> {
        layout(
            self.sections.len(),
            self.state.current_offset,
            self.viewport_extent,
            self.state.current_section_index,
            self.config.parallax,
        )
    }

    // ----- entrance gate -------------------------------------------------

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn gate_deadline(&self) -> f64 {
        self.gate.deadline()
    }

    pub fn on_gate_open(&mut self, hook: impl FnOnce() + 'static) {
        self.gate.on_open(hook);
    }

    pub fn assets_ready(&mut self) -> bool {
        self.gate.assets_ready()
    }

    pub fn entrance_complete(&mut self) -> bool {
        self.gate.entrance_complete()
    }

    pub fn poll_gate(&mut self, now: f64) -> bool {
        self.gate.poll(now)
    }

    fn accepts_input(&self) -> bool {
        self.mounted && self.gate.is_open()
    }

    // ----- input ---------------------------------------------------------

    pub fn handle_wheel(&mut self, input: &WheelInput) -> FrameRequest {
        if !self.accepts_input() {
            return FrameRequest::Ignored;
        }
        let Some(normalized) = self.normalizer.wheel(input) else {
            return FrameRequest::Ignored;
        };

        let tuning = &self.config.momentum;
        let gesture = match self.gesture.take() {
            Some(gesture) if !gesture.is_stale(normalized.timestamp, tuning) => gesture,
            _ => GestureContext::new(normalized.device),
        };
        let gesture = self.gesture.insert(gesture);
        let boosted = gesture.accumulate(normalized.delta, normalized.device, normalized.timestamp, tuning);

        self.apply(boosted, 0.0, normalized.device)
    }

    pub fn handle_touch(&mut self, input: &TouchInput) -> FrameRequest {
        if !self.accepts_input() {
            return FrameRequest::Ignored;
        }
        match input.phase {
            TouchPhase::Start => {
                let _ = self.normalizer.touch(input);
                self.gesture = Some(GestureContext::new(InputDevice::Touch));
                FrameRequest::Ignored
            }
            TouchPhase::Move => {
                let Some(normalized) = self.normalizer.touch(input) else {
                    return FrameRequest::Ignored;
                };
                let tuning = &self.config.momentum;
                let gesture = self
                    .gesture
                    .get_or_insert_with(|| GestureContext::new(InputDevice::Touch));
                let boosted =
                    gesture.accumulate(normalized.delta, normalized.device, normalized.timestamp, tuning);
                self.apply(boosted, 0.0, InputDevice::Touch)
            }
            TouchPhase::End => {
                let _ = self.normalizer.touch(input);
                self.end_gesture(input.timestamp)
            }
        }
    }

    /// Ends the current gesture, turning a touch flick into one-shot momentum.
    pub fn end_gesture(&mut self, now: f64) -> FrameRequest {
        let Some(gesture) = self.gesture.take() else {
            return FrameRequest::Ignored;
        };
        if !self.accepts_input() || gesture.device() != InputDevice::Touch {
            return FrameRequest::Ignored;
        }

        let momentum = gesture.release(now, &self.config.momentum);
        if momentum == 0.0 {
            return self.request_frame();
        }
        trace!(momentum, "touch release");
        self.apply(0.0, momentum, InputDevice::Touch)
    }

    pub fn scroll_to_section(&mut self, index: usize) -> FrameRequest {
        if !self.accepts_input() {
            return FrameRequest::Ignored;
        }
        self.gesture = None;
        let index = index.min(self.sections.len() - 1);
        let target = resolve_target(0.0, index as f64 * self.viewport_extent, 0.0, self.state.max_offset);
        self.device = InputDevice::Jump;
        self.state.retarget(target);
        self.request_frame()
    }

    /// Places the page on a section without animating, e.g. when a page is
    /// rebuilt for another device class and should resume where it was.
    pub fn snap_to_section(&mut self, index: usize) {
        if !self.mounted {
            return;
        }
        let index = index.min(self.sections.len() - 1);
        self.gesture = None;
        self.state.snap_to(index as f64 * self.viewport_extent);
        self.track();
    }

    /// Moves one section from wherever the current motion is heading.
    pub fn step_section(&mut self, direction: Direction) -> FrameRequest {
        let heading = section_index(self.state.target_offset, self.viewport_extent, self.sections.len());
        let next = match direction {
            Direction::Forward => heading + 1,
            Direction::Backward => heading.saturating_sub(1),
        };
        self.scroll_to_section(next)
    }

    /// Offset that new input is added to. Input continuing an in-flight
    /// motion extends its target; input against it starts from where the
    /// page is now.
    fn input_base(&self, travel: f64) -> f64 {
        let pending = self.state.target_offset - self.state.current_offset;
        if self.state.is_animating && pending * travel > 0.0 {
            self.state.target_offset
        } else {
            self.state.current_offset
        }
    }

    fn apply(&mut self, delta: f64, momentum: f64, device: InputDevice) -> FrameRequest {
        let base = self.input_base(delta + momentum);
        let target = resolve_target(base, delta, momentum, self.state.max_offset);
        self.device = device;
        self.state.retarget(target);
        self.request_frame()
    }

    fn request_frame(&mut self) -> FrameRequest {
        if !self.state.is_animating {
            return FrameRequest::Ignored;
        }
        if self.frames.arm() {
            FrameRequest::Schedule
        } else if self.frames.is_pending() {
            FrameRequest::AlreadyScheduled
        } else {
            FrameRequest::Ignored
        }
    }

    // ----- frame ---------------------------------------------------------

    pub fn frame(&mut self, now: f64) -> FrameOutcome {
        if !self.mounted || !self.frames.begin_frame() {
            return FrameOutcome::Stale;
        }

        let ease = self.config.easing.factor_for(self.device);
        let step = self.animator.step(&mut self.state, ease);
        trace!(
            offset = self.state.current_offset,
            target = self.state.target_offset,
            "frame"
        );
        self.track();

        let wheel_gesture_over = self.gesture.as_ref().map_or(false, |g| {
            g.device() != InputDevice::Touch && g.is_stale(now, &self.config.momentum)
        });
        if wheel_gesture_over {
            self.gesture = None;
        }

        match step {
            Step::Moved => {
                let _ = self.frames.arm();
                FrameOutcome::Continue
            }
            Step::Settled => FrameOutcome::Idle,
        }
    }

    // ----- viewport and lifecycle ----------------------------------------

    pub fn resize(&mut self, extent: f64) -> FrameRequest {
        if !self.mounted {
            return FrameRequest::Ignored;
        }
        if !valid_extent(extent) {
            warn!(extent, "ignoring invalid viewport extent");
            return FrameRequest::Ignored;
        }

        let factor = extent / self.viewport_extent;
        self.viewport_extent = extent;
        self.normalizer.set_viewport_extent(extent);
        self.state
            .rescale(factor, max_offset_for(extent, self.sections.len()));
        self.track();

        debug!(extent, max_offset = self.state.max_offset, "viewport resized");
        self.request_frame()
    }

    fn track(&mut self) {
        if let Some(change) =
            self.tracker
                .observe(self.state.current_offset, self.viewport_extent, &self.sections)
        {
            self.state.current_section_index = change.current;
            for hook in self.hooks.iter_mut() {
                hook.section_changed(&change);
            }
        }
    }

    /// Tears the engine down. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        debug!("choreographer unmounted");
        self.mounted = false;
        self.frames.detach();
        self.gate.dispose();
        self.gesture = None;
        self.hooks.clear();
        self.state.is_animating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DeltaMode;
    use crate::section::SectionKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sections(count: usize) -> Vec<Section> {
        (0..count)
            .map(|i| Section::new(i, SectionKind::Media).background(format!("#00000{i}")))
            .collect()
    }

    fn open(count: usize, extent: f64) -> Choreographer {
        let mut engine = Choreographer::new(ChoreoConfig::default(), sections(count), extent, 0.0).unwrap();
        engine.entrance_complete();
        engine
    }

    fn wheel(delta_y: f64, timestamp: f64) -> WheelInput {
        WheelInput {
            delta_x: 0.0,
            delta_y,
            mode: DeltaMode::Pixel,
            timestamp,
        }
    }

    fn run(engine: &mut Choreographer, mut now: f64) -> f64 {
        while engine.frame(now) == FrameOutcome::Continue {
            now += 16.0;
        }
        now
    }

    #[test]
    fn rejects_empty_and_bad_viewport() {
        assert!(matches!(
            Choreographer::new(ChoreoConfig::default(), vec![], 1000.0, 0.0),
            Err(ChoreoError::NoSections)
        ));
        assert!(matches!(
            Choreographer::new(ChoreoConfig::default(), sections(2), 0.0, 0.0),
            Err(ChoreoError::InvalidViewport(_))
        ));
    }

    #[test]
    fn max_offset_spans_all_but_one_section() {
        let engine = open(4, 800.0);
        assert_eq!(engine.state().max_offset(), 2400.0);
    }

    #[test]
    fn closed_gate_ignores_input() {
        let mut engine = Choreographer::new(ChoreoConfig::default(), sections(3), 1000.0, 0.0).unwrap();
        assert_eq!(engine.handle_wheel(&wheel(200.0, 10.0)), FrameRequest::Ignored);
        assert_eq!(engine.scroll_to_section(2), FrameRequest::Ignored);
        engine.assets_ready();
        assert_eq!(engine.handle_wheel(&wheel(200.0, 30.0)), FrameRequest::Ignored);
        assert!(engine.poll_gate(engine.gate_deadline()));
        assert_eq!(engine.handle_wheel(&wheel(200.0, 40.0)), FrameRequest::Schedule);
    }

    #[test]
    fn retarget_while_animating_reuses_the_loop() {
        let mut engine = open(3, 1000.0);
        assert_eq!(engine.handle_wheel(&wheel(100.0, 0.0)), FrameRequest::Schedule);
        assert_eq!(engine.handle_wheel(&wheel(100.0, 16.0)), FrameRequest::AlreadyScheduled);
        assert_eq!(engine.frame(16.0), FrameOutcome::Continue);
        assert_eq!(engine.handle_wheel(&wheel(100.0, 32.0)), FrameRequest::AlreadyScheduled);
    }

    #[test]
    fn input_during_motion_extends_the_target() {
        let mut engine = open(5, 1000.0);
        let _ = engine.handle_wheel(&wheel(100.0, 0.0));
        let first = engine.state().target_offset();
        assert_eq!(engine.frame(8.0), FrameOutcome::Continue);
        assert!(engine.state().current_offset() < first);

        let _ = engine.handle_wheel(&wheel(100.0, 16.0));
        let boosted = 100.0 * engine.config().input.mouse_multiplier * (1.0 + engine.config().momentum.continue_boost);
        assert!((engine.state().target_offset() - (first + boosted)).abs() < 1e-9);
    }

    #[test]
    fn input_against_motion_starts_from_current() {
        let mut engine = open(3, 1000.0);
        let _ = engine.scroll_to_section(2);
        for i in 0..4 {
            let _ = engine.frame(f64::from(i) * 16.0);
        }
        let current = engine.state().current_offset();
        let _ = engine.handle_wheel(&wheel(-100.0, 64.0));
        let expected = current - 100.0 * engine.config().input.mouse_multiplier;
        assert!((engine.state().target_offset() - expected).abs() < 1e-9);
    }

    #[test]
    fn snap_to_section_resumes_without_animating() {
        let mut engine = open(4, 1000.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        engine.add_hook(move |change: &crate::tracker::SectionChange| sink.borrow_mut().push(change.current));

        engine.snap_to_section(2);
        assert_eq!(engine.state().current_offset(), 2000.0);
        assert_eq!(engine.state().target_offset(), 2000.0);
        assert!(!engine.state().is_animating());
        assert_eq!(engine.state().current_section_index(), 2);
        assert_eq!(*seen.borrow(), vec![2]);
        assert_eq!(engine.frame(0.0), FrameOutcome::Stale);

        engine.snap_to_section(99);
        assert_eq!(engine.state().current_offset(), 3000.0);
        assert_eq!(engine.state().current_section_index(), 3);
    }

    #[test]
    fn idle_resize_keeps_relative_position() {
        let mut engine = open(3, 1000.0);
        let _ = engine.handle_wheel(&wheel(1300.0 / 1.2, 0.0));
        run(&mut engine, 0.0);
        assert!((engine.state().current_offset() - 1300.0).abs() < 1e-6);

        assert_eq!(engine.resize(800.0), FrameRequest::Ignored);
        assert!((engine.state().current_offset() - 1040.0).abs() < 1e-6);
        assert_eq!(engine.state().current_section_index(), 1);
    }

    #[test]
    fn hooks_fire_once_per_section() {
        let mut engine = open(3, 1000.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        engine.add_hook(move |change: &crate::tracker::SectionChange| {
            sink.borrow_mut().push((change.current, change.background_color.clone()));
        });

        assert!(engine.scroll_to_section(2).needs_frame());
        run(&mut engine, 0.0);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, 1);
        assert_eq!(seen[1], (2, Some("#000002".to_string())));
        assert_eq!(engine.state().current_section_index(), 2);
        assert_eq!(engine.current_section().index, 2);
    }

    #[test]
    fn step_section_advances_from_heading() {
        let mut engine = open(4, 1000.0);
        assert!(engine.step_section(Direction::Forward).needs_frame());
        assert_eq!(engine.step_section(Direction::Forward), FrameRequest::AlreadyScheduled);
        assert_eq!(engine.state().target_offset(), 2000.0);
        run(&mut engine, 0.0);
        let _ = engine.step_section(Direction::Backward);
        assert_eq!(engine.state().target_offset(), 1000.0);
    }

    #[test]
    fn frame_without_request_is_stale() {
        let mut engine = open(3, 1000.0);
        assert_eq!(engine.frame(0.0), FrameOutcome::Stale);
    }

    #[test]
    fn wheel_at_edge_does_not_schedule() {
        let mut engine = open(3, 1000.0);
        assert_eq!(engine.handle_wheel(&wheel(-300.0, 0.0)), FrameRequest::Ignored);
    }

    #[test]
    fn unmount_detaches_everything() {
        let mut engine = open(3, 1000.0);
        let _ = engine.handle_wheel(&wheel(300.0, 0.0));
        engine.unmount();
        engine.unmount();
        assert_eq!(engine.frame(16.0), FrameOutcome::Stale);
        assert_eq!(engine.handle_wheel(&wheel(300.0, 32.0)), FrameRequest::Ignored);
        assert_eq!(engine.resize(500.0), FrameRequest::Ignored);
        assert!(!engine.is_mounted());
    }
}
