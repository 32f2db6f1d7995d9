//! Frame-by-frame easing toward the target offset.
//!
//! The animator never schedules anything itself. [`FrameLoop`] tells the
//! host when exactly one animation frame must be requested, and recognises
//! callbacks that fire after teardown.

use crate::state::ScrollState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Idle,
    /// One frame has been requested from the host and not yet delivered.
    Pending,
    /// Torn down. Terminal.
    Detached,
}

#[derive(Debug, Clone)]
pub struct FrameLoop {
    phase: LoopPhase,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            phase: LoopPhase::Idle,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == LoopPhase::Pending
    }

    /// Returns true when the caller must request a frame.
    pub fn arm(&mut self) -> bool {
        if self.phase == LoopPhase::Idle {
            self.phase = LoopPhase::Pending;
            true
        } else {
            false
        }
    }

    /// Consumes the pending frame. False for stale or spurious callbacks.
    pub fn begin_frame(&mut self) -> bool {
        if self.phase == LoopPhase::Pending {
            self.phase = LoopPhase::Idle;
            true
        } else {
            false
        }
    }

    pub fn detach(&mut self) {
        self.phase = LoopPhase::Detached;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved,
    Settled,
}

#[derive(Debug, Clone, Copy)]
pub struct Animator {
    epsilon: f64,
}

impl Animator {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Advances `current_offset` one frame toward `target_offset`.
    pub fn step(&self, state: &mut ScrollState, ease: f64) -> Step {
        let distance = state.target_offset - state.current_offset;
        if distance.abs() < self.epsilon {
            state.current_offset = state.target_offset.clamp(0.0, state.max_offset);
            state.is_animating = false;
            return Step::Settled;
        }

        let next = state.current_offset + distance * ease;
        state.current_offset = next.clamp(0.0, state.max_offset);
        state.is_animating = true;
        Step::Moved
    }
}
