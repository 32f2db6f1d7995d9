//! One-shot gate that keeps input away until the entrance reveal is done.

use std::fmt;

use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Blocked,
    Playing,
    Open,
}

pub struct EntranceGate {
    state: GateState,
    mounted_at: f64,
    timeout_ms: f64,
    disposed: bool,
    on_open: Option<Box<dyn FnOnce()>>,
}

impl fmt::Debug for EntranceGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntranceGate")
            .field("state", &self.state)
            .field("mounted_at", &self.mounted_at)
            .field("timeout_ms", &self.timeout_ms)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl EntranceGate {
    pub fn new(mounted_at: f64, timeout_ms: f64) -> Self {
        Self {
            state: GateState::Blocked,
            mounted_at,
            timeout_ms,
            disposed: false,
            on_open: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == GateState::Open
    }

    /// Registers the hook run when the gate opens. Replaces any earlier hook.
    pub fn on_open(&mut self, hook: impl FnOnce() + 'static) {
        self.on_open = Some(Box::new(hook));
    }

    /// Millisecond timestamp at which [`EntranceGate::poll`] opens the gate
    /// on its own.
    pub fn deadline(&self) -> f64 {
        self.mounted_at + self.timeout_ms
    }

    /// The reveal's assets are in and it has started playing.
    pub fn assets_ready(&mut self) -> bool {
        if self.disposed || self.state != GateState::Blocked {
            return false;
        }
        debug!("entrance gate playing");
        self.state = GateState::Playing;
        true
    }

    /// The entrance reveal finished. Returns true if this opened the gate.
    pub fn entrance_complete(&mut self) -> bool {
        if self.disposed || self.state == GateState::Open {
            return false;
        }
        self.open();
        true
    }

    /// Opens the gate if the entrance signal is overdue.
    pub fn poll(&mut self, now: f64) -> bool {
        if self.disposed || self.state == GateState::Open || now < self.deadline() {
            return false;
        }
        warn!(state = ?self.state, "entrance signal timed out, opening gate");
        self.open();
        true
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        self.on_open = None;
    }

    fn open(&mut self) {
        debug!("entrance gate open");
        self.state = GateState::Open;
        if let Some(hook) = self.on_open.take() {
            hook();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counted(gate: &mut EntranceGate) -> Rc<Cell<u32>> {
        let calls = Rc::new(Cell::new(0));
        let hook_calls = calls.clone();
        gate.on_open(move || hook_calls.set(hook_calls.get() + 1));
        calls
    }

    #[test]
    fn blocked_playing_open() {
        let mut gate = EntranceGate::new(0.0, 4000.0);
        let calls = counted(&mut gate);
        assert_eq!(gate.state(), GateState::Blocked);
        assert!(gate.assets_ready());
        assert_eq!(gate.state(), GateState::Playing);
        assert!(!gate.assets_ready());
        assert!(gate.entrance_complete());
        assert!(gate.is_open());
        assert!(!gate.entrance_complete());
        assert!(!gate.poll(10_000.0));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn missing_signal_times_out() {
        let mut gate = EntranceGate::new(1000.0, 4000.0);
        let calls = counted(&mut gate);
        gate.assets_ready();
        assert!(!gate.poll(4999.0));
        assert!(gate.poll(5000.0));
        assert!(gate.is_open());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn completion_without_ready_still_opens() {
        let mut gate = EntranceGate::new(0.0, 4000.0);
        assert!(gate.entrance_complete());
        assert!(gate.is_open());
    }

    #[test]
    fn disposed_gate_never_fires() {
        let mut gate = EntranceGate::new(0.0, 4000.0);
        let calls = counted(&mut gate);
        gate.assets_ready();
        gate.dispose();
        assert!(!gate.entrance_complete());
        assert!(!gate.poll(1e9));
        assert_eq!(calls.get(), 0);
        assert_eq!(gate.state(), GateState::Playing);
    }
}
