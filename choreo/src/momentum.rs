//! Gesture velocity and momentum.
//!
//! A [`GestureContext`] lives for one finger-down-to-up, or one continuous
//! burst of wheel events. It is owned by the choreographer that received the
//! gesture and is dropped at the gesture boundary, so momentum never leaks
//! between unrelated gestures or between pages.

use std::collections::VecDeque;

use crate::config::MomentumTuning;
use crate::input::InputDevice;

/// Samples retained for velocity estimation.
pub const MAX_SAMPLES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumSample {
    pub position: f64,
    pub timestamp: f64,
}

/// Bounded sample window, newest first.
#[derive(Debug, Clone, Default)]
pub struct MomentumTracker {
    samples: VecDeque<MomentumSample>,
}

impl MomentumTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, delta: f64, timestamp: f64) {
        let position = self.samples.front().map_or(0.0, |s| s.position) + delta;
        self.samples.push_front(MomentumSample { position, timestamp });
        self.samples.truncate(MAX_SAMPLES);
    }

    /// Pixels per millisecond between the oldest and newest retained samples.
    pub fn estimate_velocity(&self) -> f64 {
        let (Some(newest), Some(oldest)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let elapsed = newest.timestamp - oldest.timestamp;
        if self.samples.len() < 2 || !(elapsed > 0.0) {
            return 0.0;
        }
        (newest.position - oldest.position) / elapsed
    }

    pub fn samples(&self) -> impl Iterator<Item = &MomentumSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// How an input event relates to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Fresh,
    Continuing,
    Reversal,
}

#[derive(Debug, Clone)]
pub struct GestureContext {
    device: InputDevice,
    last_event_at: Option<f64>,
    direction: f64,
    streak: u32,
    tracker: MomentumTracker,
}

impl GestureContext {
    pub fn new(device: InputDevice) -> Self {
        Self {
            device,
            last_event_at: None,
            direction: 0.0,
            streak: 0,
            tracker: MomentumTracker::new(),
        }
    }

    pub fn device(&self) -> InputDevice {
        self.device
    }

    pub fn last_event_at(&self) -> Option<f64> {
        self.last_event_at
    }

    pub fn tracker(&self) -> &MomentumTracker {
        &self.tracker
    }

    pub fn classify(&self, delta: f64, now: f64, tuning: &MomentumTuning) -> Regime {
        match self.last_event_at {
            None => Regime::Fresh,
            Some(last) if now - last >= tuning.pause_ms => Regime::Fresh,
            Some(_) if self.direction == 0.0 => Regime::Fresh,
            Some(_) if delta.signum() != self.direction => Regime::Reversal,
            Some(_) => Regime::Continuing,
        }
    }

    /// Feeds one normalized delta and returns it boosted for its regime.
    pub fn accumulate(
        &mut self,
        delta: f64,
        device: InputDevice,
        now: f64,
        tuning: &MomentumTuning,
    ) -> f64 {
        match self.classify(delta, now, tuning) {
            Regime::Fresh | Regime::Reversal => {
                self.streak = 0;
                self.tracker.clear();
            }
            Regime::Continuing => self.streak += 1,
        }

        let multiplier = (1.0 + f64::from(self.streak) * tuning.continue_boost).min(tuning.max_boost);
        let boosted = delta * multiplier;

        self.device = device;
        self.direction = delta.signum();
        self.last_event_at = Some(now);
        self.tracker.record(delta, now);
        boosted
    }

    /// One-shot release momentum. Zero if the gesture went still before
    /// release.
    pub fn release(&self, now: f64, tuning: &MomentumTuning) -> f64 {
        match self.last_event_at {
            Some(last) if now - last < tuning.pause_ms => {
                let projected = self.tracker.estimate_velocity() * tuning.window_for(self.device);
                projected.clamp(-tuning.max_momentum, tuning.max_momentum)
            }
            _ => 0.0,
        }
    }

    pub fn is_stale(&self, now: f64, tuning: &MomentumTuning) -> bool {
        self.last_event_at
            .map_or(true, |last| now - last >= tuning.pause_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_uses_oldest_and_newest_retained() {
        let mut tracker = MomentumTracker::new();
        for i in 0..8 {
            tracker.record(10.0, f64::from(i) * 10.0);
        }
        assert_eq!(tracker.len(), MAX_SAMPLES);
        // Retained samples span t = 30..70 and positions 40..80.
        assert!((tracker.estimate_velocity() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn newest_sample_comes_first() {
        let mut tracker = MomentumTracker::new();
        tracker.record(5.0, 1.0);
        tracker.record(7.0, 2.0);
        let first = tracker.samples().next().unwrap();
        assert_eq!(first.timestamp, 2.0);
        assert_eq!(first.position, 12.0);
    }

    #[test]
    fn velocity_needs_two_samples_and_elapsed_time() {
        let mut tracker = MomentumTracker::new();
        assert_eq!(tracker.estimate_velocity(), 0.0);
        tracker.record(10.0, 5.0);
        assert_eq!(tracker.estimate_velocity(), 0.0);
        tracker.record(10.0, 5.0);
        assert_eq!(tracker.estimate_velocity(), 0.0);
    }

    #[test]
    fn continuing_boosts_up_to_cap() {
        let tuning = MomentumTuning::default();
        let mut gesture = GestureContext::new(InputDevice::MouseWheel);
        let first = gesture.accumulate(100.0, InputDevice::MouseWheel, 0.0, &tuning);
        assert_eq!(first, 100.0);
        let second = gesture.accumulate(100.0, InputDevice::MouseWheel, 16.0, &tuning);
        assert!(second > first);

        let mut last = second;
        for i in 2..40 {
            last = gesture.accumulate(100.0, InputDevice::MouseWheel, f64::from(i) * 16.0, &tuning);
        }
        assert!((last - 100.0 * tuning.max_boost).abs() < 1e-9);
    }

    #[test]
    fn reversal_drops_all_carry() {
        let tuning = MomentumTuning::default();
        let mut gesture = GestureContext::new(InputDevice::MouseWheel);
        for i in 0..5 {
            gesture.accumulate(100.0, InputDevice::MouseWheel, f64::from(i) * 16.0, &tuning);
        }
        assert_eq!(gesture.classify(-50.0, 90.0, &tuning), Regime::Reversal);
        let reversed = gesture.accumulate(-50.0, InputDevice::MouseWheel, 90.0, &tuning);
        assert_eq!(reversed, -50.0);
        assert_eq!(gesture.tracker().len(), 1);
    }

    #[test]
    fn pause_starts_fresh() {
        let tuning = MomentumTuning::default();
        let mut gesture = GestureContext::new(InputDevice::MouseWheel);
        gesture.accumulate(100.0, InputDevice::MouseWheel, 0.0, &tuning);
        gesture.accumulate(100.0, InputDevice::MouseWheel, 16.0, &tuning);
        assert_eq!(gesture.classify(100.0, 500.0, &tuning), Regime::Fresh);
        assert_eq!(gesture.accumulate(100.0, InputDevice::MouseWheel, 500.0, &tuning), 100.0);
    }

    #[test]
    fn release_projects_velocity_and_bounds_it() {
        let tuning = MomentumTuning::default();
        let mut gesture = GestureContext::new(InputDevice::Touch);
        for i in 0..5 {
            gesture.accumulate(80.0, InputDevice::Touch, f64::from(i) * 16.0, &tuning);
        }
        let momentum = gesture.release(70.0, &tuning);
        assert!((momentum - 5.0 * tuning.touch_window_ms).abs() < 1e-6);

        let mut flick = GestureContext::new(InputDevice::Touch);
        for i in 0..5 {
            flick.accumulate(900.0, InputDevice::Touch, f64::from(i), &tuning);
        }
        assert_eq!(flick.release(5.0, &tuning), tuning.max_momentum);
    }

    #[test]
    fn release_after_hold_is_zero() {
        let tuning = MomentumTuning::default();
        let mut gesture = GestureContext::new(InputDevice::Touch);
        gesture.accumulate(80.0, InputDevice::Touch, 0.0, &tuning);
        gesture.accumulate(80.0, InputDevice::Touch, 16.0, &tuning);
        assert_eq!(gesture.release(1000.0, &tuning), 0.0);
    }
}
