//! Input normalization.
//!
//! Wheel and touch events arrive in different units and with very different
//! noise characteristics. [`InputNormalizer`] turns both into one signed pixel
//! delta along the page's primary axis, tagged with the device class that
//! produced it so later stages can pick momentum and easing per device.

use std::collections::VecDeque;

use tracing::warn;

use crate::config::{Axis, InputTuning};

/// How many raw touch deltas feed the smoothing average.
const TOUCH_SMOOTHING_WINDOW: usize = 3;

/// `WheelEvent.deltaMode` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaMode {
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    /// Maps the DOM constants `DOM_DELTA_PIXEL`, `DOM_DELTA_LINE` and
    /// `DOM_DELTA_PAGE`. Unknown values are treated as pixels.
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => DeltaMode::Line,
            2 => DeltaMode::Page,
            _ => DeltaMode::Pixel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDevice {
    MouseWheel,
    Trackpad,
    Touch,
    /// Programmatic page jumps (indicator clicks, keyboard).
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    pub mode: DeltaMode,
    pub timestamp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchInput {
    pub phase: TouchPhase,
    pub x: f64,
    pub y: f64,
    pub pointer_count: u32,
    pub timestamp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedDelta {
    pub delta: f64,
    pub device: InputDevice,
    pub timestamp: f64,
}

#[derive(Debug, Clone)]
pub struct InputNormalizer {
    tuning: InputTuning,
    axis: Axis,
    viewport_extent: f64,
    last_touch: Option<f64>,
    /// Raw touch deltas, oldest first.
    recent: VecDeque<f64>,
}

impl InputNormalizer {
    pub fn new(tuning: InputTuning, axis: Axis, viewport_extent: f64) -> Self {
        Self {
            tuning,
            axis,
            viewport_extent,
            last_touch: None,
            recent: VecDeque::with_capacity(TOUCH_SMOOTHING_WINDOW),
        }
    }

    pub fn set_viewport_extent(&mut self, extent: f64) {
        self.viewport_extent = extent;
    }

    pub fn wheel(&self, input: &WheelInput) -> Option<NormalizedDelta> {
        if !input.delta_x.is_finite() || !input.delta_y.is_finite() {
            warn!(delta_x = input.delta_x, delta_y = input.delta_y, "dropping non-finite wheel delta");
            return None;
        }

        let (primary, cross) = if input.delta_y.abs() >= input.delta_x.abs() {
            (input.delta_y, input.delta_x)
        } else {
            (input.delta_x, input.delta_y)
        };

        let (unit, device) = match input.mode {
            DeltaMode::Line => (self.tuning.line_height, InputDevice::MouseWheel),
            DeltaMode::Page => (self.viewport_extent, InputDevice::MouseWheel),
            DeltaMode::Pixel => {
                if cross != 0.0 && primary.abs() <= self.tuning.trackpad_max_delta {
                    (1.0, InputDevice::Trackpad)
                } else {
                    (1.0, InputDevice::MouseWheel)
                }
            }
        };

        let multiplier = match device {
            InputDevice::Trackpad => self.tuning.trackpad_multiplier,
            _ => self.tuning.mouse_multiplier,
        };

        self.emit(primary * unit * multiplier, device, input.timestamp)
    }

    pub fn touch(&mut self, input: &TouchInput) -> Option<NormalizedDelta> {
        let coordinate = match self.axis {
            Axis::Horizontal => input.x,
            Axis::Vertical => input.y,
        };

        match input.phase {
            TouchPhase::Start => {
                self.recent.clear();
                self.last_touch = coordinate.is_finite().then_some(coordinate);
                None
            }
            TouchPhase::End => {
                self.recent.clear();
                self.last_touch = None;
                None
            }
            TouchPhase::Move => {
                if !coordinate.is_finite() {
                    warn!(coordinate, "dropping non-finite touch position");
                    return None;
                }
                if input.pointer_count > 1 {
                    return None;
                }
                let previous = self.last_touch.replace(coordinate)?;
                if self.recent.len() == TOUCH_SMOOTHING_WINDOW {
                    self.recent.pop_front();
                }
                self.recent.push_back(previous - coordinate);

                let smoothed = weighted_recent(&self.recent);
                self.emit(
                    smoothed * self.tuning.touch_multiplier,
                    InputDevice::Touch,
                    input.timestamp,
                )
            }
        }
    }

    fn emit(&self, delta: f64, device: InputDevice, timestamp: f64) -> Option<NormalizedDelta> {
        if delta.abs() < self.tuning.noise_floor {
            return None;
        }
        Some(NormalizedDelta {
            delta,
            device,
            timestamp,
        })
    }
}

/// Weighted mean with weights 1, 2, 3 from oldest to newest.
fn weighted_recent(recent: &VecDeque<f64>) -> f64 {
    let (sum, weights) = recent
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sum, weights), (i, delta)| {
            let weight = (i + 1) as f64;
            (sum + delta * weight, weights + weight)
        });
    if weights == 0.0 {
        0.0
    } else {
        sum / weights
    }
}
