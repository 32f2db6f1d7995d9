//! Tuning for one choreographer instance.
//!
//! Every constant in here is a feel default. Pages override what they need
//! and nothing downstream depends on the exact numbers, only on the ranges
//! checked by [`ChoreoConfig::validate`].

use serde::Deserialize;

use crate::error::{ChoreoError, Result};
use crate::input::InputDevice;

/// Primary scroll axis of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputTuning {
    /// Pixels per line for `DeltaMode::Line` wheels.
    pub line_height: f64,
    pub mouse_multiplier: f64,
    pub trackpad_multiplier: f64,
    pub touch_multiplier: f64,
    /// Largest per-event magnitude still considered a trackpad.
    pub trackpad_max_delta: f64,
    /// Normalized deltas below this are dropped.
    pub noise_floor: f64,
}

impl Default for InputTuning {
    fn default() -> Self {
        Self {
            line_height: 35.0,
            mouse_multiplier: 1.2,
            trackpad_multiplier: 0.7,
            touch_multiplier: 1.0,
            trackpad_max_delta: 10.0,
            noise_floor: 0.7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MomentumTuning {
    /// Gap after which the next event starts a fresh gesture.
    pub pause_ms: f64,
    /// Multiplier growth per same-direction event.
    pub continue_boost: f64,
    pub max_boost: f64,
    /// How long the release velocity is projected forward, per device.
    pub touch_window_ms: f64,
    pub trackpad_window_ms: f64,
    pub wheel_window_ms: f64,
    /// Hard bound on a single release.
    pub max_momentum: f64,
}

impl Default for MomentumTuning {
    fn default() -> Self {
        Self {
            pause_ms: 120.0,
            continue_boost: 0.15,
            max_boost: 2.5,
            touch_window_ms: 325.0,
            trackpad_window_ms: 120.0,
            wheel_window_ms: 60.0,
            max_momentum: 4000.0,
        }
    }
}

impl MomentumTuning {
    pub fn window_for(&self, device: InputDevice) -> f64 {
        match device {
            InputDevice::Touch => self.touch_window_ms,
            InputDevice::Trackpad => self.trackpad_window_ms,
            InputDevice::MouseWheel | InputDevice::Jump => self.wheel_window_ms,
        }
    }
}

/// Per-frame approach fraction by input device.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EasingProfile {
    pub trackpad: f64,
    pub touch: f64,
    pub wheel: f64,
    pub jump: f64,
    /// Snap distance in pixels.
    pub epsilon: f64,
}

impl Default for EasingProfile {
    fn default() -> Self {
        Self {
            trackpad: 0.08,
            touch: 0.12,
            wheel: 0.16,
            jump: 0.2,
            epsilon: 0.5,
        }
    }
}

impl EasingProfile {
    pub fn factor_for(&self, device: InputDevice) -> f64 {
        match device {
            InputDevice::Trackpad => self.trackpad,
            InputDevice::Touch => self.touch,
            InputDevice::MouseWheel => self.wheel,
            InputDevice::Jump => self.jump,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateTuning {
    /// Upper bound on waiting for the entrance reveal.
    pub timeout_ms: f64,
}

impl Default for GateTuning {
    fn default() -> Self {
        Self { timeout_ms: 4000.0 }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ChoreoConfig {
    pub axis: Axis,
    pub input: InputTuning,
    pub momentum: MomentumTuning,
    pub easing: EasingProfile,
    pub gate: GateTuning,
    /// Fraction of the section translate applied to parallax layers.
    pub parallax: f64,
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ChoreoError::InvalidTuning { field, value })
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ChoreoError::InvalidTuning { field, value })
    }
}

impl ChoreoConfig {
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let input = &self.input;
        positive("input.line_height", input.line_height)?;
        positive("input.mouse_multiplier", input.mouse_multiplier)?;
        positive("input.trackpad_multiplier", input.trackpad_multiplier)?;
        positive("input.touch_multiplier", input.touch_multiplier)?;
        positive("input.trackpad_max_delta", input.trackpad_max_delta)?;
        positive("input.noise_floor", input.noise_floor)?;

        let momentum = &self.momentum;
        positive("momentum.pause_ms", momentum.pause_ms)?;
        positive("momentum.touch_window_ms", momentum.touch_window_ms)?;
        positive("momentum.trackpad_window_ms", momentum.trackpad_window_ms)?;
        positive("momentum.wheel_window_ms", momentum.wheel_window_ms)?;
        positive("momentum.max_momentum", momentum.max_momentum)?;
        if !(momentum.continue_boost.is_finite() && momentum.continue_boost >= 0.0) {
            return Err(ChoreoError::InvalidTuning {
                field: "momentum.continue_boost",
                value: momentum.continue_boost,
            });
        }
        if !(momentum.max_boost.is_finite() && momentum.max_boost >= 1.0) {
            return Err(ChoreoError::InvalidTuning {
                field: "momentum.max_boost",
                value: momentum.max_boost,
            });
        }

        let easing = &self.easing;
        unit_interval("easing.trackpad", easing.trackpad)?;
        unit_interval("easing.touch", easing.touch)?;
        unit_interval("easing.wheel", easing.wheel)?;
        unit_interval("easing.jump", easing.jump)?;
        positive("easing.epsilon", easing.epsilon)?;

        positive("gate.timeout_ms", self.gate.timeout_ms)?;

        if !(self.parallax.is_finite() && (0.0..=1.0).contains(&self.parallax)) {
            return Err(ChoreoError::InvalidTuning {
                field: "parallax",
                value: self.parallax,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ChoreoConfig::default().validate().is_ok());
    }

    #[test]
    fn trackpad_eases_slower_than_wheel() {
        let easing = EasingProfile::default();
        assert!(easing.factor_for(InputDevice::Trackpad) < easing.factor_for(InputDevice::MouseWheel));
        assert!(easing.factor_for(InputDevice::MouseWheel) <= easing.factor_for(InputDevice::Jump));
    }

    #[test]
    fn rejects_ease_above_one() {
        let mut config = ChoreoConfig::default();
        config.easing.wheel = 1.5;
        match config.validate() {
            Err(ChoreoError::InvalidTuning { field, .. }) => assert_eq!(field, "easing.wheel"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ChoreoConfig =
            serde_json::from_str(r#"{ "axis": "vertical", "easing": { "wheel": 0.3 } }"#).unwrap();
        assert_eq!(config.axis, Axis::Vertical);
        assert_eq!(config.easing.wheel, 0.3);
        assert_eq!(config.easing.epsilon, 0.5);
        assert_eq!(config.input.line_height, 35.0);
    }
}
