//! Scroll choreography for section-paged pages.
//!
//! Wheel and touch input is normalized, boosted by the gesture's momentum
//! regime, resolved into a bounded target offset and eased toward it one
//! animation frame at a time. The engine has no DOM dependency: the host
//! forwards events, owns the animation-frame primitive and renders from
//! [`Choreographer::layout`].

pub mod animator;
pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod input;
pub mod layout;
pub mod momentum;
pub mod section;
pub mod state;
pub mod target;
pub mod tracker;

pub use config::{Axis, ChoreoConfig};
pub use engine::{Choreographer, Direction, FrameOutcome, FrameRequest};
pub use error::ChoreoError;
pub use gate::GateState;
pub use input::{DeltaMode, InputDevice, TouchInput, TouchPhase, WheelInput};
pub use layout::SectionLayout;
pub use section::{parse_sections, Section, SectionKind};
pub use state::ScrollState;
pub use target::resolve_target;
pub use tracker::{SectionChange, SectionHooks};
