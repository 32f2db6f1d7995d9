use proptest::prelude::*;
use scroll_choreo::{
    ChoreoConfig, Choreographer, DeltaMode, FrameOutcome, FrameRequest, GateState, Section,
    SectionKind, TouchInput, TouchPhase, WheelInput,
};

fn sections(count: usize) -> Vec<Section> {
    (0..count).map(|i| Section::new(i, SectionKind::Media)).collect()
}

fn open_engine(count: usize, extent: f64) -> Choreographer {
    let mut engine = Choreographer::new(ChoreoConfig::default(), sections(count), extent, 0.0).unwrap();
    assert!(engine.assets_ready());
    assert!(engine.entrance_complete());
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

fn touch(phase: TouchPhase, x: f64, timestamp: f64) -> TouchInput {
    TouchInput {
        phase,
        x,
        y: 0.0,
        pointer_count: 1,
        timestamp,
    }
}

fn settle(engine: &mut Choreographer, mut now: f64) -> f64 {
    let mut frames = 0;
    while engine.frame(now) == FrameOutcome::Continue {
        now += 16.0;
        frames += 1;
        assert!(frames < 1000, "animation never settled");
    }
    now
}

#[test]
fn fast_forward_flick_lands_on_last_section() {
    let mut engine = open_engine(3, 1000.0);

    let _ = engine.handle_touch(&touch(TouchPhase::Start, 2000.0, 0.0));
    let mut x = 2000.0;
    for i in 1..=5 {
        x -= 125.0;
        let _ = engine.handle_touch(&touch(TouchPhase::Move, x, f64::from(i) * 16.0));
    }
    let release = engine.handle_touch(&touch(TouchPhase::End, x, 84.0));
    assert_eq!(release, FrameRequest::AlreadyScheduled);
    assert_eq!(engine.state().target_offset(), 2000.0);
    assert!(engine.gesture().is_none());

    settle(&mut engine, 100.0);
    assert_eq!(engine.state().current_offset(), 2000.0);
    assert_eq!(engine.state().current_section_index(), 2);
}

#[test]
fn reversal_mid_animation_is_honored_next_frame() {
    let mut engine = open_engine(3, 1000.0);
    assert!(engine.scroll_to_section(1).needs_frame());

    let mut now = 0.0;
    while engine.state().current_offset() < 400.0 {
        assert_eq!(engine.frame(now), FrameOutcome::Continue);
        now += 16.0;
    }
    let before = engine.state().current_offset();
    assert_eq!(engine.state().target_offset(), 1000.0);

    assert_eq!(engine.handle_wheel(&wheel(-100.0, now)), FrameRequest::AlreadyScheduled);
    assert!(engine.state().target_offset() < before);

    assert_eq!(engine.frame(now + 16.0), FrameOutcome::Continue);
    assert!(engine.state().current_offset() < before);
}

/// Distance a burst of equal, evenly spaced events should travel: each
/// normalized delta boosted by its place in the streak.
fn boosted_travel(config: &ChoreoConfig, normalized: f64, events: u32) -> f64 {
    (0..events)
        .map(|streak| {
            let boost = (1.0 + f64::from(streak) * config.momentum.continue_boost).min(config.momentum.max_boost);
            normalized * boost
        })
        .sum()
}

#[test]
fn wheel_burst_during_motion_keeps_every_tick() {
    let mut engine = open_engine(5, 1000.0);
    let config = engine.config().clone();

    let mut now = 0.0;
    for _ in 0..5 {
        let _ = engine.handle_wheel(&wheel(100.0, now));
        assert_ne!(engine.frame(now + 8.0), FrameOutcome::Stale);
        now += 16.0;
    }
    settle(&mut engine, now);

    let expected = boosted_travel(&config, 100.0 * config.input.mouse_multiplier, 5);
    assert!(expected > 500.0);
    assert!((engine.state().current_offset() - expected).abs() < 1.0);
}

#[test]
fn trackpad_stream_travels_its_full_distance() {
    let mut engine = open_engine(5, 1000.0);
    let config = engine.config().clone();

    let mut now = 0.0;
    for _ in 0..30 {
        let _ = engine.handle_wheel(&WheelInput {
            delta_x: 1.0,
            delta_y: 8.0,
            mode: DeltaMode::Pixel,
            timestamp: now,
        });
        let _ = engine.frame(now + 8.0);
        now += 16.0;
    }
    settle(&mut engine, now);

    let expected = boosted_travel(&config, 8.0 * config.input.trackpad_multiplier, 30);
    assert!((engine.state().current_offset() - expected).abs() < 1.0);
}

#[test]
fn burst_past_the_end_stops_at_max() {
    let mut engine = open_engine(3, 1000.0);
    let mut now = 0.0;
    for _ in 0..20 {
        let _ = engine.handle_wheel(&wheel(300.0, now));
        let _ = engine.frame(now + 8.0);
        now += 16.0;
    }
    assert_eq!(engine.state().target_offset(), 2000.0);
    settle(&mut engine, now);
    assert_eq!(engine.state().current_offset(), 2000.0);
}

#[test]
fn overshoot_clamps_to_exact_max() {
    let mut engine = open_engine(3, 1000.0);
    let _ = engine.handle_wheel(&WheelInput {
        delta_x: 0.0,
        delta_y: 7000.0,
        mode: DeltaMode::Pixel,
        timestamp: 0.0,
    });
    assert_eq!(engine.state().target_offset(), 2000.0);
    settle(&mut engine, 16.0);
    assert_eq!(engine.state().current_offset(), 2000.0);
}

#[test]
fn section_target_converges_and_halts() {
    let mut engine = open_engine(4, 900.0);
    assert!(engine.scroll_to_section(1).needs_frame());
    let now = settle(&mut engine, 0.0);
    assert!((engine.state().current_offset() - 900.0).abs() < 0.5);
    assert!(!engine.state().is_animating());
    assert!(!engine.frame_pending());
    assert_eq!(engine.frame(now + 16.0), FrameOutcome::Stale);
}

#[test]
fn resize_shrink_reclamps_idle_offset() {
    let mut engine = open_engine(3, 1000.0);
    let _ = engine.scroll_to_section(2);
    settle(&mut engine, 0.0);

    let _ = engine.resize(600.0);
    assert_eq!(engine.state().max_offset(), 1200.0);
    assert_eq!(engine.state().current_offset(), 1200.0);
    assert_eq!(engine.state().current_section_index(), 2);
}

#[test]
fn resize_shrink_reclamps_moving_offset() {
    let mut engine = open_engine(3, 1000.0);
    let _ = engine.scroll_to_section(2);
    for i in 0..6 {
        let _ = engine.frame(f64::from(i) * 16.0);
    }
    assert!(engine.state().current_offset() > 600.0);

    let _ = engine.resize(300.0);
    assert!(engine.state().current_offset() <= 600.0);
    assert!(engine.state().target_offset() <= 600.0);
    settle(&mut engine, 200.0);
    assert_eq!(engine.state().current_offset(), 600.0);
}

#[test]
fn unmount_is_idempotent_and_final() {
    let mut engine = open_engine(3, 1000.0);
    assert!(engine.handle_wheel(&wheel(400.0, 0.0)).needs_frame());
    engine.unmount();
    engine.unmount();
    assert_eq!(engine.frame(16.0), FrameOutcome::Stale);
    assert_eq!(engine.frame(32.0), FrameOutcome::Stale);
    assert_eq!(engine.handle_wheel(&wheel(400.0, 48.0)), FrameRequest::Ignored);
}

#[test]
fn silent_entrance_falls_back_to_timeout() {
    let mut engine = Choreographer::new(ChoreoConfig::default(), sections(2), 1000.0, 500.0).unwrap();
    assert_eq!(engine.gate_state(), GateState::Blocked);
    assert!(!engine.poll_gate(1000.0));
    assert!(engine.poll_gate(500.0 + ChoreoConfig::default().gate.timeout_ms));
    assert_eq!(engine.gate_state(), GateState::Open);
    assert!(engine.handle_wheel(&wheel(200.0, 5000.0)).needs_frame());
}

#[test]
fn gate_hook_never_fires_after_unmount() {
    use std::cell::Cell;
    use std::rc::Rc;

    let fired = Rc::new(Cell::new(false));
    let mut engine = Choreographer::new(ChoreoConfig::default(), sections(2), 1000.0, 0.0).unwrap();
    let flag = fired.clone();
    engine.on_gate_open(move || flag.set(true));
    engine.unmount();
    assert!(!engine.entrance_complete());
    assert!(!engine.poll_gate(1e9));
    assert!(!fired.get());
}

#[derive(Debug, Clone)]
enum Op {
    Wheel(f64),
    Touch(TouchPhase, f64),
    Jump(usize),
    Resize(f64),
    Frame,
    SpuriousFrame,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-3000f64..3000.0).prop_map(Op::Wheel),
        (
            prop_oneof![
                Just(TouchPhase::Start),
                Just(TouchPhase::Move),
                Just(TouchPhase::End)
            ],
            0f64..2000.0
        )
            .prop_map(|(phase, x)| Op::Touch(phase, x)),
        (0usize..8).prop_map(Op::Jump),
        (200f64..2000.0).prop_map(Op::Resize),
        Just(Op::Frame),
        Just(Op::Frame),
        Just(Op::SpuriousFrame),
    ]
}

proptest! {
    #[test]
    fn offsets_stay_bounded_and_one_loop_runs(ops in prop::collection::vec(op(), 1..200)) {
        let mut engine = open_engine(5, 1000.0);
        let mut outstanding = 0u32;
        let mut now = 0.0;

        for op in ops {
            now += 8.0;
            let request = match op {
                Op::Wheel(delta) => Some(engine.handle_wheel(&wheel(delta, now))),
                Op::Touch(phase, x) => Some(engine.handle_touch(&touch(phase, x, now))),
                Op::Jump(index) => Some(engine.scroll_to_section(index)),
                Op::Resize(extent) => Some(engine.resize(extent)),
                Op::Frame => {
                    if outstanding == 1 {
                        outstanding = 0;
                        let outcome = engine.frame(now);
                        prop_assert_ne!(outcome, FrameOutcome::Stale);
                        if outcome == FrameOutcome::Continue {
                            outstanding = 1;
                        }
                    }
                    None
                }
                Op::SpuriousFrame => {
                    if outstanding == 0 {
                        prop_assert_eq!(engine.frame(now), FrameOutcome::Stale);
                    }
                    None
                }
            };

            if request == Some(FrameRequest::Schedule) {
                prop_assert_eq!(outstanding, 0);
                outstanding = 1;
            }
            prop_assert_eq!(engine.frame_pending(), outstanding == 1);

            let state = engine.state();
            prop_assert!(state.current_offset() >= 0.0);
            prop_assert!(state.current_offset() <= state.max_offset());
            prop_assert!(state.target_offset() >= 0.0);
            prop_assert!(state.target_offset() <= state.max_offset());
        }
    }
}
