use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{info, warn};
use scroll_choreo::{
    Axis, ChoreoConfig, Choreographer, DeltaMode, Direction, FrameOutcome, FrameRequest, Section,
    SectionChange, SectionKind, SectionLayout, TouchInput, TouchPhase, WheelInput,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

use crate::components::boundary::Fallback;
use crate::components::entrance::EntranceReveal;
use crate::components::listener::Listener;
use crate::config;
use crate::pages;

/// Which page's tuning a stage runs with.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Preset {
    About,
    Categories,
    Gallery,
    Services,
}

impl Preset {
    fn config(self, axis: Axis) -> ChoreoConfig {
        match self {
            Preset::About => pages::about::config(axis),
            Preset::Categories => pages::projects::config(axis),
            Preset::Gallery => pages::project::config(axis),
            Preset::Services => pages::services::config(axis),
        }
    }
}

/// Everything a page needs to render one section.
#[derive(Clone, PartialEq)]
pub struct SectionView {
    pub section: Section,
    pub layout: SectionLayout,
    pub axis: Axis,
}

impl SectionView {
    /// Style for a section's inner media layer.
    pub fn parallax_style(&self) -> String {
        translate(self.axis, self.layout.parallax)
    }
}

#[derive(Properties, PartialEq)]
pub struct ScrollStageProps {
    pub title: String,
    pub sections: Rc<Vec<Section>>,
    pub preset: Preset,
    pub render: Callback<SectionView, Html>,
    #[prop_or_default]
    pub on_section_change: Callback<SectionChange>,
    #[prop_or_default]
    pub poster: Option<String>,
    #[prop_or_default]
    pub class: Classes,
}

#[derive(Clone, PartialEq, Default)]
struct Snapshot {
    layout: Vec<SectionLayout>,
    index: usize,
    progress: f64,
}

#[derive(Default)]
struct EntranceSignals {
    ready: bool,
    complete: bool,
}

/// Owns one page's engine and its animation frame.
struct StageDriver {
    engine: RefCell<Choreographer>,
    raf: Cell<Option<i32>>,
    frame: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    publish: Callback<Snapshot>,
}

impl StageDriver {
    fn new(engine: Choreographer, publish: Callback<Snapshot>) -> Rc<Self> {
        let driver = Rc::new(Self {
            engine: RefCell::new(engine),
            raf: Cell::new(None),
            frame: RefCell::new(None),
            publish,
        });

        // A Weak keeps late frames from touching a torn-down page.
        let weak = Rc::downgrade(&driver);
        let frame = Closure::wrap(Box::new(move |timestamp: f64| {
            if let Some(driver) = weak.upgrade() {
                driver.on_frame(timestamp);
            }
        }) as Box<dyn FnMut(f64)>);
        *driver.frame.borrow_mut() = Some(frame);

        driver.publish();
        driver
    }

    fn publish(&self) {
        let snapshot = {
            let engine = self.engine.borrow();
            Snapshot {
                layout: engine.layout(),
                index: engine.state().current_section_index(),
                progress: engine.state().progress(),
            }
        };
        self.publish.emit(snapshot);
    }

    fn drive(&self, input: impl FnOnce(&mut Choreographer) -> FrameRequest) -> FrameRequest {
        let request = input(&mut self.engine.borrow_mut());
        if request.needs_frame() {
            self.request_frame();
        }
        request
    }

    fn request_frame(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(frame) = self.frame.borrow().as_ref() {
            match window.request_animation_frame(frame.as_ref().unchecked_ref()) {
                Ok(id) => self.raf.set(Some(id)),
                Err(e) => warn!("requestAnimationFrame failed: {:?}", e),
            }
        }
    }

    fn on_frame(&self, timestamp: f64) {
        self.raf.set(None);
        let outcome = self.engine.borrow_mut().frame(timestamp);
        match outcome {
            FrameOutcome::Stale => return,
            FrameOutcome::Continue => self.request_frame(),
            FrameOutcome::Idle => {}
        }
        self.publish();
    }

    fn teardown(&self) {
        if let Some(id) = self.raf.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.engine.borrow_mut().unmount();
        self.frame.borrow_mut().take();
    }
}

fn device_axis() -> Axis {
    let width = web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(config::MOBILE_BREAKPOINT);
    if width < config::MOBILE_BREAKPOINT {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}

fn viewport_extent(axis: Axis) -> f64 {
    let window = match web_sys::window() {
        Some(window) => window,
        None => return 0.0,
    };
    let extent = match axis {
        Axis::Horizontal => window.inner_width(),
        Axis::Vertical => window.inner_height(),
    };
    extent.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

fn translate(axis: Axis, px: f64) -> String {
    match axis {
        Axis::Horizontal => format!("transform: translate3d({:.2}px, 0, 0);", px),
        Axis::Vertical => format!("transform: translate3d(0, {:.2}px, 0);", px),
    }
}

fn section_style(axis: Axis, layout: &SectionLayout, kind: SectionKind) -> String {
    let mut style = translate(axis, layout.translate);
    if matches!(kind, SectionKind::Text | SectionKind::TextSection) {
        style.push_str(&format!(" opacity: {:.3};", layout.opacity));
    }
    style
}

/// Rough perceived brightness of a `#rgb` / `#rrggbb` colour.
fn is_dark(color: &str) -> bool {
    let hex = color.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return true;
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return true,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map(f64::from);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => (0.299 * r + 0.587 * g + 0.114 * b) / 255.0 < 0.5,
        _ => true,
    }
}

fn apply_background(color: &str) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let _ = body.style().set_property("background-color", color);
    let _ = body.set_attribute("data-tone", if is_dark(color) { "dark" } else { "light" });
}

fn touch_input(event: &TouchEvent, phase: TouchPhase) -> Option<TouchInput> {
    let touches = event.touches();
    let point = match phase {
        TouchPhase::End => event.changed_touches().get(0),
        _ => touches.get(0),
    }?;
    Some(TouchInput {
        phase,
        x: f64::from(point.client_x()),
        y: f64::from(point.client_y()),
        pointer_count: touches.length(),
        timestamp: event.time_stamp(),
    })
}

fn attach_listeners(
    driver: &Rc<StageDriver>,
    axis: Axis,
    axis_handle: UseStateHandle<Axis>,
    resume: Rc<RefCell<Option<usize>>>,
) -> Vec<Listener> {
    let Some(window) = web_sys::window() else {
        return Vec::new();
    };
    let target: EventTarget = window.into();
    let mut listeners = Vec::new();

    {
        let weak = Rc::downgrade(driver);
        listeners.push(Listener::new(&target, "wheel", false, move |event: Event| {
            let Some(driver) = weak.upgrade() else { return };
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else { return };
            let input = WheelInput {
                delta_x: wheel.delta_x(),
                delta_y: wheel.delta_y(),
                mode: DeltaMode::from_dom(wheel.delta_mode()),
                timestamp: event.time_stamp(),
            };
            if driver.drive(|engine| engine.handle_wheel(&input)).consumed() {
                event.prevent_default();
            }
        }));
    }

    for (name, phase) in [
        ("touchstart", TouchPhase::Start),
        ("touchmove", TouchPhase::Move),
        ("touchend", TouchPhase::End),
        ("touchcancel", TouchPhase::End),
    ] {
        let weak = Rc::downgrade(driver);
        listeners.push(Listener::new(&target, name, false, move |event: Event| {
            let Some(driver) = weak.upgrade() else { return };
            let Some(input) = event
                .dyn_ref::<TouchEvent>()
                .and_then(|touch| touch_input(touch, phase))
            else {
                return;
            };
            let consumed = driver.drive(|engine| engine.handle_touch(&input)).consumed();
            if consumed && phase == TouchPhase::Move {
                event.prevent_default();
            }
        }));
    }

    {
        let weak = Rc::downgrade(driver);
        listeners.push(Listener::new(&target, "keydown", true, move |event: Event| {
            let Some(driver) = weak.upgrade() else { return };
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else { return };
            let _ = match key.key().as_str() {
                "ArrowRight" | "ArrowDown" | "PageDown" => {
                    driver.drive(|engine| engine.step_section(Direction::Forward))
                }
                "ArrowLeft" | "ArrowUp" | "PageUp" => {
                    driver.drive(|engine| engine.step_section(Direction::Backward))
                }
                "Home" => driver.drive(|engine| engine.scroll_to_section(0)),
                "End" => driver.drive(|engine| {
                    let last = engine.sections().len() - 1;
                    engine.scroll_to_section(last)
                }),
                _ => return,
            };
        }));
    }

    {
        let weak = Rc::downgrade(driver);
        listeners.push(Listener::new(&target, "resize", true, move |_: Event| {
            let Some(driver) = weak.upgrade() else { return };
            let next = device_axis();
            if next != axis {
                info!("device class changed, rebuilding stage on {:?} axis", next);
                let index = driver.engine.borrow().state().current_section_index();
                *resume.borrow_mut() = Some(index);
                axis_handle.set(next);
                return;
            }
            let _ = driver.drive(|engine| engine.resize(viewport_extent(axis)));
            driver.publish();
        }));
    }

    listeners
}

/// One scroll-choreographed page: entrance reveal, section track and
/// indicator, driven by a single [`Choreographer`].
#[function_component(ScrollStage)]
pub fn scroll_stage(props: &ScrollStageProps) -> Html {
    let axis = use_state(device_axis);
    let snapshot = use_state(Snapshot::default);
    let entrance_done = use_state(|| false);
    let failure = use_state(|| None::<String>);
    let driver_slot = use_mut_ref(|| None::<Rc<StageDriver>>);
    let signals = use_mut_ref(EntranceSignals::default);
    let resume = use_mut_ref(|| None::<usize>);

    {
        let axis_handle = axis.clone();
        let snapshot = snapshot.clone();
        let entrance_done = entrance_done.clone();
        let failure = failure.clone();
        let driver_slot = driver_slot.clone();
        let signals = signals.clone();
        let resume = resume.clone();
        let on_section_change = props.on_section_change.clone();
        use_effect_with_deps(
            move |(axis, sections, preset)| {
                let axis = *axis;
                let engine = Choreographer::new(
                    preset.config(axis),
                    (**sections).clone(),
                    viewport_extent(axis),
                    config::now(),
                );
                let destructor: Box<dyn FnOnce()> = match engine {
                    Ok(mut engine) => {
                        // Section the previous axis's engine was on.
                        if let Some(index) = resume.borrow_mut().take() {
                            engine.snap_to_section(index);
                        }
                        if let Some(color) = engine.current_section().background_color.clone() {
                            apply_background(&color);
                        }
                        engine.add_hook(move |change: &SectionChange| {
                            if let Some(color) = &change.background_color {
                                apply_background(color);
                            }
                            on_section_change.emit(change.clone());
                        });
                        engine.on_gate_open(move || entrance_done.set(true));

                        let publish = Callback::from(move |next: Snapshot| snapshot.set(next));
                        let driver = StageDriver::new(engine, publish);

                        // Signals that arrived before this engine existed.
                        {
                            let signals = signals.borrow();
                            let mut engine = driver.engine.borrow_mut();
                            if signals.ready {
                                engine.assets_ready();
                            }
                            if signals.complete {
                                engine.entrance_complete();
                            }
                        }

                        let gate_timer = {
                            let weak = Rc::downgrade(&driver);
                            let wait = (driver.engine.borrow().gate_deadline() - config::now()).max(0.0);
                            Timeout::new(wait.ceil() as u32, move || {
                                if let Some(driver) = weak.upgrade() {
                                    if driver.engine.borrow_mut().poll_gate(config::now()) {
                                        driver.publish();
                                    }
                                }
                            })
                        };

                        let listeners = attach_listeners(&driver, axis, axis_handle, resume);
                        *driver_slot.borrow_mut() = Some(driver.clone());

                        Box::new(move || {
                            drop(listeners);
                            drop(gate_timer);
                            driver.teardown();
                            driver_slot.borrow_mut().take();
                        })
                    }
                    Err(e) => {
                        warn!("could not start scroll stage: {}", e);
                        failure.set(Some(e.to_string()));
                        Box::new(|| ())
                    }
                };
                destructor
            },
            (*axis, props.sections.clone(), props.preset),
        );
    }

    let on_ready = {
        let driver_slot = driver_slot.clone();
        let signals = signals.clone();
        Callback::from(move |_: ()| {
            signals.borrow_mut().ready = true;
            if let Some(driver) = driver_slot.borrow().as_ref() {
                driver.engine.borrow_mut().assets_ready();
            }
        })
    };

    let on_complete = {
        let driver_slot = driver_slot.clone();
        let signals = signals.clone();
        Callback::from(move |_: ()| {
            signals.borrow_mut().complete = true;
            if let Some(driver) = driver_slot.borrow().as_ref() {
                if driver.engine.borrow_mut().entrance_complete() {
                    driver.publish();
                }
            }
        })
    };

    if let Some(message) = (*failure).clone() {
        return html! { <Fallback message={message} /> };
    }

    let axis = *axis;
    let axis_class = match axis {
        Axis::Horizontal => "horizontal",
        Axis::Vertical => "vertical",
    };

    let sections = snapshot.layout.iter().zip(props.sections.iter()).map(|(layout, section)| {
        let view = SectionView {
            section: section.clone(),
            layout: *layout,
            axis,
        };
        html! {
            <div
                key={layout.index.to_string()}
                class={classes!("stage-section", layout.active.then(|| "active"))}
                style={section_style(axis, layout, section.kind)}
            >
                { props.render.emit(view) }
            </div>
        }
    });

    let dots = (0..props.sections.len()).map(|index| {
        let driver_slot = driver_slot.clone();
        let onclick = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(driver) = driver_slot.borrow().as_ref() {
                let _ = driver.drive(|engine| engine.scroll_to_section(index));
            }
        });
        html! {
            <button
                key={index.to_string()}
                class={classes!("stage-dot", (index == snapshot.index).then(|| "current"))}
                aria-label={format!("Go to section {}", index + 1)}
                onclick={onclick}
            />
        }
    });

    html! {
        <div class={classes!("scroll-stage", axis_class, props.class.clone())}>
            <style>
                {r#"
                    .scroll-stage {
                        position: fixed;
                        inset: 0;
                        overflow: hidden;
                        transition: background-color 0.6s ease;
                    }
                    .stage-section {
                        position: absolute;
                        inset: 0;
                        will-change: transform, opacity;
                        backface-visibility: hidden;
                    }
                    .stage-indicator {
                        position: fixed;
                        right: 2rem;
                        top: 50%;
                        transform: translateY(-50%);
                        display: flex;
                        flex-direction: column;
                        gap: 0.75rem;
                        z-index: 10;
                    }
                    .scroll-stage.horizontal .stage-indicator {
                        top: auto;
                        bottom: 2rem;
                        right: 50%;
                        transform: translateX(50%);
                        flex-direction: row;
                    }
                    .stage-dot {
                        width: 10px;
                        height: 10px;
                        border-radius: 50%;
                        border: 1px solid currentColor;
                        background: transparent;
                        opacity: 0.5;
                        cursor: pointer;
                        padding: 0;
                    }
                    .stage-dot.current {
                        background: currentColor;
                        opacity: 1;
                    }
                    .stage-progress {
                        position: fixed;
                        left: 0;
                        bottom: 0;
                        width: 100%;
                        height: 2px;
                        background: currentColor;
                        transform-origin: left;
                        z-index: 10;
                    }
                    @media (max-width: 768px) {
                        .stage-indicator {
                            right: 1rem;
                        }
                    }
                "#}
            </style>
            <EntranceReveal
                title={props.title.clone()}
                poster={props.poster.clone()}
                on_ready={on_ready}
                on_complete={on_complete}
                done={*entrance_done}
            />
            <div class="stage-track">
                { for sections }
            </div>
            <nav class="stage-indicator">
                { for dots }
            </nav>
            <div class="stage-progress" style={format!("transform: scaleX({:.4});", snapshot.progress)}></div>
        </div>
    }
}
