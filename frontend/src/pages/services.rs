use scroll_choreo::{Axis, ChoreoConfig, Section, SectionChange, SectionKind};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::stage::{Preset, ScrollStage, SectionView};
use crate::pages::common::{set_document_title, SLIDE_STYLE};
use crate::Route;

pub fn config(axis: Axis) -> ChoreoConfig {
    let mut config = ChoreoConfig::default().with_axis(axis);
    config.parallax = 0.3;
    config.easing.trackpad = 0.06;
    config.easing.wheel = 0.14;
    config
}

struct Service {
    name: &'static str,
    pitch: &'static str,
    model: &'static str,
    background: &'static str,
}

const SERVICES: [Service; 4] = [
    Service {
        name: "Brand identity",
        pitch: "Names, marks and systems that hold up on a coffee cup and a billboard.",
        model: "/assets/services/identity-model.webp",
        background: "#111418",
    },
    Service {
        name: "Digital products",
        pitch: "Websites and apps designed and built by the same small team.",
        model: "/assets/services/digital-model.webp",
        background: "#1d2330",
    },
    Service {
        name: "Motion",
        pitch: "Launch films, product loops and the little movements in between.",
        model: "/assets/services/motion-model.webp",
        background: "#2b1f1a",
    },
    Service {
        name: "Spaces",
        pitch: "Signage and environments for the places people actually walk through.",
        model: "/assets/services/spaces-model.webp",
        background: "#efe9df",
    },
];

fn sections() -> Vec<Section> {
    SERVICES
        .iter()
        .enumerate()
        .map(|(i, service)| {
            Section::new(i, SectionKind::TextSection)
                .title(service.name)
                .body(service.pitch)
                .src(service.model)
                .background(service.background)
        })
        .collect()
}

/// Turns the model poster as its section slides through the viewport.
fn model_style(view: &SectionView) -> String {
    let turn = view.layout.parallax.clamp(-400.0, 400.0) / 10.0;
    format!(
        "{} rotate({:.2}deg); opacity: {:.3};",
        view.parallax_style().trim_end_matches(';'),
        turn,
        view.layout.opacity
    )
}

fn service_panel(view: &SectionView) -> Html {
    let content = &view.section.content;
    html! {
        <div class="service-panel">
            <div class="service-copy">
                <span class="service-number">{format!("{:02}", view.section.index + 1)}</span>
                <h2>{content.title.clone().unwrap_or_default()}</h2>
                <p>{content.body.clone().unwrap_or_default()}</p>
            </div>
            if let Some(src) = content.src.clone() {
                <img class="service-model" src={src} alt="" style={model_style(view)} />
            }
        </div>
    }
}

#[function_component(Services)]
pub fn services() -> Html {
    let sections = use_memo(|_| sections(), ());

    {
        use_effect_with_deps(
            move |_| {
                set_document_title("Services");
                || ()
            },
            (),
        );
    }

    let on_section_change = Callback::from(|change: SectionChange| {
        if let Some(service) = SERVICES.get(change.current) {
            set_document_title(&format!("Services: {}", service.name));
        }
    });

    let render = Callback::from(|view: SectionView| service_panel(&view));

    html! {
        <div class="services-page">
            <style>{SLIDE_STYLE}</style>
            <style>
                {r#"
                    .service-panel {
                        height: 100%;
                        display: grid;
                        grid-template-columns: 1fr 1fr;
                        align-items: center;
                        padding: 0 8vw;
                        gap: 4rem;
                    }
                    .service-number {
                        font-size: 0.9rem;
                        opacity: 0.5;
                    }
                    .service-copy h2 {
                        font-size: clamp(2.5rem, 6vw, 5.5rem);
                        margin: 0.5rem 0 1.5rem;
                    }
                    .service-copy p {
                        font-size: 1.2rem;
                        line-height: 1.6;
                        max-width: 30rem;
                        opacity: 0.8;
                    }
                    .service-model {
                        width: 100%;
                        max-height: 70vh;
                        object-fit: contain;
                        will-change: transform, opacity;
                    }
                    .services-cta {
                        position: fixed;
                        right: 2rem;
                        top: 6rem;
                        z-index: 10;
                        color: inherit;
                    }
                    body[data-tone="light"] .services-page {
                        color: #111;
                    }
                    @media (max-width: 768px) {
                        .service-panel {
                            grid-template-columns: 1fr;
                            gap: 2rem;
                        }
                        .service-model {
                            max-height: 35vh;
                        }
                    }
                "#}
            </style>
            <Link<Route> to={Route::Contact} classes="services-cta">
                {"Start a project"}
            </Link<Route>>
            <ScrollStage
                title={"What we do".to_string()}
                sections={sections}
                preset={Preset::Services}
                render={render}
                on_section_change={on_section_change}
            />
        </div>
    }
}
