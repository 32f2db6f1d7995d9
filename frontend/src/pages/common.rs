use scroll_choreo::SectionKind;
use yew::prelude::*;

use crate::components::stage::SectionView;

pub fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(&format!("{} | Northlight Studio", title));
    }
}

/// Default rendering for a section of the shared data contract.
pub fn slide(view: &SectionView) -> Html {
    let content = &view.section.content;
    let src = content.src.clone().unwrap_or_default();
    match view.section.kind {
        SectionKind::Media => html! {
            <figure class="slide slide-media">
                <img src={src} alt={content.title.clone().unwrap_or_default()} loading="lazy" style={view.parallax_style()} />
            </figure>
        },
        SectionKind::Video => html! {
            <figure class="slide slide-media">
                <video src={src} autoplay=true muted=true loop=true playsinline=true style={view.parallax_style()}></video>
            </figure>
        },
        SectionKind::Text | SectionKind::TextSection => html! {
            <div class={classes!("slide", "slide-text", (view.section.kind == SectionKind::TextSection).then(|| "wide"))}>
                if let Some(title) = content.title.clone() {
                    <h2>{title}</h2>
                }
                if let Some(body) = content.body.clone() {
                    <p>{body}</p>
                }
            </div>
        },
        SectionKind::Opaque => html! {
            <div class="slide slide-empty"></div>
        },
    }
}

pub const SLIDE_STYLE: &str = r#"
    .slide {
        width: 100%;
        height: 100%;
        display: flex;
        align-items: center;
        justify-content: center;
        overflow: hidden;
        margin: 0;
    }
    .slide-media img,
    .slide-media video {
        width: 110%;
        height: 110%;
        object-fit: cover;
        will-change: transform;
    }
    .slide-text {
        flex-direction: column;
        padding: 0 12vw;
        text-align: left;
        align-items: flex-start;
    }
    .slide-text h2 {
        font-size: clamp(2rem, 5vw, 4.5rem);
        margin-bottom: 1.5rem;
    }
    .slide-text p {
        font-size: 1.25rem;
        line-height: 1.6;
        max-width: 36rem;
        opacity: 0.8;
    }
    .slide-text.wide p {
        max-width: 52rem;
    }
    body[data-tone="light"] .slide-text {
        color: #111;
    }
"#;
