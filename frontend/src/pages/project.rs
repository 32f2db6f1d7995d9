use std::rc::Rc;

use scroll_choreo::{Axis, ChoreoConfig, ChoreoError, Section, SectionKind};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::boundary::PageError;
use crate::components::stage::{Preset, ScrollStage, SectionView};
use crate::data::{Catalog, Project};
use crate::pages::common::{set_document_title, slide, SLIDE_STYLE};
use crate::Route;

pub fn config(axis: Axis) -> ChoreoConfig {
    let mut config = ChoreoConfig::default().with_axis(axis);
    config.parallax = 0.25;
    config.momentum.max_boost = 2.0;
    config
}

/// Resolves a project slug into its gallery page.
pub fn render(slug: &str) -> Result<Html, PageError> {
    let catalog = Catalog::load()?;
    let project = catalog.project(slug)?.clone();
    let gallery = project.gallery()?;
    if gallery.is_empty() {
        return Err(ChoreoError::NoSections.into());
    }
    Ok(html! {
        <ProjectGallery project={project} sections={Rc::new(gallery)} />
    })
}

#[derive(Properties, PartialEq)]
pub struct ProjectGalleryProps {
    pub project: Project,
    pub sections: Rc<Vec<Section>>,
}

#[function_component(ProjectGallery)]
pub fn project_gallery(props: &ProjectGalleryProps) -> Html {
    {
        let name = props.project.name.clone();
        use_effect_with_deps(
            move |name| {
                set_document_title(name);
                || ()
            },
            name,
        );
    }

    let poster = props
        .sections
        .iter()
        .find(|s| s.kind == SectionKind::Media)
        .and_then(|s| s.content.src.clone())
        .or_else(|| Some(props.project.cover.clone()));

    let render = Callback::from(|view: SectionView| slide(&view));

    html! {
        <div class="project-page">
            <style>{SLIDE_STYLE}</style>
            <style>
                {r#"
                    .project-meta {
                        position: fixed;
                        top: 6rem;
                        left: 2rem;
                        z-index: 10;
                        display: flex;
                        flex-direction: column;
                        gap: 0.25rem;
                    }
                    .project-meta .back-link {
                        color: inherit;
                        opacity: 0.6;
                        text-decoration: none;
                        font-size: 0.85rem;
                    }
                    .project-meta h1 {
                        margin: 0;
                        font-size: 1.5rem;
                    }
                    body[data-tone="light"] .project-page {
                        color: #111;
                    }
                "#}
            </style>
            <div class="project-meta">
                <Link<Route> to={Route::Projects} classes="back-link">
                    {"← All work"}
                </Link<Route>>
                <h1>{&props.project.name}</h1>
            </div>
            <ScrollStage
                title={props.project.name.clone()}
                sections={props.sections.clone()}
                preset={Preset::Gallery}
                render={render}
                poster={poster}
            />
        </div>
    }
}
