use std::rc::Rc;

use scroll_choreo::{Axis, ChoreoConfig, SectionChange};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::stage::{Preset, ScrollStage, SectionView};
use crate::data::Catalog;
use crate::pages::common::{set_document_title, SLIDE_STYLE};
use crate::Route;

pub fn config(axis: Axis) -> ChoreoConfig {
    let mut config = ChoreoConfig::default().with_axis(axis);
    config.parallax = 0.1;
    config.easing.jump = 0.16;
    config
}

#[derive(Properties, PartialEq)]
pub struct ProjectsProps {
    pub catalog: Rc<Catalog>,
}

#[function_component(Projects)]
pub fn projects(props: &ProjectsProps) -> Html {
    let active = use_state(|| 0usize);
    let sections = {
        let catalog = props.catalog.clone();
        use_memo(move |_| catalog.category_sections(), props.catalog.clone())
    };

    {
        use_effect_with_deps(
            move |_| {
                set_document_title("Work");
                || ()
            },
            (),
        );
    }

    let on_section_change = {
        let active = active.clone();
        let catalog = props.catalog.clone();
        Callback::from(move |change: SectionChange| {
            active.set(change.current);
            if let Some(category) = catalog.categories.get(change.current) {
                set_document_title(&format!("Work: {}", category.title));
            }
        })
    };

    let render = {
        let catalog = props.catalog.clone();
        Callback::from(move |view: SectionView| {
            let Some(category) = catalog.categories.get(view.section.index) else {
                return html! {};
            };
            html! {
                <div class="category-panel">
                    <div class="category-heading" style={view.parallax_style()}>
                        <h2>{&category.title}</h2>
                        <p>{&category.blurb}</p>
                    </div>
                    <ul class="category-projects">
                        { for catalog.projects_in(&category.slug).map(|project| html! {
                            <li key={project.slug.clone()}>
                                <Link<Route> to={Route::Project { slug: project.slug.clone() }} classes="project-card">
                                    <img src={project.cover.clone()} alt={project.name.clone()} loading="lazy" />
                                    <span class="project-name">{&project.name}</span>
                                    <span class="project-summary">{&project.summary}</span>
                                </Link<Route>>
                            </li>
                        }) }
                    </ul>
                </div>
            }
        })
    };

    html! {
        <div class="projects-page">
            <style>{SLIDE_STYLE}</style>
            <style>
                {r#"
                    .category-tabs {
                        position: fixed;
                        top: 6rem;
                        left: 2rem;
                        z-index: 10;
                        display: flex;
                        gap: 1.5rem;
                        list-style: none;
                        padding: 0;
                    }
                    .category-tabs li {
                        opacity: 0.45;
                        transition: opacity 0.3s ease;
                    }
                    .category-tabs li.current {
                        opacity: 1;
                    }
                    .category-panel {
                        height: 100%;
                        display: flex;
                        flex-direction: column;
                        justify-content: center;
                        padding: 0 8vw;
                        gap: 3rem;
                    }
                    .category-heading h2 {
                        font-size: clamp(3rem, 9vw, 8rem);
                        margin: 0;
                    }
                    .category-projects {
                        display: grid;
                        grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
                        gap: 2rem;
                        list-style: none;
                        padding: 0;
                    }
                    .project-card {
                        display: flex;
                        flex-direction: column;
                        gap: 0.5rem;
                        color: inherit;
                        text-decoration: none;
                    }
                    .project-card img {
                        width: 100%;
                        aspect-ratio: 4 / 3;
                        object-fit: cover;
                        border-radius: 8px;
                    }
                    .project-summary {
                        opacity: 0.6;
                        font-size: 0.9rem;
                    }
                    body[data-tone="light"] .projects-page {
                        color: #111;
                    }
                "#}
            </style>
            <ul class="category-tabs">
                { for props.catalog.categories.iter().enumerate().map(|(i, category)| html! {
                    <li key={category.slug.clone()} class={classes!((i == *active).then(|| "current"))}>
                        {&category.title}
                    </li>
                }) }
            </ul>
            <ScrollStage
                title={"Selected work".to_string()}
                sections={sections}
                preset={Preset::Categories}
                render={render}
                on_section_change={on_section_change}
            />
        </div>
    }
}
