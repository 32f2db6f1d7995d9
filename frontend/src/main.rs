use std::rc::Rc;

use log::{info, Level};
use web_sys::MouseEvent;
use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::prelude::*;

mod config;
mod data;
mod components {
    pub mod boundary;
    pub mod entrance;
    pub mod listener;
    pub mod stage;
    pub mod transition;
}
mod pages {
    pub mod about;
    pub mod careers;
    pub mod common;
    pub mod contact;
    pub mod forms;
    pub mod home;
    pub mod project;
    pub mod projects;
    pub mod services;
}

use components::boundary::{contain, Fallback, PageError};
use components::transition::PageTransition;
use data::Catalog;
use pages::{
    about::About, careers::Careers, contact::Contact, home::Home, projects::Projects,
    services::Services,
};

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/about")]
    About,
    #[at("/projects")]
    Projects,
    #[at("/projects/:slug")]
    Project { slug: String },
    #[at("/services")]
    Services,
    #[at("/contact")]
    Contact,
    #[at("/careers")]
    Careers,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    fn page_name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Projects => "Projects",
            Route::Project { .. } => "Project",
            Route::Services => "Services",
            Route::Contact => "Contact",
            Route::Careers => "Careers",
            Route::NotFound => "NotFound",
        }
    }
}

fn render_route(route: &Route) -> Result<Html, PageError> {
    Ok(match route {
        Route::Home => html! { <Home /> },
        Route::About => html! { <About /> },
        Route::Projects => {
            let catalog = Rc::new(Catalog::load()?);
            html! { <Projects catalog={catalog} /> }
        }
        Route::Project { slug } => return pages::project::render(slug),
        Route::Services => html! { <Services /> },
        Route::Contact => html! { <Contact /> },
        Route::Careers => html! { <Careers /> },
        Route::NotFound => html! {
            <Fallback message={"That page does not exist.".to_string()} />
        },
    })
}

fn switch(route: Route) -> Html {
    let page = route.page_name();
    info!("Rendering {} page", page);
    contain(page, render_route(&route))
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let (width, _) = use_window_size();
    let compact = width < config::MOBILE_BREAKPOINT;

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    let links = [
        (Route::Projects, "Work"),
        (Route::About, "About"),
        (Route::Services, "Services"),
        (Route::Careers, "Careers"),
        (Route::Contact, "Contact"),
    ];

    let menu_class = classes!(
        "nav-right",
        (compact && *menu_open).then(|| "mobile-menu-open"),
        (compact && !*menu_open).then(|| "collapsed")
    );

    html! {
        <nav class="top-nav">
            <style>
                {r#"
                    .top-nav {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 40;
                        padding: 1.5rem 2rem;
                        mix-blend-mode: difference;
                        color: #fff;
                    }
                    .nav-content {
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                    }
                    .nav-logo,
                    .nav-link {
                        color: inherit;
                        text-decoration: none;
                    }
                    .nav-logo {
                        font-weight: 700;
                        letter-spacing: 0.05em;
                    }
                    .nav-right {
                        display: flex;
                        gap: 2rem;
                    }
                    .nav-right.collapsed {
                        display: none;
                    }
                    .nav-right.mobile-menu-open {
                        position: fixed;
                        inset: 4.5rem 0 auto 0;
                        flex-direction: column;
                        padding: 2rem;
                        background: #111;
                        mix-blend-mode: normal;
                    }
                    .burger-menu {
                        display: flex;
                        flex-direction: column;
                        gap: 5px;
                        background: none;
                        border: none;
                        cursor: pointer;
                    }
                    .burger-menu span {
                        width: 22px;
                        height: 2px;
                        background: #fff;
                    }
                "#}
            </style>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"Northlight"}
                </Link<Route>>
                if compact {
                    <button class="burger-menu" onclick={toggle_menu} aria-label="Menu">
                        <span></span>
                        <span></span>
                        <span></span>
                    </button>
                }
                <div class={menu_class}>
                    { for links.into_iter().map(|(route, label)| html! {
                        <div onclick={close_menu.clone()}>
                            <Link<Route> to={route} classes="nav-link">
                                {label}
                            </Link<Route>>
                        </div>
                    }) }
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <PageTransition>
                <Switch<Route> render={switch} />
            </PageTransition>
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");
    tracing_wasm::set_as_global_default();

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
