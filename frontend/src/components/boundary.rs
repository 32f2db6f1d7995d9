use log::error;
use scroll_choreo::ChoreoError;
use thiserror::Error;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("there is no project called \"{0}\"")]
    UnknownProject(String),

    #[error("page content could not be prepared: {0}")]
    Content(#[from] ChoreoError),

    #[error("catalog data is malformed: {0}")]
    Catalog(#[from] serde_json::Error),
}

/// Renders a route's result, swapping failures for the fallback view.
pub fn contain(page: &'static str, rendered: Result<Html, PageError>) -> Html {
    match rendered {
        Ok(html) => html,
        Err(e) => {
            error!("{} page failed: {}", page, e);
            html! { <Fallback message={e.to_string()} /> }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct FallbackProps {
    pub message: String,
}

#[function_component(Fallback)]
pub fn fallback(props: &FallbackProps) -> Html {
    html! {
        <div class="fallback-page">
            <style>
                {r#"
                    .fallback-page {
                        min-height: 100vh;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        gap: 1.5rem;
                        padding: 2rem;
                        text-align: center;
                    }
                    .fallback-page h1 {
                        font-size: 2.5rem;
                    }
                    .fallback-page p {
                        color: rgba(255, 255, 255, 0.6);
                        max-width: 32rem;
                    }
                "#}
            </style>
            <h1>{"Something slipped."}</h1>
            <p>{&props.message}</p>
            <Link<Route> to={Route::Home} classes="forward-link">
                {"Back to the start"}
            </Link<Route>>
        </div>
    }
}
