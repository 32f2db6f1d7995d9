use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::common::set_document_title;
use crate::Route;

#[function_component(Home)]
pub fn home() -> Html {
    {
        use_effect_with_deps(
            move |_| {
                set_document_title("Independent design studio");
                if let Some(body) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.body())
                {
                    let _ = body.style().set_property("background-color", "#0b0b0b");
                    let _ = body.set_attribute("data-tone", "dark");
                }
                || ()
            },
            (),
        );
    }

    html! {
        <div class="landing-page">
            <style>
                {r#"
                    .landing-page {
                        min-height: 100vh;
                        display: flex;
                        flex-direction: column;
                        justify-content: flex-end;
                        padding: 0 8vw 10vh;
                        color: #f2ede4;
                    }
                    .landing-page h1 {
                        font-size: clamp(3rem, 10vw, 9rem);
                        line-height: 0.95;
                        margin: 0 0 2rem;
                    }
                    .landing-page p {
                        font-size: 1.25rem;
                        max-width: 34rem;
                        opacity: 0.75;
                        margin: 0 0 3rem;
                    }
                    .landing-links {
                        display: flex;
                        flex-wrap: wrap;
                        gap: 2rem;
                    }
                    .landing-links .forward-link {
                        color: inherit;
                        font-size: 1.1rem;
                        text-decoration: none;
                        border-bottom: 1px solid currentColor;
                        padding-bottom: 0.2rem;
                    }
                "#}
            </style>
            <h1>{"Northlight"}<br />{"Studio"}</h1>
            <p>{"Brand, digital and motion work for companies that would rather be remembered than noticed."}</p>
            <div class="landing-links">
                <Link<Route> to={Route::Projects} classes="forward-link">{"See the work"}</Link<Route>>
                <Link<Route> to={Route::About} classes="forward-link">{"Meet the studio"}</Link<Route>>
                <Link<Route> to={Route::Services} classes="forward-link">{"What we do"}</Link<Route>>
                <Link<Route> to={Route::Contact} classes="forward-link">{"Start a project"}</Link<Route>>
            </div>
        </div>
    }
}
