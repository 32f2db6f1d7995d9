use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config;

#[derive(Properties, PartialEq)]
pub struct EntranceProps {
    pub title: String,
    #[prop_or_default]
    pub poster: Option<String>,
    /// Fired once the reveal's assets are in.
    pub on_ready: Callback<()>,
    /// Fired once when the reveal animation has finished.
    pub on_complete: Callback<()>,
    /// The page has opened; fade the overlay away.
    #[prop_or_default]
    pub done: bool,
}

/// Load-time reveal that sits over a page until its scroll gate opens.
#[function_component(EntranceReveal)]
pub fn entrance_reveal(props: &EntranceProps) -> Html {
    let playing = use_state(|| false);
    let timer = use_mut_ref(|| None::<Timeout>);

    let start = {
        let playing = playing.clone();
        let timer = timer.clone();
        let on_ready = props.on_ready.clone();
        let on_complete = props.on_complete.clone();
        Callback::from(move |_: ()| {
            if timer.borrow().is_some() {
                return;
            }
            on_ready.emit(());
            playing.set(true);
            let on_complete = on_complete.clone();
            *timer.borrow_mut() = Some(Timeout::new(config::REVEAL_MS, move || {
                on_complete.emit(());
            }));
        })
    };

    // Without a poster there is nothing to wait for.
    {
        let start = start.clone();
        let has_poster = props.poster.is_some();
        use_effect_with_deps(
            move |_| {
                if !has_poster {
                    start.emit(());
                }
                || ()
            },
            (),
        );
    }

    // Dropping the timeout cancels it, so completion never fires after unmount.
    {
        let timer = timer.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    timer.borrow_mut().take();
                }
            },
            (),
        );
    }

    let on_loaded = {
        let start = start.clone();
        Callback::from(move |_: Event| start.emit(()))
    };

    html! {
        <div class={classes!("entrance", (*playing).then(|| "playing"), props.done.then(|| "done"))}>
            <style>
                {r#"
                    .entrance {
                        position: fixed;
                        inset: 0;
                        z-index: 20;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        background: #0b0b0b;
                        transition: opacity 0.6s ease-out, visibility 0.6s;
                    }
                    .entrance.done {
                        opacity: 0;
                        visibility: hidden;
                        pointer-events: none;
                    }
                    .entrance-poster {
                        position: absolute;
                        inset: 0;
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                        opacity: 0;
                        transform: scale(1.08);
                        transition: opacity 1.2s ease-out, transform 1.4s cubic-bezier(0.2, 0.8, 0.2, 1);
                    }
                    .entrance.playing .entrance-poster {
                        opacity: 0.55;
                        transform: scale(1);
                    }
                    .entrance-title {
                        position: relative;
                        font-size: clamp(2.5rem, 7vw, 6rem);
                        letter-spacing: -0.02em;
                        clip-path: inset(0 0 100% 0);
                        transform: translateY(30%);
                        transition: clip-path 0.9s ease-out 0.3s, transform 0.9s ease-out 0.3s;
                    }
                    .entrance.playing .entrance-title {
                        clip-path: inset(0 0 0 0);
                        transform: translateY(0);
                    }
                "#}
            </style>
            if let Some(poster) = props.poster.clone() {
                <img
                    class="entrance-poster"
                    src={poster}
                    alt=""
                    onload={on_loaded.clone()}
                    onerror={on_loaded}
                />
            }
            <h1 class="entrance-title">{&props.title}</h1>
        </div>
    }
}
