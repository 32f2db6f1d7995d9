use gloo_timers::callback::Timeout;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::config;

#[derive(Clone, Copy, PartialEq)]
enum Curtain {
    Covering,
    Revealing,
    Idle,
}

#[derive(Properties, PartialEq)]
pub struct PageTransitionProps {
    pub children: Children,
}

/// Route-level wrapper: every path change plays the curtain in, then out,
/// while the new page mounts underneath.
#[function_component(PageTransition)]
pub fn page_transition(props: &PageTransitionProps) -> Html {
    let path = use_location().map(|l| l.path().to_string()).unwrap_or_default();
    let curtain = use_state(|| Curtain::Revealing);
    let timers = use_mut_ref(Vec::<Timeout>::new);

    {
        let curtain = curtain.clone();
        let timers = timers.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                curtain.set(Curtain::Covering);

                let reveal = {
                    let curtain = curtain.clone();
                    Timeout::new(config::CURTAIN_MS, move || curtain.set(Curtain::Revealing))
                };
                let settle = Timeout::new(config::CURTAIN_MS * 2, move || curtain.set(Curtain::Idle));
                *timers.borrow_mut() = vec![reveal, settle];

                move || {
                    timers.borrow_mut().clear();
                }
            },
            path,
        );
    }

    let curtain_class = match *curtain {
        Curtain::Covering => "curtain covering",
        Curtain::Revealing => "curtain revealing",
        Curtain::Idle => "curtain",
    };

    html! {
        <>
            <style>
                {r#"
                    .curtain {
                        position: fixed;
                        inset: 0;
                        z-index: 50;
                        background: #f2ede4;
                        transform: translateY(100%);
                        pointer-events: none;
                    }
                    .curtain.covering {
                        transform: translateY(0);
                        transition: transform 0.45s cubic-bezier(0.7, 0, 0.3, 1);
                    }
                    .curtain.revealing {
                        transform: translateY(-100%);
                        transition: transform 0.45s cubic-bezier(0.7, 0, 0.3, 1);
                    }
                "#}
            </style>
            <div class={curtain_class}></div>
            { for props.children.iter() }
        </>
    }
}
