use gloo_net::http::Request;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config;

pub const MIN_MESSAGE_LEN: usize = 20;
pub const MAX_MESSAGE_LEN: usize = 4000;

#[derive(Clone, PartialEq, Debug)]
pub enum Submission {
    Editing,
    Sending,
    Sent,
    Failed(String),
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Loose shape check: one `@`, something before it, a dotted domain after.
pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .map_or(false, |(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

pub fn required(label: &str, value: &str) -> Option<String> {
    value.trim().is_empty().then(|| format!("{} is required", label))
}

pub fn message_length(label: &str, value: &str) -> Option<String> {
    let len = value.trim().chars().count();
    if len < MIN_MESSAGE_LEN {
        Some(format!("{} needs at least {} characters", label, MIN_MESSAGE_LEN))
    } else if len > MAX_MESSAGE_LEN {
        Some(format!("{} can be at most {} characters", label, MAX_MESSAGE_LEN))
    } else {
        None
    }
}

/// POSTs a form payload to the backend and maps every failure to a
/// message that can be shown next to the form.
pub async fn submit<T: Serialize>(path: &str, payload: &T) -> Result<(), String> {
    let url = format!("{}{}", config::get_backend_url(), path);
    let request = Request::post(&url)
        .json(payload)
        .map_err(|e| format!("Could not prepare request: {}", e))?;

    match request.send().await {
        Ok(response) if response.ok() => {
            gloo_console::log!(format!("form submitted to {}", url));
            Ok(())
        }
        Ok(response) => {
            warn!("{} answered with status {}", url, response.status());
            match response.json::<ErrorResponse>().await {
                Ok(body) => Err(body.error),
                Err(_) => Err("Something went wrong, please try again".to_string()),
            }
        }
        Err(e) => {
            error!("request to {} failed: {}", url, e);
            Err(format!("Request failed: {}", e))
        }
    }
}

/// Input handler writing an `<input>`'s value into a state handle.
pub fn bind_input(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
            handle.set(input.value());
        }
    })
}

pub fn bind_textarea(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(area) = e.target().and_then(|t| t.dyn_into::<HtmlTextAreaElement>().ok()) {
            handle.set(area.value());
        }
    })
}

pub fn bind_select(handle: &UseStateHandle<String>) -> Callback<Event> {
    let handle = handle.clone();
    Callback::from(move |e: Event| {
        if let Some(select) = e.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) {
            handle.set(select.value());
        }
    })
}

pub fn status_line(status: &Submission, sent: &str) -> Html {
    match status {
        Submission::Editing => html! {},
        Submission::Sending => html! { <p class="form-status">{"Sending..."}</p> },
        Submission::Sent => html! { <p class="form-status success">{sent}</p> },
        Submission::Failed(message) => html! { <p class="form-status error">{message}</p> },
    }
}

pub fn error_list(errors: &[String]) -> Html {
    if errors.is_empty() {
        return html! {};
    }
    html! {
        <ul class="form-errors">
            { for errors.iter().map(|e| html! { <li>{e}</li> }) }
        </ul>
    }
}

pub const FORM_STYLE: &str = r#"
    .lead-page {
        min-height: 100vh;
        display: flex;
        justify-content: center;
        padding: 9rem 2rem 4rem;
        background: #f2ede4;
        color: #111;
    }
    .lead-form {
        width: 100%;
        max-width: 640px;
        display: flex;
        flex-direction: column;
        gap: 1.25rem;
    }
    .lead-form h1 {
        font-size: clamp(2.5rem, 6vw, 4.5rem);
        margin: 0 0 1rem;
    }
    .lead-form label {
        display: flex;
        flex-direction: column;
        gap: 0.4rem;
        font-size: 0.9rem;
    }
    .lead-form input,
    .lead-form select,
    .lead-form textarea {
        font: inherit;
        padding: 0.8rem 1rem;
        border: 1px solid rgba(0, 0, 0, 0.2);
        border-radius: 6px;
        background: #fff;
    }
    .lead-form textarea {
        min-height: 10rem;
        resize: vertical;
    }
    .lead-form button {
        align-self: flex-start;
        padding: 0.9rem 2rem;
        border: none;
        border-radius: 999px;
        background: #111;
        color: #fff;
        cursor: pointer;
    }
    .lead-form button:disabled {
        opacity: 0.5;
        cursor: default;
    }
    .form-errors {
        margin: 0;
        padding-left: 1.2rem;
        color: #b3261e;
    }
    .form-status.success {
        color: #1e6b34;
    }
    .form-status.error {
        color: #b3261e;
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(looks_like_email("hello@northlight.studio"));
        assert!(looks_like_email("  a.b@c.co "));
        assert!(!looks_like_email("hello"));
        assert!(!looks_like_email("@northlight.studio"));
        assert!(!looks_like_email("hello@studio"));
        assert!(!looks_like_email("hello@@studio.com"));
        assert!(!looks_like_email("he llo@studio.com"));
        assert!(!looks_like_email("hello@.com"));
    }

    #[test]
    fn message_bounds() {
        assert!(message_length("Message", "too short").is_some());
        assert!(message_length("Message", &"x".repeat(MIN_MESSAGE_LEN)).is_none());
        assert!(message_length("Message", &"x".repeat(MAX_MESSAGE_LEN + 1)).is_some());
    }

    #[test]
    fn required_fields() {
        assert!(required("Name", "   ").is_some());
        assert!(required("Name", "Ada").is_none());
    }
}
