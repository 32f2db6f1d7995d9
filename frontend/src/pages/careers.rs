use serde::Serialize;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::pages::common::set_document_title;
use crate::pages::forms::{
    bind_input, bind_select, bind_textarea, error_list, looks_like_email, message_length, required,
    status_line, submit, Submission, FORM_STYLE,
};

const ROLES: [&str; 4] = ["Designer", "Developer", "Motion artist", "Open application"];

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct ApplicationRequest {
    name: String,
    email: String,
    role: String,
    portfolio_url: String,
    cover_letter: String,
}

impl ApplicationRequest {
    fn errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = [
            required("Name", &self.name),
            required("Email", &self.email),
            required("Portfolio link", &self.portfolio_url),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !self.email.trim().is_empty() && !looks_like_email(&self.email) {
            errors.push("Email does not look right".to_string());
        }
        if !self.portfolio_url.is_empty()
            && !(self.portfolio_url.starts_with("https://") || self.portfolio_url.starts_with("http://"))
        {
            errors.push("Portfolio link should start with http:// or https://".to_string());
        }
        if !ROLES.contains(&self.role.as_str()) {
            errors.push("Pick one of the listed roles".to_string());
        }
        errors.extend(message_length("Cover letter", &self.cover_letter));
        errors
    }
}

#[function_component(Careers)]
pub fn careers() -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let role = use_state(|| ROLES[0].to_string());
    let portfolio = use_state(String::new);
    let letter = use_state(String::new);
    let errors = use_state(Vec::<String>::new);
    let status = use_state(|| Submission::Editing);

    {
        use_effect_with_deps(
            move |_| {
                set_document_title("Careers");
                || ()
            },
            (),
        );
    }

    let onsubmit = {
        let name = name.clone();
        let email = email.clone();
        let role = role.clone();
        let portfolio = portfolio.clone();
        let letter = letter.clone();
        let errors = errors.clone();
        let status = status.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = ApplicationRequest {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                role: (*role).clone(),
                portfolio_url: portfolio.trim().to_string(),
                cover_letter: letter.trim().to_string(),
            };
            let found = request.errors();
            if !found.is_empty() {
                errors.set(found);
                return;
            }
            errors.set(Vec::new());
            status.set(Submission::Sending);

            let status = status.clone();
            spawn_local(async move {
                match submit("/api/apply", &request).await {
                    Ok(()) => status.set(Submission::Sent),
                    Err(message) => status.set(Submission::Failed(message)),
                }
            });
        })
    };

    let sending = *status == Submission::Sending;

    html! {
        <div class="lead-page">
            <style>{FORM_STYLE}</style>
            <form class="lead-form" onsubmit={onsubmit}>
                <h1>{"Join the studio"}</h1>
                <p>{"We hire slowly and keep people for a long time. Send us the work you are proudest of."}</p>
                <label>
                    {"Name"}
                    <input type="text" value={(*name).clone()} oninput={bind_input(&name)} />
                </label>
                <label>
                    {"Email"}
                    <input type="email" value={(*email).clone()} oninput={bind_input(&email)} />
                </label>
                <label>
                    {"Role"}
                    <select onchange={bind_select(&role)}>
                        { for ROLES.iter().map(|r| html! {
                            <option value={*r} selected={*r == role.as_str()}>{*r}</option>
                        }) }
                    </select>
                </label>
                <label>
                    {"Portfolio link"}
                    <input type="url" value={(*portfolio).clone()} oninput={bind_input(&portfolio)} />
                </label>
                <label>
                    {"Cover letter"}
                    <textarea value={(*letter).clone()} oninput={bind_textarea(&letter)} />
                </label>
                { error_list(&errors) }
                <button type="submit" disabled={sending}>{"Apply"}</button>
                { status_line(&status, "Application received. We read every one.") }
            </form>
        </div>
    }
}
