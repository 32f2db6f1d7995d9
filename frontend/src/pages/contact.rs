use serde::Serialize;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::pages::common::set_document_title;
use crate::pages::forms::{
    bind_input, bind_select, bind_textarea, error_list, looks_like_email, message_length, required,
    status_line, submit, Submission, FORM_STYLE,
};

#[derive(Serialize, Clone)]
struct ContactRequest {
    name: String,
    email: String,
    company: Option<String>,
    budget: String,
    message: String,
}

impl ContactRequest {
    fn errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = [
            required("Name", &self.name),
            required("Email", &self.email),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !self.email.trim().is_empty() && !looks_like_email(&self.email) {
            errors.push("Email does not look right".to_string());
        }
        errors.extend(message_length("Message", &self.message));
        errors
    }
}

const BUDGETS: [&str; 4] = ["Under 20k", "20k to 50k", "50k to 150k", "Over 150k"];

#[function_component(Contact)]
pub fn contact() -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let company = use_state(String::new);
    let budget = use_state(|| BUDGETS[0].to_string());
    let message = use_state(String::new);
    let errors = use_state(Vec::<String>::new);
    let status = use_state(|| Submission::Editing);

    {
        use_effect_with_deps(
            move |_| {
                set_document_title("Contact");
                || ()
            },
            (),
        );
    }

    let onsubmit = {
        let name = name.clone();
        let email = email.clone();
        let company = company.clone();
        let budget = budget.clone();
        let message = message.clone();
        let errors = errors.clone();
        let status = status.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = ContactRequest {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                company: Some(company.trim().to_string()).filter(|c| !c.is_empty()),
                budget: (*budget).clone(),
                message: message.trim().to_string(),
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
                match submit("/api/contact", &request).await {
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
                <h1>{"Tell us about it"}</h1>
                <label>
                    {"Name"}
                    <input type="text" value={(*name).clone()} oninput={bind_input(&name)} />
                </label>
                <label>
                    {"Email"}
                    <input type="email" value={(*email).clone()} oninput={bind_input(&email)} />
                </label>
                <label>
                    {"Company (optional)"}
                    <input type="text" value={(*company).clone()} oninput={bind_input(&company)} />
                </label>
                <label>
                    {"Budget"}
                    <select onchange={bind_select(&budget)}>
                        { for BUDGETS.iter().map(|b| html! {
                            <option value={*b} selected={*b == budget.as_str()}>{*b}</option>
                        }) }
                    </select>
                </label>
                <label>
                    {"What are you working on?"}
                    <textarea value={(*message).clone()} oninput={bind_textarea(&message)} />
                </label>
                { error_list(&errors) }
                <button type="submit" disabled={sending}>{"Send"}</button>
                { status_line(&status, "Thanks, we will get back to you within two working days.") }
            </form>
        </div>
    }
}
