//! Sign-in screen
//!
//! There is no authentication; signing in records the client identifier
//! that job requests are made under.

use crate::app::{AppState, Route};
use crate::types::session::Session;
use crate::ui::register::Field;
use dioxus::prelude::*;

#[component]
pub fn SignInView() -> Element {
    let app_state = use_context::<AppState>();
    let mut route = app_state.route;
    let mut client_id = use_signal(String::new);
    let mut display_name = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut app_state_submit = app_state.clone();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let id = client_id().trim().to_string();
        if id.is_empty() {
            error.set(Some("Please enter your client ID".to_string()));
            return;
        }
        error.set(None);
        let name = display_name().trim().to_string();
        app_state_submit.sign_in(Session::new(id, Some(name)));
    };

    rsx! {
        div {
            class: "max-w-md mx-auto animate-fade-in-up",

            h1 { class: "text-2xl font-semibold mb-1", "Sign in" }
            p { class: "text-sm text-[var(--text-tertiary)] mb-6", "Use the client ID you received when registering." }

            form {
                class: "p-6 rounded-2xl glass-md space-y-4",
                onsubmit: handle_submit,

                Field { label: "Client ID",
                    input {
                        class: "glass-input w-full px-3 py-2",
                        value: "{client_id}",
                        oninput: move |evt| client_id.set(evt.value()),
                    }
                }
                Field { label: "Display name (optional)",
                    input {
                        class: "glass-input w-full px-3 py-2",
                        value: "{display_name}",
                        oninput: move |evt| display_name.set(evt.value()),
                    }
                }

                button { class: "btn-primary w-full", r#type: "submit", "Continue" }

                if let Some(message) = error() {
                    p { class: "text-sm text-[var(--error)]", "{message}" }
                }
            }

            p {
                class: "text-sm text-center mt-4 text-[var(--text-secondary)]",
                "New here? "
                button {
                    class: "text-[var(--accent-primary)] hover:underline",
                    onclick: move |_| route.set(Route::Register),
                    "Create an account"
                }
            }
        }
    }
}
