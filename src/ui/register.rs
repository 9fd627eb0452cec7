//! Registration screen

use crate::app::{AppState, Route};
use crate::types::marketplace::Role;
use crate::workflow::registration::{run_registration, RegistrationForm, RegistrationOutcome};
use dioxus::prelude::*;

#[component]
pub fn RegisterView() -> Element {
    let app_state = use_context::<AppState>();
    let api = app_state.api;
    let mut route = app_state.route;
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(Role::default);
    let mut outcome = use_signal(|| None::<RegistrationOutcome>);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let form = RegistrationForm {
            name: name(),
            email: email(),
            password: password(),
            role: role(),
        };
        let api = api.read().clone();
        submitting.set(true);
        outcome.set(None);

        spawn(async move {
            run_registration(
                api.as_ref(),
                &form,
                |o| {
                    submitting.set(false);
                    outcome.set(Some(o.clone()));
                },
                move || route.set(Route::SignIn),
            )
            .await;
        });
    };

    let message = outcome.read().clone();

    rsx! {
        div {
            class: "max-w-md mx-auto animate-fade-in-up",

            h1 { class: "text-2xl font-semibold mb-1", "Create an account" }
            p { class: "text-sm text-[var(--text-tertiary)] mb-6", "Join as a client, photographer or editor." }

            form {
                class: "p-6 rounded-2xl glass-md space-y-4",
                onsubmit: handle_submit,

                Field { label: "Name",
                    input {
                        class: "glass-input w-full px-3 py-2",
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
                Field { label: "Email",
                    input {
                        class: "glass-input w-full px-3 py-2",
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                Field { label: "Password",
                    input {
                        class: "glass-input w-full px-3 py-2",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                Field { label: "Role",
                    select {
                        class: "glass-input w-full px-3 py-2",
                        onchange: move |evt| role.set(Role::parse(&evt.value()).unwrap_or_default()),
                        for option_role in Role::ALL {
                            option {
                                value: option_role.as_str(),
                                selected: role() == option_role,
                                "{option_role.label()}"
                            }
                        }
                    }
                }

                button {
                    class: "btn-primary w-full",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Registering..." } else { "Register" }
                }

                if let Some(message) = message {
                    p {
                        class: if message.is_success() { "text-sm text-[#34d399]" } else { "text-sm text-[var(--error)]" },
                        "{message.message()}"
                    }
                }
            }

            p {
                class: "text-sm text-center mt-4 text-[var(--text-secondary)]",
                "Already registered? "
                button {
                    class: "text-[var(--accent-primary)] hover:underline",
                    onclick: move |_| route.set(Route::SignIn),
                    "Sign in"
                }
            }
        }
    }
}

/// Labelled form row
#[component]
pub fn Field(label: String, children: Element) -> Element {
    rsx! {
        label {
            class: "block space-y-1",
            span { class: "text-xs font-medium text-[var(--text-secondary)]", "{label}" }
            {children}
        }
    }
}
