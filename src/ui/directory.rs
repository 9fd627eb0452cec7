//! Photographer directory

use crate::app::{AppState, Route};
use crate::types::marketplace::{format_price, Photographer};
use crate::workflow::assign::filter_photographers;
use dioxus::prelude::*;

#[component]
pub fn DirectoryView() -> Element {
    let app_state = use_context::<AppState>();
    let api = app_state.api;
    let mut route = app_state.route;
    let mut query = use_signal(String::new);
    let config = app_state.settings.read().client_config();

    let mut photographers = use_resource(move || async move {
        let api = api.read().clone();
        api.list_photographers().await
    });

    let body = match &*photographers.read() {
        None => rsx! {
            p { class: "text-sm text-[var(--text-tertiary)]", "Loading photographers..." }
        },
        Some(Err(e)) => rsx! {
            p { class: "text-sm text-[var(--error)]", "Could not load photographers: {e.user_message()}" }
        },
        Some(Ok(list)) => {
            let visible: Vec<Photographer> = filter_photographers(list, &query())
                .into_iter()
                .cloned()
                .collect();
            rsx! {
                if visible.is_empty() {
                    p { class: "text-sm text-[var(--text-tertiary)]", "No photographers match." }
                }
                div {
                    class: "grid grid-cols-2 gap-4",
                    for photographer in visible {
                        button {
                            key: "{photographer.id}",
                            class: "p-4 rounded-2xl glass-md text-left hover:bg-white/[0.04] transition-all space-y-3",
                            onclick: {
                                let id = photographer.id.clone();
                                move |_| route.set(Route::Profile(id.clone()))
                            },
                            div {
                                class: "flex items-center gap-3",
                                if let Some(picture) = photographer.profile_picture.as_deref() {
                                    img {
                                        class: "w-12 h-12 rounded-full object-cover",
                                        src: "{config.resolve_image(picture)}",
                                        alt: "{photographer.name}",
                                    }
                                }
                                div {
                                    class: "min-w-0",
                                    div { class: "font-medium truncate", "{photographer.name}" }
                                    div {
                                        class: "text-xs text-[var(--text-tertiary)] truncate",
                                        {photographer.location.clone().unwrap_or_else(|| "Location not specified".to_string())}
                                    }
                                }
                            }
                            if let Some(cheapest) = photographer.packages.iter().map(|p| p.price).reduce(f64::min) {
                                div { class: "text-xs text-[var(--text-secondary)]", "From {format_price(cheapest)}" }
                            } else {
                                div { class: "text-xs text-[var(--text-tertiary)]", "No packages available" }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "max-w-3xl mx-auto space-y-6 animate-fade-in-up pb-8",

            div {
                class: "flex items-center justify-between gap-4",
                h1 { class: "text-2xl font-semibold", "Photographers" }
                button {
                    class: "btn-ghost text-sm",
                    onclick: move |_| photographers.restart(),
                    "Refresh"
                }
            }

            input {
                class: "glass-input w-full px-4 py-2",
                placeholder: "Search by name...",
                value: "{query}",
                oninput: move |evt| query.set(evt.value()),
            }

            {body}
        }
    }
}
