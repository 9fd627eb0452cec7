//! Assign-photographer dialog
//!
//! Search the directory, pick a photographer, then one of their packages.

use crate::app::AppState;
use crate::types::marketplace::{format_price, Assignment, EntityId};
use crate::workflow::assign::AssignStep;
use dioxus::prelude::*;

#[component]
pub fn AssignDialog(
    job_title: String,
    on_assign: EventHandler<Assignment>,
    on_close: EventHandler<()>,
) -> Element {
    let app_state = use_context::<AppState>();
    let api = app_state.api;
    let mut flow = app_state.assign_flow;
    let mut loading = use_signal(|| false);
    let mut load_error = use_signal(|| None::<String>);
    let mut validation = use_signal(|| None::<String>);
    let config = app_state.settings.read().client_config();

    // Fresh step on every open; the directory itself is fetched only once
    use_hook(move || {
        flow.write().reopen();
        if flow.peek().needs_fetch() {
            loading.set(true);
            let api = api.peek().clone();
            spawn(async move {
                match api.list_photographers().await {
                    Ok(photographers) => flow.write().set_photographers(photographers),
                    Err(e) => {
                        tracing::error!("Failed to load photographers: {}", e);
                        load_error.set(Some(format!("Could not load photographers: {}", e.user_message())));
                    }
                }
                loading.set(false);
            });
        }
    });

    let current = flow.read().clone();
    let step = current.step().clone();
    let can_confirm = current.can_confirm();

    let handle_confirm = move |_| {
        let result = flow.write().confirm();
        match result {
            Ok(assignment) => {
                validation.set(None);
                on_assign.call(assignment);
            }
            Err(e) => validation.set(Some(e.to_string())),
        }
    };

    let handle_cancel = move |_| {
        flow.write().cancel();
        on_close.call(());
    };

    rsx! {
        // Backdrop
        div {
            class: "fixed inset-0 bg-black/60 backdrop-blur-2xl z-40 flex items-center justify-center p-4",

            div {
                class: "w-full max-w-lg glass-strong rounded-2xl overflow-hidden animate-scale-in",

                // Header
                div {
                    class: "p-6 border-b border-[var(--border-subtle)]",
                    h2 { class: "text-lg font-semibold", "Assign a photographer" }
                    p { class: "text-sm text-[var(--text-secondary)] truncate", "{job_title}" }
                }

                // Content
                div {
                    class: "p-6 space-y-3 max-h-[60vh] overflow-y-auto scrollbar-thin",

                    match step {
                        AssignStep::Searching => rsx! {
                            input {
                                class: "glass-input w-full px-3 py-2",
                                placeholder: "Search by name...",
                                value: "{current.query()}",
                                oninput: move |evt| flow.write().set_query(evt.value()),
                            }

                            if loading() {
                                p { class: "text-sm text-[var(--text-tertiary)]", "Loading photographers..." }
                            }
                            if let Some(message) = load_error() {
                                p { class: "text-sm text-[var(--error)]", "{message}" }
                            }
                            if !loading() && current.visible().is_empty() {
                                p { class: "text-sm text-[var(--text-tertiary)]", "No photographers match." }
                            }

                            for photographer in current.visible().into_iter().cloned() {
                                PhotographerRow {
                                    key: "{photographer.id}",
                                    id: photographer.id.clone(),
                                    name: photographer.name.clone(),
                                    location: photographer.location.clone().unwrap_or_else(|| "Location not specified".to_string()),
                                    picture: photographer.profile_picture.as_deref().map(|r| config.resolve_image(r)),
                                    package_count: photographer.packages.len(),
                                    on_select: move |id: EntityId| {
                                        validation.set(None);
                                        if let Err(e) = flow.write().select_photographer(&id) {
                                            validation.set(Some(e.to_string()));
                                        }
                                    },
                                }
                            }
                        },
                        AssignStep::PackageSelection { photographer, package } => rsx! {
                            div {
                                class: "flex items-center justify-between",
                                div { class: "font-medium", "{photographer.name}" }
                                button {
                                    class: "btn-ghost text-xs",
                                    onclick: move |_| {
                                        validation.set(None);
                                        flow.write().back();
                                    },
                                    "Back"
                                }
                            }

                            if photographer.packages.is_empty() {
                                p { class: "text-sm text-[var(--text-tertiary)]", "This photographer has not published any packages yet." }
                            }

                            for (index, pkg) in photographer.packages.iter().cloned().enumerate() {
                                button {
                                    key: "{index}",
                                    class: if package == Some(index) {
                                        "w-full text-left p-4 rounded-xl border border-[var(--accent-primary)] bg-[var(--accent-primary-10)]"
                                    } else {
                                        "w-full text-left p-4 rounded-xl border border-[var(--border-subtle)] bg-white/[0.02] hover:bg-white/[0.04]"
                                    },
                                    onclick: move |_| {
                                        validation.set(None);
                                        if let Err(e) = flow.write().pick_package(index) {
                                            validation.set(Some(e.to_string()));
                                        }
                                    },
                                    div {
                                        class: "flex items-center justify-between",
                                        span { class: "text-sm font-medium", "{pkg.name}" }
                                        span { class: "text-sm text-[var(--accent-primary)]", "{format_price(pkg.price)}" }
                                    }
                                    if !pkg.features.is_empty() {
                                        p { class: "text-xs text-[var(--text-tertiary)] mt-1", "{pkg.features}" }
                                    }
                                }
                            }
                        },
                        AssignStep::Confirmed(assignment) => rsx! {
                            p { class: "text-sm", "Assigned {assignment.package_description}" }
                        },
                        AssignStep::Cancelled => rsx! {},
                    }

                    if let Some(message) = validation() {
                        p { class: "text-sm text-[var(--error)]", "{message}" }
                    }
                }

                // Footer
                div {
                    class: "p-6 border-t border-[var(--border-subtle)] flex gap-3",
                    button { class: "btn-ghost flex-1", onclick: handle_cancel, "Cancel" }
                    button {
                        class: "btn-primary flex-1",
                        disabled: !can_confirm,
                        onclick: handle_confirm,
                        "Assign"
                    }
                }
            }
        }
    }
}

#[component]
fn PhotographerRow(
    id: EntityId,
    name: String,
    location: String,
    picture: Option<String>,
    package_count: usize,
    on_select: EventHandler<EntityId>,
) -> Element {
    let initial = name.chars().next().unwrap_or('?').to_uppercase().to_string();
    let packages_label = match package_count {
        0 => "No packages".to_string(),
        1 => "1 package".to_string(),
        n => format!("{n} packages"),
    };

    rsx! {
        button {
            class: "w-full flex items-center gap-3 p-3 rounded-xl hover:bg-white/[0.05] text-left transition-all",
            onclick: move |_| on_select.call(id.clone()),

            if let Some(src) = picture {
                img { class: "w-10 h-10 rounded-full object-cover", src: "{src}", alt: "{name}" }
            } else {
                div {
                    class: "w-10 h-10 rounded-full flex items-center justify-center bg-white/[0.06] text-sm font-semibold",
                    "{initial}"
                }
            }
            div {
                class: "flex-1 min-w-0",
                div { class: "text-sm font-medium truncate", "{name}" }
                div { class: "text-xs text-[var(--text-tertiary)] truncate", "{location} · {packages_label}" }
            }
        }
    }
}
