//! UI components for LensMarket
//!
//! This module contains all user interface components built with Dioxus.

#![allow(non_snake_case)]

pub mod checkout;
pub mod components;
pub mod directory;
pub mod jobs;
pub mod profile;
pub mod register;
pub mod settings;
pub mod sign_in;

use crate::app::{AppState, Route};
use crate::ui::checkout::CheckoutView;
use crate::ui::components::toast::Toast;
use crate::ui::directory::DirectoryView;
use crate::ui::jobs::JobsView;
use crate::ui::profile::ProfileView;
use crate::ui::register::RegisterView;
use crate::ui::settings::SettingsView;
use crate::ui::sign_in::SignInView;
use dioxus::prelude::*;

/// Application shell: sidebar navigation, active screen, notification host
#[component]
pub fn Layout() -> Element {
    let app_state = use_context::<AppState>();
    let route = app_state.route.read().clone();
    let signed_in = app_state.session.read().is_some();
    let theme = app_state.settings.read().theme.clone();
    let notification = app_state.notification.read().clone();
    let mut route_signal = app_state.route;
    let mut notification_signal = app_state.notification;
    let mut app_state_out = app_state.clone();

    let greeting = app_state
        .session
        .read()
        .as_ref()
        .map(|s| s.greeting_name().to_string());

    let entries: Vec<(Route, &str)> = if signed_in {
        vec![
            (Route::Jobs, "My jobs"),
            (Route::Directory, "Photographers"),
            (Route::Checkout, "Packages"),
            (Route::Settings, "Settings"),
        ]
    } else {
        vec![
            (Route::SignIn, "Sign in"),
            (Route::Register, "Register"),
            (Route::Directory, "Photographers"),
            (Route::Checkout, "Packages"),
            (Route::Settings, "Settings"),
        ]
    };

    rsx! {
        div {
            class: "flex h-screen w-screen overflow-hidden theme-{theme} bg-[var(--bg-app)] text-[var(--text-primary)]",

            // Sidebar
            nav {
                class: "flex-none w-60 flex flex-col border-r border-[var(--border-subtle)] bg-[var(--bg-sidebar)]",

                div {
                    class: "px-5 py-6 text-lg font-semibold tracking-tight select-none",
                    "LensMarket"
                }

                div {
                    class: "flex-1 px-2 space-y-1",
                    for (target, label) in entries {
                        NavButton {
                            active: same_screen(&route, &target),
                            label: label.to_string(),
                            onclick: {
                                let target = target.clone();
                                move |_| route_signal.set(target.clone())
                            },
                        }
                    }
                }

                if let Some(name) = greeting {
                    div {
                        class: "p-4 border-t border-[var(--border-subtle)] flex items-center justify-between gap-2",
                        span { class: "text-sm truncate text-[var(--text-secondary)]", "{name}" }
                        button {
                            class: "btn-ghost text-xs",
                            onclick: move |_| app_state_out.sign_out(),
                            "Sign out"
                        }
                    }
                }
            }

            // Content
            main {
                class: "flex-1 overflow-y-auto p-8 scrollbar-thin",
                match route.clone() {
                    Route::Register => rsx! { RegisterView {} },
                    Route::SignIn => rsx! { SignInView {} },
                    Route::Jobs => rsx! { JobsView {} },
                    Route::Directory => rsx! { DirectoryView {} },
                    Route::Profile(id) => rsx! { ProfileView { id } },
                    Route::Checkout => rsx! { CheckoutView {} },
                    Route::Settings => rsx! { SettingsView {} },
                }
            }

            if let Some(notification) = notification {
                Toast {
                    key: "{notification.id}",
                    notification: notification.clone(),
                    on_dismiss: move |_| notification_signal.set(None),
                }
            }
        }
    }
}

/// Profile pages highlight the directory entry
fn same_screen(current: &Route, target: &Route) -> bool {
    matches!((current, target), (Route::Profile(_), Route::Directory)) || current == target
}

#[component]
fn NavButton(active: bool, label: String, onclick: EventHandler<MouseEvent>) -> Element {
    let classes = if active {
        "bg-white/[0.08] text-[var(--text-primary)] border-l-2 border-[var(--accent-primary)]"
    } else {
        "text-[var(--text-secondary)] hover:bg-white/[0.05] hover:text-[var(--text-primary)] border-l-2 border-transparent"
    };

    rsx! {
        button {
            class: "w-full text-left px-3 py-2 rounded-lg text-sm font-medium transition-all {classes}",
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}
