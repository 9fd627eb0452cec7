use crate::app::AppState;
use crate::workflow::notification::Notification;
use dioxus::prelude::*;

pub fn SettingsView() -> Element {
    let app_state = use_context::<AppState>();
    let current = app_state.settings.read().clone();
    let dark_mode = current.theme == "dark";
    let store_key = app_state.store.key().to_string();

    let mut api_base_url = use_signal(|| current.api_base_url.clone());
    let mut storage_base_url = use_signal(|| current.storage_base_url.clone());

    let mut app_state_theme = app_state.clone();
    let mut app_state_save = app_state.clone();

    let handle_save = move |_| {
        let mut settings = app_state_save.settings.read().clone();
        settings.api_base_url = api_base_url();
        settings.storage_base_url = storage_base_url();
        settings.validate();

        // Show what was actually kept after validation
        api_base_url.set(settings.api_base_url.clone());
        storage_base_url.set(settings.storage_base_url.clone());

        app_state_save.apply_settings(settings);
        app_state_save.notify(Notification::success("Settings saved"));
    };

    rsx! {
        div {
            class: "space-y-6 max-w-3xl mx-auto animate-fade-in-up pb-8",

            h1 { class: "text-2xl font-semibold", "Settings" }

            // Endpoints
            div {
                class: "p-5 rounded-2xl glass-md space-y-4",

                h3 { class: "text-base font-semibold text-[var(--text-primary)]", "Endpoints" }

                div {
                    div { class: "text-sm font-medium text-[var(--text-primary)] mb-1", "Marketplace API" }
                    div { class: "text-xs text-[var(--text-tertiary)] mb-2", "Base URL every request is sent to" }
                    input {
                        class: "glass-input w-full px-3 py-2",
                        value: "{api_base_url}",
                        oninput: move |evt| api_base_url.set(evt.value()),
                    }
                }

                div {
                    div { class: "text-sm font-medium text-[var(--text-primary)] mb-1", "Image storage" }
                    div { class: "text-xs text-[var(--text-tertiary)] mb-2", "Relative image keys are resolved against this URL" }
                    input {
                        class: "glass-input w-full px-3 py-2",
                        value: "{storage_base_url}",
                        oninput: move |evt| storage_base_url.set(evt.value()),
                    }
                }

                div {
                    class: "text-xs text-[var(--text-tertiary)]",
                    "Session stored under \"{store_key}\""
                }

                button { class: "btn-primary", onclick: handle_save, "Save" }
            }

            // Theme
            div {
                class: "p-5 rounded-2xl glass-md",

                div {
                    class: "flex items-center justify-between",

                    div {
                        div { class: "text-sm font-medium text-[var(--text-primary)]", "Dark Mode" }
                        div { class: "text-xs text-[var(--text-tertiary)] mt-0.5", "Switch between light and dark theme" }
                    }
                    button {
                        onclick: move |_| {
                            let mut settings = app_state_theme.settings.read().clone();
                            settings.theme = if dark_mode { "light".to_string() } else { "dark".to_string() };
                            app_state_theme.apply_settings(settings);
                        },
                        class: if dark_mode { "toggle-switch active" } else { "toggle-switch" },
                        div { class: "toggle-switch-knob" }
                    }
                }
            }
        }
    }
}
