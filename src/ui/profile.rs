//! Public portfolio profile

use crate::app::{AppState, Route};
use crate::types::marketplace::{format_price, EntityId, Profile};
use crate::types::config::ClientConfig;
use dioxus::prelude::*;

#[component]
pub fn ProfileView(id: EntityId) -> Element {
    let app_state = use_context::<AppState>();
    let api = app_state.api;
    let mut route = app_state.route;
    let config = app_state.settings.read().client_config();

    let mut id_signal = use_signal(|| id.clone());
    if *id_signal.peek() != id {
        id_signal.set(id.clone());
    }

    let profile = use_resource(move || async move {
        let id = id_signal();
        let api = api.read().clone();
        api.fetch_profile(&id).await
    });

    let content = match &*profile.read() {
        None => rsx! {
            p { class: "text-sm text-[var(--text-tertiary)]", "Loading profile..." }
        },
        Some(Err(e)) => rsx! {
            p { class: "text-sm text-[var(--error)]", "Could not load this profile: {e.user_message()}" }
        },
        Some(Ok(profile)) => rsx! {
            ProfileBody { profile: profile.clone(), config: config.clone() }
        },
    };

    rsx! {
        div {
            class: "max-w-3xl mx-auto space-y-6 animate-fade-in-up pb-8",
            button {
                class: "btn-ghost text-sm",
                onclick: move |_| route.set(Route::Directory),
                "Back to photographers"
            }
            {content}
        }
    }
}

#[component]
fn ProfileBody(profile: Profile, config: ClientConfig) -> Element {
    let picture = profile
        .profile_picture
        .as_deref()
        .map(|reference| config.resolve_image(reference));
    let portfolio: Vec<String> = profile
        .portfolio
        .iter()
        .map(|reference| config.resolve_image(reference))
        .collect();

    rsx! {
        // Header card
        div {
            class: "p-6 rounded-2xl glass-md flex items-center gap-5",
            if let Some(src) = picture {
                img { class: "w-20 h-20 rounded-full object-cover", src: "{src}", alt: "{profile.display_name()}" }
            } else {
                div { class: "w-20 h-20 rounded-full bg-white/[0.06]" }
            }
            div {
                class: "min-w-0 space-y-1",
                h1 { class: "text-2xl font-semibold", "{profile.display_name()}" }
                div { class: "text-sm text-[var(--text-tertiary)]", "{profile.display_location()}" }
                p { class: "text-sm text-[var(--text-secondary)]", "{profile.display_bio()}" }
            }
        }

        // Portfolio
        div {
            class: "space-y-3",
            h3 { class: "text-base font-semibold", "Portfolio" }
            if portfolio.is_empty() {
                p { class: "text-sm text-[var(--text-tertiary)]", "No portfolio images yet." }
            }
            div {
                class: "grid grid-cols-3 gap-3",
                for src in portfolio {
                    img {
                        key: "{src}",
                        class: "w-full aspect-square rounded-xl object-cover",
                        src: "{src}",
                        alt: "Portfolio image",
                    }
                }
            }
        }

        // Packages
        div {
            class: "space-y-3",
            h3 { class: "text-base font-semibold", "Packages" }
            if profile.packages.is_empty() {
                p { class: "text-sm text-[var(--text-tertiary)]", "No packages published." }
            }
            for (index, pkg) in profile.packages.iter().enumerate() {
                div {
                    key: "{index}",
                    class: "p-4 rounded-xl border border-[var(--border-subtle)] bg-white/[0.02]",
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
        }
    }
}
