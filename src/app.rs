//! Root Dioxus application component
//!
//! This module contains the main App component that serves as the root of the UI tree.

use crate::api::{HttpApi, MarketplaceApi};
use crate::storage::local::LocalStore;
use crate::storage::settings::{load_settings, save_settings, AppSettings};
use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage};
use crate::types::marketplace::EntityId;
use crate::types::session::Session;
use crate::ui::Layout;
use crate::workflow::assign::AssignFlow;
use crate::workflow::notification::Notification;
use dioxus::prelude::*;
use std::sync::Arc;

/// Screens of the application
#[derive(Clone, PartialEq, Debug)]
pub enum Route {
    Register,
    SignIn,
    Jobs,
    Directory,
    Profile(EntityId),
    Checkout,
    Settings,
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub api: Signal<Arc<dyn MarketplaceApi>>,
    pub store: LocalStore,
    pub settings: Signal<AppSettings>,
    pub session: Signal<Option<Session>>,
    pub route: Signal<Route>,
    /// The notification currently on screen; a new one replaces it
    pub notification: Signal<Option<Notification>>,
    /// Kept across openings of the assign dialog so the directory is only
    /// fetched once
    pub assign_flow: Signal<AssignFlow>,
}

impl AppState {
    pub fn new() -> Self {
        let settings = load_settings();
        let config = settings.client_config();

        let backend: Arc<dyn KeyValueStorage> = match FileStorage::in_data_dir() {
            Ok(storage) => {
                tracing::info!("Local data stored in {:?}", storage.root());
                Arc::new(storage)
            }
            Err(e) => {
                tracing::warn!("No data directory ({}), session will not survive a restart", e);
                Arc::new(MemoryStorage::new())
            }
        };
        let store = LocalStore::new(backend, config.storage_key.clone());
        let session: Option<Session> = store.load();
        let route = if session.is_some() {
            Route::Jobs
        } else {
            Route::SignIn
        };

        tracing::info!("AppState initialized against {}", config.api_base_url);
        let api: Arc<dyn MarketplaceApi> = Arc::new(HttpApi::new(config));

        Self {
            api: Signal::new(api),
            store,
            settings: Signal::new(settings),
            session: Signal::new(session),
            route: Signal::new(route),
            notification: Signal::new(None),
            assign_flow: Signal::new(AssignFlow::new()),
        }
    }

    /// Current API client
    pub fn api(&self) -> Arc<dyn MarketplaceApi> {
        self.api.read().clone()
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notification.set(Some(notification));
    }

    pub fn navigate(&mut self, route: Route) {
        self.route.set(route);
    }

    /// Apply a change to the session and persist the result
    pub fn update_session(&mut self, change: impl FnOnce(&mut Session)) {
        let mut current = self.session.write();
        if let Some(session) = &mut *current {
            change(session);
            self.store.save(session);
        }
    }

    pub fn sign_in(&mut self, session: Session) {
        tracing::info!("Signed in as {}", session.client_id);
        self.store.save(&session);
        self.session.set(Some(session));
        self.route.set(Route::Jobs);
    }

    pub fn sign_out(&mut self) {
        self.store.clear();
        self.session.set(None);
        self.route.set(Route::SignIn);
        self.notify(Notification::info("Signed out"));
    }

    /// Persist new settings; the API client and the cached directory are
    /// only replaced when an endpoint changed
    pub fn apply_settings(&mut self, settings: AppSettings) {
        if let Err(error) = save_settings(&settings) {
            tracing::error!("Failed to save settings: {}", error);
        }
        if self.settings.peek().endpoints_changed(&settings) {
            tracing::info!("Endpoints changed, reconnecting to {}", settings.api_base_url);
            self.api.set(Arc::new(HttpApi::new(settings.client_config())));
            self.assign_flow.write().invalidate();
        }
        self.settings.set(settings);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn App() -> Element {
    use_context_provider(AppState::new);

    rsx! {
        Layout {}
    }
}
