//! Settings storage
//!
//! Manages persistence of endpoints and user preferences.

use crate::storage::{get_data_dir, StorageError};
use crate::types::config::{
    ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_STORAGE_BASE_URL, DEFAULT_STORAGE_KEY,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL of the marketplace API
    pub api_base_url: String,
    /// Base URL storage-relative image keys are resolved against
    pub storage_base_url: String,
    /// Key the session blob is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// UI theme: "dark" or "light"
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_base_url: DEFAULT_STORAGE_BASE_URL.to_string(),
            storage_key: default_storage_key(),
            theme: default_theme(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Falls back to defaults for anything unusable and strips trailing
    /// slashes from the base URLs.
    pub fn validate(&mut self) {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        if !is_http_url(&self.api_base_url) {
            tracing::warn!("Invalid API base URL {:?}, using default", self.api_base_url);
            self.api_base_url = DEFAULT_API_BASE_URL.to_string();
        }

        self.storage_base_url = self
            .storage_base_url
            .trim()
            .trim_end_matches('/')
            .to_string();
        if !is_http_url(&self.storage_base_url) {
            tracing::warn!(
                "Invalid storage base URL {:?}, using default",
                self.storage_base_url
            );
            self.storage_base_url = DEFAULT_STORAGE_BASE_URL.to_string();
        }

        if self.storage_key.trim().is_empty() {
            self.storage_key = default_storage_key();
        }

        if self.theme != "dark" && self.theme != "light" {
            self.theme = default_theme();
        }
    }

    /// Configuration handed to the API client and the local store
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.api_base_url.clone(),
            storage_base_url: self.storage_base_url.clone(),
            storage_key: self.storage_key.clone(),
        }
    }

    /// Whether switching to `next` changes what the API client talks to.
    /// The storage key is only read at startup.
    pub fn endpoints_changed(&self, next: &AppSettings) -> bool {
        self.api_base_url != next.api_base_url || self.storage_base_url != next.storage_base_url
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> AppSettings {
    match get_settings_path() {
        Ok(path) => load_settings_from(&path),
        Err(e) => {
            tracing::warn!("Failed to locate settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

/// Load settings from an explicit path, with the same fallbacks as
/// [`load_settings`]
pub fn load_settings_from(path: &Path) -> AppSettings {
    match load_settings_internal(path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

/// Internal settings loading with error propagation
fn load_settings_internal(path: &Path) -> Result<AppSettings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    save_settings_to(settings, &get_settings_path()?)
}

/// Save settings to an explicit path
pub fn save_settings_to(settings: &AppSettings, path: &Path) -> Result<(), StorageError> {
    // Ensure the parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to disk");
    Ok(())
}
