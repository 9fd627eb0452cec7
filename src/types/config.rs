//! Client configuration
//!
//! Endpoints and storage key handed to the API client and the local store
//! at construction time.

use serde::{Deserialize, Serialize};

/// Default base URL of the marketplace API
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// Default base URL that storage-relative image keys are resolved against
pub const DEFAULT_STORAGE_BASE_URL: &str = "https://storage.lensmarket.app";
/// Default key of the persisted blob
pub const DEFAULT_STORAGE_KEY: &str = "lensmarket_state";

/// Configuration injected into the API client and the local store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the marketplace API, without a trailing slash
    pub api_base_url: String,
    /// Base URL of the object storage bucket, without a trailing slash
    pub storage_base_url: String,
    /// Key the persisted blob lives under
    pub storage_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_base_url: DEFAULT_STORAGE_BASE_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    /// Resolve an image reference to something a renderer can load.
    ///
    /// Absolute URLs pass through untouched; anything else is treated as a
    /// key inside the storage bucket.
    pub fn resolve_image(&self, reference: &str) -> String {
        resolve_image_ref(&self.storage_base_url, reference)
    }
}

/// Resolve an image reference against a storage base URL
pub fn resolve_image_ref(storage_base_url: &str, reference: &str) -> String {
    let reference = reference.trim();
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return reference.to_string();
    }
    format!(
        "{}/{}",
        storage_base_url.trim_end_matches('/'),
        reference.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_absolute_image_passes_through() {
        let url = "https://cdn.example.com/a.jpg";
        assert_eq!(resolve_image_ref("https://bucket.test", url), url);
        assert_eq!(
            resolve_image_ref("https://bucket.test", "http://plain.test/b.png"),
            "http://plain.test/b.png"
        );
    }

    #[test]
    fn test_storage_key_is_joined_to_base() {
        assert_eq!(
            resolve_image_ref("https://bucket.test/", "uploads/me.jpg"),
            "https://bucket.test/uploads/me.jpg"
        );
        assert_eq!(
            resolve_image_ref("https://bucket.test", "/uploads/me.jpg"),
            "https://bucket.test/uploads/me.jpg"
        );
    }
}
