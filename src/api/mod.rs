//! Marketplace API surface
//!
//! The views talk to the remote API through [`MarketplaceApi`]; [`HttpApi`]
//! is the reqwest-backed implementation.

pub mod http;

pub use http::HttpApi;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::marketplace::{
    EntityId, JobReceipt, NewJob, Photographer, Profile, RegisterRequest, UploadTicket,
};

/// API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Request failed with status {status}")]
    Status {
        status: u16,
        /// `message` field of the error body, when the server sent one
        message: Option<String>,
    },
    #[error("Invalid response: {0}")]
    Decode(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Message the server attached to a failed response
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Text suitable for showing inline in a form
    pub fn user_message(&self) -> String {
        match self.server_message() {
            Some(message) => message.to_string(),
            None => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::Status {
                status: status.as_u16(),
                message: None,
            }
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Operations the client performs against the marketplace API
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// `POST /register`
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;

    /// `GET /photographers`
    async fn list_photographers(&self) -> Result<Vec<Photographer>, ApiError>;

    /// `GET /profile/{id}`
    async fn fetch_profile(&self, id: &EntityId) -> Result<Profile, ApiError>;

    /// `POST /jobs`
    async fn create_job(&self, job: &NewJob) -> Result<JobReceipt, ApiError>;

    /// `GET /upload-url?filename=<name>`
    async fn request_upload_url(&self, filename: &str) -> Result<UploadTicket, ApiError>;

    /// `PUT <upload_url>` with the raw file bytes
    async fn put_object(&self, upload_url: &str, bytes: Vec<u8>) -> Result<(), ApiError>;

    /// `POST /jobs/{job_id}/submit`
    async fn submit_files(&self, job_id: &EntityId, file_keys: &[String]) -> Result<(), ApiError>;
}
