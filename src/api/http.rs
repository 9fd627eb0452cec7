//! HTTP implementation of the marketplace API

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::api::{ApiError, MarketplaceApi};
use crate::types::config::ClientConfig;
use crate::types::marketplace::{
    EntityId, JobReceipt, NewJob, Photographer, Profile, RegisterRequest, SubmitFiles,
    UploadTicket,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shape of error bodies; some routes use `detail` instead of `message`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message.or_else(|| match self.detail {
            Some(serde_json::Value::String(s)) => Some(s),
            _ => None,
        })
    }
}

/// reqwest-backed [`MarketplaceApi`]
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    config: ClientConfig,
}

impl HttpApi {
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("LensMarket/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to configure HTTP client, using defaults: {}", e);
                Client::new()
            });
        Self { client, config }
    }

    /// API URL for `segments`; each segment is percent-encoded on its own
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let base = &self.config.api_base_url;
        let mut url = Url::parse(base).map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Turn a non-success response into [`ApiError::Status`]
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message);
        tracing::warn!("API responded {} ({:?})", status, message);

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MarketplaceApi for HttpApi {
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        tracing::info!("Registering {} as {}", request.email, request.role.as_str());
        let response = self
            .client
            .post(self.endpoint(&["register"])?)
            .json(request)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_photographers(&self) -> Result<Vec<Photographer>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&["photographers"])?)
            .send()
            .await?;
        let photographers: Vec<Photographer> = Self::read_json(response).await?;
        tracing::debug!("Fetched {} photographers", photographers.len());
        Ok(photographers)
    }

    async fn fetch_profile(&self, id: &EntityId) -> Result<Profile, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&["profile", id.as_str()])?)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn create_job(&self, job: &NewJob) -> Result<JobReceipt, ApiError> {
        let response = self
            .client
            .post(self.endpoint(&["jobs"])?)
            .json(job)
            .send()
            .await?;
        let response = Self::check(response).await?;

        // The acknowledgment body is opaque; an empty or non-JSON body is fine
        let body = response.text().await?;
        let receipt = serde_json::from_str::<JobReceipt>(&body).unwrap_or_default();
        tracing::info!("Created job {:?} ({:?})", job.title, receipt.id);
        Ok(receipt)
    }

    async fn request_upload_url(&self, filename: &str) -> Result<UploadTicket, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&["upload-url"])?)
            .query(&[("filename", filename)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn put_object(&self, upload_url: &str, bytes: Vec<u8>) -> Result<(), ApiError> {
        if !(upload_url.starts_with("http://") || upload_url.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(upload_url.to_string()));
        }

        let size = bytes.len();
        let response = self.client.put(upload_url).body(bytes).send().await?;
        Self::check(response).await?;
        tracing::debug!("Transferred {} bytes to storage", size);
        Ok(())
    }

    async fn submit_files(&self, job_id: &EntityId, file_keys: &[String]) -> Result<(), ApiError> {
        let body = SubmitFiles {
            files: file_keys.to_vec(),
        };
        let response = self
            .client
            .post(self.endpoint(&["jobs", job_id.as_str(), "submit"])?)
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::marketplace::Role;
    use axum::{
        body::Bytes,
        extract::{Path, Query, State},
        http::StatusCode,
        routing::{get, post, put},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[derive(Clone, Default)]
    struct Recorded {
        base: Arc<Mutex<String>>,
        objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        submissions: Arc<Mutex<Vec<(String, Value)>>>,
        jobs: Arc<Mutex<Vec<Value>>>,
    }

    async fn photographers() -> Json<Value> {
        Json(json!([
            {"id": 1, "name": "Asha Rao", "location": "Pune",
             "profile_picture": "faces/asha.jpg",
             "packages": [{"name": "Basic", "price": 100, "features": "2h"}]},
            {"id": "p-2", "name": "Ben Ode"}
        ]))
    }

    async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["email"] == json!("taken@example.com") {
            return (StatusCode::CONFLICT, Json(json!({"message": "Email exists"})));
        }
        if body["role"] != json!("PHOTOGRAPHER") {
            return (StatusCode::BAD_REQUEST, Json(json!({"detail": "bad role"})));
        }
        (StatusCode::CREATED, Json(json!({"id": 5})))
    }

    async fn upload_url(
        State(state): State<Recorded>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        let name = params.get("filename").cloned().unwrap_or_default();
        let base = state.base.lock().unwrap().clone();
        Json(json!({
            "upload_url": format!("{base}/bucket/{name}"),
            "file_key": format!("uploads/{name}")
        }))
    }

    async fn store_object(
        State(state): State<Recorded>,
        Path(key): Path<String>,
        body: Bytes,
    ) -> StatusCode {
        state.objects.lock().unwrap().insert(key, body.to_vec());
        StatusCode::OK
    }

    async fn submit(
        State(state): State<Recorded>,
        Path(job_id): Path<String>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        state.submissions.lock().unwrap().push((job_id, body));
        Json(json!({"ok": true}))
    }

    async fn create_job(State(state): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
        state.jobs.lock().unwrap().push(body);
        Json(json!({"_id": "job-1", "status": "OPEN"}))
    }

    async fn profile(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
        if id != "1" {
            return Err(StatusCode::NOT_FOUND);
        }
        Ok(Json(json!({
            "name": "Asha Rao",
            "portfolio": ["a.jpg", "https://cdn.test/b.jpg"]
        })))
    }

    async fn spawn_server() -> (HttpApi, Recorded) {
        let state = Recorded::default();
        let app = Router::new()
            .route("/photographers", get(photographers))
            .route("/register", post(register))
            .route("/upload-url", get(upload_url))
            .route("/bucket/:key", put(store_object))
            .route("/jobs", post(create_job))
            .route("/jobs/:id/submit", post(submit))
            .route("/profile/:id", get(profile))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        *state.base.lock().unwrap() = base.clone();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let api = HttpApi::new(ClientConfig {
            api_base_url: base,
            ..ClientConfig::default()
        });
        (api, state)
    }

    #[tokio::test]
    async fn test_list_photographers_decodes_mixed_ids() {
        let (api, _) = spawn_server().await;
        let list = api.list_photographers().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id.as_str(), "1");
        assert_eq!(list[0].packages[0].price, 100.0);
        assert_eq!(list[1].id.as_str(), "p-2");
        assert!(list[1].packages.is_empty());
    }

    #[tokio::test]
    async fn test_register_surfaces_server_message() {
        let (api, _) = spawn_server().await;
        let mut request = RegisterRequest {
            name: "Asha".into(),
            email: "taken@example.com".into(),
            password: "pw".into(),
            role: Role::Photographer,
        };

        let err = api.register(&request).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 409,
                message: Some("Email exists".into())
            }
        );

        request.email = "new@example.com".into();
        api.register(&request).await.unwrap();

        request.role = Role::Client;
        let err = api.register(&request).await.unwrap_err();
        assert_eq!(err.server_message(), Some("bad role"));
    }

    #[tokio::test]
    async fn test_upload_protocol_round_trip() {
        let (api, state) = spawn_server().await;

        let ticket = api.request_upload_url("shot.jpg").await.unwrap();
        assert_eq!(ticket.file_key, "uploads/shot.jpg");

        api.put_object(&ticket.upload_url, b"jpeg-bytes".to_vec())
            .await
            .unwrap();
        assert_eq!(
            state.objects.lock().unwrap().get("shot.jpg").cloned(),
            Some(b"jpeg-bytes".to_vec())
        );

        api.submit_files(&EntityId::new("42"), &[ticket.file_key.clone()])
            .await
            .unwrap();
        let submissions = state.submissions.lock().unwrap().clone();
        assert_eq!(
            submissions,
            vec![("42".to_string(), json!({"files": ["uploads/shot.jpg"]}))]
        );
    }

    #[tokio::test]
    async fn test_create_job_sends_client_id() {
        let (api, state) = spawn_server().await;
        let receipt = api
            .create_job(&NewJob {
                title: "Wedding".into(),
                description: "Two days".into(),
                price: 1500.0,
                client_id: "c-1".into(),
            })
            .await
            .unwrap();

        assert_eq!(receipt.id, Some(EntityId::new("job-1")));
        let jobs = state.jobs.lock().unwrap().clone();
        assert_eq!(jobs[0]["clientId"], json!("c-1"));
        assert_eq!(jobs[0]["price"], json!(1500.0));
    }

    #[tokio::test]
    async fn test_profile_not_found() {
        let (api, _) = spawn_server().await;
        let profile = api.fetch_profile(&EntityId::new("1")).await.unwrap();
        assert_eq!(profile.portfolio.len(), 2);
        assert_eq!(profile.display_bio(), "No bio provided");

        let err = api.fetch_profile(&EntityId::new("9")).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, message: None }));
    }

    #[tokio::test]
    async fn test_ids_are_encoded_as_one_path_segment() {
        let (api, state) = spawn_server().await;
        let awkward = EntityId::new("a/b?c#d");

        api.submit_files(&awkward, &["k".to_string()]).await.unwrap();
        let submissions = state.submissions.lock().unwrap().clone();
        assert_eq!(submissions[0].0, "a/b?c#d");

        let err = api.fetch_profile(&EntityId::new("1/../1")).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = HttpApi::new(ClientConfig {
            api_base_url: "http://api.test/v1/".into(),
            ..ClientConfig::default()
        });
        let url = api.endpoint(&["jobs", "7 x", "submit"]).unwrap();
        assert_eq!(url.as_str(), "http://api.test/v1/jobs/7%20x/submit");

        let api = HttpApi::new(ClientConfig {
            api_base_url: "not a url".into(),
            ..ClientConfig::default()
        });
        assert!(matches!(api.endpoint(&["jobs"]), Err(ApiError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_put_object_rejects_relative_url() {
        let (api, _) = spawn_server().await;
        let err = api.put_object("/bucket/x", vec![1]).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let api = HttpApi::new(ClientConfig {
            api_base_url: "http://127.0.0.1:9".into(),
            ..ClientConfig::default()
        });
        let err = api.list_photographers().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
