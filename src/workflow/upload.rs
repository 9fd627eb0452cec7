//! Upload flow
//!
//! Drives the two-phase upload protocol for one file: ask the API for a
//! presigned URL, PUT the bytes there, then tell the API which storage key
//! belongs to the job.

use std::fmt;
use thiserror::Error;

use crate::api::{ApiError, MarketplaceApi};
use crate::types::marketplace::{EntityId, UploadTicket};

/// Protocol phase an upload failed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Authorization,
    Transfer,
    Notification,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStage::Authorization => write!(f, "Could not get an upload URL"),
            UploadStage::Transfer => write!(f, "Upload to storage failed"),
            UploadStage::Notification => write!(f, "Could not submit the file"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("An upload is already in progress")]
    Busy,
    #[error("{stage}: {source}")]
    Failed {
        stage: UploadStage,
        #[source]
        source: ApiError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    RequestingAuthorization {
        file_name: String,
    },
    Transferring {
        file_name: String,
        ticket: UploadTicket,
    },
    Notifying {
        file_name: String,
        file_key: String,
    },
    Done {
        file_name: String,
        file_key: String,
    },
    Failed {
        file_name: String,
        stage: UploadStage,
        reason: String,
    },
}

impl UploadState {
    /// An upload is in flight; the start control stays disabled
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            UploadState::RequestingAuthorization { .. }
                | UploadState::Transferring { .. }
                | UploadState::Notifying { .. }
        )
    }

    /// Short status line for the view
    pub fn status_text(&self) -> String {
        match self {
            UploadState::Idle => String::new(),
            UploadState::RequestingAuthorization { file_name } => {
                format!("Preparing {file_name}...")
            }
            UploadState::Transferring { file_name, .. } => format!("Uploading {file_name}..."),
            UploadState::Notifying { file_name, .. } => format!("Submitting {file_name}..."),
            UploadState::Done { file_name, .. } => format!("{file_name} uploaded"),
            UploadState::Failed { stage, reason, .. } => format!("{stage}: {reason}"),
        }
    }
}

/// A file picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFlow {
    state: UploadState,
}

impl Default for UploadFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl From<UploadState> for UploadFlow {
    fn from(state: UploadState) -> Self {
        Self { state }
    }
}

impl UploadFlow {
    pub fn new() -> Self {
        Self {
            state: UploadState::Idle,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Claim the flow for `file_name` by entering `RequestingAuthorization`.
    /// Refused while another upload is in flight.
    pub fn begin(&mut self, file_name: &str) -> Result<(), UploadError> {
        if self.state.is_busy() {
            tracing::debug!("Ignoring upload of {} while busy", file_name);
            return Err(UploadError::Busy);
        }
        self.state = UploadState::RequestingAuthorization {
            file_name: file_name.to_string(),
        };
        Ok(())
    }

    fn fail(&mut self, stage: UploadStage, source: ApiError) -> UploadError {
        let file_name = match &self.state {
            UploadState::RequestingAuthorization { file_name }
            | UploadState::Transferring { file_name, .. }
            | UploadState::Notifying { file_name, .. }
            | UploadState::Done { file_name, .. }
            | UploadState::Failed { file_name, .. } => file_name.clone(),
            UploadState::Idle => String::new(),
        };
        tracing::warn!("Upload of {} failed: {}: {}", file_name, stage, source);
        self.state = UploadState::Failed {
            file_name,
            stage,
            reason: source.user_message(),
        };
        UploadError::Failed { stage, source }
    }

    /// Upload `file` for `job_id`, reporting every state change to
    /// `observe`. Returns the storage key on success.
    pub async fn run<A, F>(
        &mut self,
        api: &A,
        job_id: &EntityId,
        file: UploadFile,
        mut observe: F,
    ) -> Result<String, UploadError>
    where
        A: MarketplaceApi + ?Sized,
        F: FnMut(&UploadState),
    {
        self.begin(&file.name)?;
        observe(&self.state);
        self.drive(api, job_id, file, observe).await
    }

    /// Carry an upload claimed with [`UploadFlow::begin`] through its three
    /// phases. A failed phase skips the ones after it.
    pub async fn drive<A, F>(
        &mut self,
        api: &A,
        job_id: &EntityId,
        file: UploadFile,
        mut observe: F,
    ) -> Result<String, UploadError>
    where
        A: MarketplaceApi + ?Sized,
        F: FnMut(&UploadState),
    {
        let ticket = match api.request_upload_url(&file.name).await {
            Ok(ticket) => ticket,
            Err(e) => {
                let err = self.fail(UploadStage::Authorization, e);
                observe(&self.state);
                return Err(err);
            }
        };

        let upload_url = ticket.upload_url.clone();
        let file_key = ticket.file_key.clone();
        self.state = UploadState::Transferring {
            file_name: file.name.clone(),
            ticket,
        };
        observe(&self.state);

        if let Err(e) = api.put_object(&upload_url, file.bytes).await {
            let err = self.fail(UploadStage::Transfer, e);
            observe(&self.state);
            return Err(err);
        }

        self.state = UploadState::Notifying {
            file_name: file.name.clone(),
            file_key: file_key.clone(),
        };
        observe(&self.state);

        if let Err(e) = api.submit_files(job_id, &[file_key.clone()]).await {
            let err = self.fail(UploadStage::Notification, e);
            observe(&self.state);
            return Err(err);
        }

        tracing::info!("Uploaded {} as {} for job {}", file.name, file_key, job_id);
        self.state = UploadState::Done {
            file_name: file.name,
            file_key: file_key.clone(),
        };
        observe(&self.state);
        Ok(file_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::marketplace::{
        JobReceipt, NewJob, Photographer, Profile, RegisterRequest,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records calls and fails the configured phase
    #[derive(Default)]
    struct ScriptedApi {
        fail_at: Option<UploadStage>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedApi {
        fn failing_at(stage: UploadStage) -> Self {
            Self {
                fail_at: Some(stage),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn outcome(&self, stage: UploadStage) -> Result<(), ApiError> {
            if self.fail_at == Some(stage) {
                Err(ApiError::Status {
                    status: 500,
                    message: Some("boom".into()),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl MarketplaceApi for ScriptedApi {
        async fn register(&self, _request: &RegisterRequest) -> Result<(), ApiError> {
            unreachable!()
        }

        async fn list_photographers(&self) -> Result<Vec<Photographer>, ApiError> {
            unreachable!()
        }

        async fn fetch_profile(&self, _id: &EntityId) -> Result<Profile, ApiError> {
            unreachable!()
        }

        async fn create_job(&self, _job: &NewJob) -> Result<JobReceipt, ApiError> {
            unreachable!()
        }

        async fn request_upload_url(&self, filename: &str) -> Result<UploadTicket, ApiError> {
            self.calls.lock().unwrap().push(format!("authorize {filename}"));
            self.outcome(UploadStage::Authorization)?;
            Ok(UploadTicket {
                upload_url: format!("https://bucket.test/{filename}?sig=1"),
                file_key: format!("uploads/{filename}"),
            })
        }

        async fn put_object(&self, upload_url: &str, bytes: Vec<u8>) -> Result<(), ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("put {upload_url} {}", bytes.len()));
            self.outcome(UploadStage::Transfer)
        }

        async fn submit_files(
            &self,
            job_id: &EntityId,
            file_keys: &[String],
        ) -> Result<(), ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("submit {job_id} {}", file_keys.join(",")));
            self.outcome(UploadStage::Notification)
        }
    }

    fn file() -> UploadFile {
        UploadFile {
            name: "a.jpg".into(),
            bytes: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn test_full_success_runs_all_phases() {
        let api = ScriptedApi::default();
        let mut flow = UploadFlow::new();
        let mut seen = Vec::new();

        let key = flow
            .run(&api, &EntityId::new("7"), file(), |s| seen.push(s.clone()))
            .await
            .unwrap();

        assert_eq!(key, "uploads/a.jpg");
        assert_eq!(
            api.calls(),
            vec![
                "authorize a.jpg".to_string(),
                "put https://bucket.test/a.jpg?sig=1 3".to_string(),
                "submit 7 uploads/a.jpg".to_string(),
            ]
        );
        assert!(matches!(seen[0], UploadState::RequestingAuthorization { .. }));
        assert!(matches!(seen[1], UploadState::Transferring { .. }));
        assert!(matches!(seen[2], UploadState::Notifying { .. }));
        assert!(matches!(seen[3], UploadState::Done { .. }));
        assert_eq!(seen.len(), 4);
        assert!(!flow.state().is_busy());
    }

    #[tokio::test]
    async fn test_authorization_failure_skips_transfer_and_notify() {
        let api = ScriptedApi::failing_at(UploadStage::Authorization);
        let mut flow = UploadFlow::new();

        let err = flow
            .run(&api, &EntityId::new("7"), file(), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UploadError::Failed {
                stage: UploadStage::Authorization,
                ..
            }
        ));
        assert_eq!(api.calls(), vec!["authorize a.jpg".to_string()]);
        assert!(matches!(
            flow.state(),
            UploadState::Failed {
                stage: UploadStage::Authorization,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_transfer_failure_skips_notify() {
        let api = ScriptedApi::failing_at(UploadStage::Transfer);
        let mut flow = UploadFlow::new();

        let err = flow
            .run(&api, &EntityId::new("7"), file(), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UploadError::Failed {
                stage: UploadStage::Transfer,
                ..
            }
        ));
        assert_eq!(api.calls().len(), 2);
        assert!(api.calls().iter().all(|c| !c.starts_with("submit")));
        assert_eq!(
            flow.state().status_text(),
            "Upload to storage failed: boom"
        );
    }

    #[tokio::test]
    async fn test_notify_failure_is_reported() {
        let api = ScriptedApi::failing_at(UploadStage::Notification);
        let mut flow = UploadFlow::new();
        let result = flow.run(&api, &EntityId::new("7"), file(), |_| {}).await;
        assert!(matches!(
            result,
            Err(UploadError::Failed {
                stage: UploadStage::Notification,
                ..
            })
        ));
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_start_while_busy_is_ignored() {
        let api = ScriptedApi::default();
        let mut flow = UploadFlow::new();
        flow.begin("first.jpg").unwrap();
        assert_eq!(flow.begin("second.jpg"), Err(UploadError::Busy));

        let result = flow.run(&api, &EntityId::new("7"), file(), |_| {}).await;
        assert_eq!(result, Err(UploadError::Busy));
        assert!(api.calls().is_empty());
        assert_eq!(
            flow.state(),
            &UploadState::RequestingAuthorization {
                file_name: "first.jpg".into()
            }
        );
    }

    #[tokio::test]
    async fn test_terminal_flow_can_start_again() {
        let api = ScriptedApi::failing_at(UploadStage::Authorization);
        let mut flow = UploadFlow::new();
        let _ = flow.run(&api, &EntityId::new("7"), file(), |_| {}).await;

        let api = ScriptedApi::default();
        assert!(flow.run(&api, &EntityId::new("7"), file(), |_| {}).await.is_ok());
    }

    #[tokio::test]
    async fn test_claimed_flow_is_driven_from_a_copy() {
        let api = ScriptedApi::default();
        let mut shared = UploadFlow::new();

        shared.begin("a.jpg").unwrap();
        let mut running = shared.clone();
        assert_eq!(shared.begin("b.jpg"), Err(UploadError::Busy));

        let key = running
            .drive(&api, &EntityId::new("7"), file(), |s| {
                shared = UploadFlow::from(s.clone());
            })
            .await
            .unwrap();

        assert_eq!(key, "uploads/a.jpg");
        assert_eq!(api.calls().len(), 3);
        assert_eq!(shared, running);
        assert!(shared.begin("b.jpg").is_ok());
    }
}
