//! Session types
//!
//! The shape the UI keeps in the persisted blob.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::marketplace::{Assignment, EntityId};

/// Locally remembered state of the signed-in client
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    /// Identifier passed to the API as `clientId`
    pub client_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub recent_jobs: Vec<RecentJob>,
}

/// A job posted from this client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentJob {
    /// Stable local identity; positions in `recent_jobs` shift as jobs are posted
    #[serde(default = "Uuid::new_v4")]
    pub local_id: Uuid,
    /// Server id when the create acknowledgment carried one
    #[serde(default)]
    pub id: Option<EntityId>,
    pub title: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub assignment: Option<Assignment>,
    #[serde(default)]
    pub submitted_files: Vec<String>,
}

impl Session {
    pub fn new(client_id: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            client_id: client_id.into(),
            display_name: display_name.filter(|n| !n.trim().is_empty()),
            recent_jobs: Vec::new(),
        }
    }

    /// Name to greet the user with
    pub fn greeting_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.client_id)
    }

    /// Newest jobs first
    pub fn push_job(&mut self, job: RecentJob) {
        self.recent_jobs.insert(0, job);
    }

    pub fn job(&self, local_id: Uuid) -> Option<&RecentJob> {
        self.recent_jobs.iter().find(|job| job.local_id == local_id)
    }

    pub fn record_assignment(&mut self, local_id: Uuid, assignment: Assignment) -> bool {
        match self
            .recent_jobs
            .iter_mut()
            .find(|job| job.local_id == local_id)
        {
            Some(job) => {
                job.assignment = Some(assignment);
                true
            }
            None => false,
        }
    }

    pub fn record_submission(&mut self, job_id: &EntityId, file_key: String) -> bool {
        match self
            .recent_jobs
            .iter_mut()
            .find(|job| job.id.as_ref() == Some(job_id))
        {
            Some(job) => {
                job.submitted_files.push(file_key);
                true
            }
            None => false,
        }
    }
}

impl RecentJob {
    pub fn new(id: Option<EntityId>, title: impl Into<String>, price: f64) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            id,
            title: title.into(),
            price,
            created_at: Utc::now(),
            assignment: None,
            submitted_files: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_display_name_is_dropped() {
        let session = Session::new("c-9", Some("  ".to_string()));
        assert!(session.display_name.is_none());
        assert_eq!(session.greeting_name(), "c-9");
    }

    #[test]
    fn test_jobs_are_newest_first() {
        let mut session = Session::new("c-1", None);
        session.push_job(RecentJob::new(None, "First", 10.0));
        session.push_job(RecentJob::new(None, "Second", 20.0));
        assert_eq!(session.recent_jobs[0].title, "Second");
    }

    #[test]
    fn test_record_submission_matches_job_id() {
        let mut session = Session::new("c-1", None);
        session.push_job(RecentJob::new(Some(EntityId::new("j1")), "Gala", 10.0));
        assert!(session.record_submission(&EntityId::new("j1"), "k/1.jpg".into()));
        assert!(!session.record_submission(&EntityId::new("nope"), "k/2.jpg".into()));
        assert_eq!(session.recent_jobs[0].submitted_files, vec!["k/1.jpg".to_string()]);
    }

    fn basic_assignment() -> Assignment {
        Assignment {
            photographer_id: EntityId::new("p"),
            package_description: "Basic - 10".into(),
        }
    }

    #[test]
    fn test_record_assignment_unknown_job() {
        let mut session = Session::new("c-1", None);
        session.push_job(RecentJob::new(None, "Wedding", 10.0));
        assert!(!session.record_assignment(Uuid::new_v4(), basic_assignment()));
        assert!(session.recent_jobs[0].assignment.is_none());
    }

    #[test]
    fn test_assignment_follows_job_when_another_is_posted() {
        let mut session = Session::new("c-1", None);
        session.push_job(RecentJob::new(None, "Wedding", 10.0));
        let wedding = session.recent_jobs[0].local_id;

        // A post completing while the dialog is open shifts positions
        session.push_job(RecentJob::new(None, "Gala", 20.0));
        assert!(session.record_assignment(wedding, basic_assignment()));

        let wedding_job = session.job(wedding).unwrap();
        assert_eq!(wedding_job.title, "Wedding");
        assert_eq!(wedding_job.assignment, Some(basic_assignment()));
        assert!(session.recent_jobs[0].assignment.is_none());
        assert_eq!(session.recent_jobs[0].title, "Gala");
    }

    #[test]
    fn test_blob_without_local_id_still_loads() {
        let job: RecentJob = serde_json::from_value(serde_json::json!({
            "title": "Old",
            "price": 5.0,
            "created_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(job.title, "Old");
        assert!(job.assignment.is_none());
    }
}
