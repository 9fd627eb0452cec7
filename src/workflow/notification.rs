//! Transient notifications
//!
//! A notification is visible for [`VISIBLE_FOR`], then plays an exit
//! transition for [`EXIT_FOR`] before the dismissal callback runs. Closing
//! it early skips straight to the exit transition.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};
use uuid::Uuid;

pub const VISIBLE_FOR: Duration = Duration::from_millis(4000);
pub const EXIT_FOR: Duration = Duration::from_millis(300);

/// Unknown kinds read as `Info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    #[serde(other)]
    Info,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Info => "info",
            NotificationKind::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Leaving,
    Dismissed,
}

/// Run one notification's lifecycle.
///
/// A message on `close` (or the visible window running out) starts the exit
/// transition; `on_dismiss` runs exactly once when it ends. A dropped close
/// sender only disables early closing.
pub async fn run_toast<P, D>(mut close: mpsc::UnboundedReceiver<()>, mut on_phase: P, on_dismiss: D)
where
    P: FnMut(ToastPhase),
    D: FnOnce(),
{
    tokio::select! {
        _ = sleep(VISIBLE_FOR) => {}
        Some(()) = close.recv() => {
            tracing::debug!("Notification closed early");
        }
    }

    on_phase(ToastPhase::Leaving);
    sleep(EXIT_FOR).await;
    on_phase(ToastPhase::Dismissed);
    on_dismiss();
}
