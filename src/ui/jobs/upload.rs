//! File upload panel for one job

use crate::app::AppState;
use crate::types::marketplace::EntityId;
use crate::workflow::notification::Notification;
use crate::workflow::upload::{UploadFile, UploadFlow, UploadState};
use dioxus::prelude::*;
use std::path::Path;

#[component]
pub fn UploadPanel(job_id: EntityId, on_uploaded: EventHandler<String>) -> Element {
    let app_state = use_context::<AppState>();
    let api = app_state.api;
    let mut notification = app_state.notification;
    let mut flow = use_signal(UploadFlow::new);
    let mut picked = use_signal(|| None::<UploadFile>);
    let mut pick_error = use_signal(|| None::<String>);

    let state = flow.read().state().clone();
    let busy = state.is_busy();
    let can_upload = !busy && picked.read().is_some();
    let status = state.status_text();
    let status_class = match &state {
        UploadState::Failed { .. } => "text-[var(--error)]",
        UploadState::Done { .. } => "text-[#34d399]",
        _ => "text-[var(--text-tertiary)]",
    };
    let picked_name = picked.read().as_ref().map(|f| f.name.clone());

    let handle_pick = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(path) = engine.files().into_iter().next() else {
            return;
        };
        let name = Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.clone());

        match engine.read_file(&path).await {
            Some(bytes) => {
                tracing::debug!("Picked {} ({} bytes)", name, bytes.len());
                pick_error.set(None);
                picked.set(Some(UploadFile { name, bytes }));
            }
            None => {
                tracing::warn!("Could not read {}", path);
                pick_error.set(Some(format!("Could not read {name}")));
            }
        }
    };

    let handle_upload = move |_| {
        let Some(file_name) = picked.read().as_ref().map(|f| f.name.clone()) else {
            return;
        };
        // The panel's flow is claimed before the task starts so a second
        // click is refused while this one is in flight
        if flow.write().begin(&file_name).is_err() {
            return;
        }
        let Some(file) = picked.write().take() else {
            return;
        };
        let mut running = flow.peek().clone();
        let api = api.read().clone();
        let job_id = job_id.clone();

        spawn(async move {
            let result = running
                .drive(api.as_ref(), &job_id, file, |s| flow.set(UploadFlow::from(s.clone())))
                .await;
            match result {
                Ok(file_key) => on_uploaded.call(file_key),
                Err(e) => {
                    tracing::error!("Upload for job {} failed: {}", job_id, e);
                    notification.set(Some(Notification::error(format!("Upload failed: {e}"))));
                }
            }
        });
    };

    rsx! {
        div {
            class: "p-3 rounded-xl bg-white/[0.03] border border-[var(--border-subtle)] space-y-2",

            div {
                class: "flex items-center gap-3",
                label {
                    class: if busy { "btn-ghost text-xs opacity-40 cursor-not-allowed" } else { "btn-ghost text-xs cursor-pointer" },
                    "Choose file"
                    input {
                        class: "hidden",
                        r#type: "file",
                        disabled: busy,
                        onchange: handle_pick,
                    }
                }
                span {
                    class: "flex-1 text-xs truncate text-[var(--text-secondary)]",
                    {picked_name.unwrap_or_else(|| "No file selected".to_string())}
                }
                button {
                    class: "btn-primary text-xs",
                    disabled: !can_upload,
                    onclick: handle_upload,
                    if busy { "Uploading..." } else { "Upload" }
                }
            }

            if !status.is_empty() {
                p { class: "text-xs {status_class}", "{status}" }
            }
            if let Some(message) = pick_error() {
                p { class: "text-xs text-[var(--error)]", "{message}" }
            }
        }
    }
}
