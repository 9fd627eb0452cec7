//! Jobs screen: post a job, assign photographers, upload deliverables

pub mod assign;
pub mod upload;

use crate::app::{AppState, Route};
use crate::types::marketplace::{format_price, Assignment, EntityId};
use crate::types::session::RecentJob;
use crate::ui::jobs::assign::AssignDialog;
use crate::ui::jobs::upload::UploadPanel;
use crate::ui::register::Field;
use crate::workflow::job::JobForm;
use crate::workflow::notification::Notification;
use dioxus::prelude::*;
use uuid::Uuid;

#[component]
pub fn JobsView() -> Element {
    let app_state = use_context::<AppState>();
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut price = use_signal(String::new);
    let mut posting = use_signal(|| false);
    let mut form_error = use_signal(|| None::<String>);
    let mut assigning = use_signal(|| None::<Uuid>);

    let session = app_state.session.read().clone();
    let Some(session) = session else {
        let mut route = app_state.route;
        return rsx! {
            div {
                class: "max-w-md mx-auto text-center py-20 space-y-4",
                p { class: "text-[var(--text-secondary)]", "Sign in to post and manage jobs." }
                button { class: "btn-primary", onclick: move |_| route.set(Route::SignIn), "Sign in" }
            }
        };
    };

    let app_state_post = app_state.clone();
    let client_id = session.client_id.clone();
    let handle_post = move |evt: FormEvent| {
        evt.prevent_default();
        if posting() {
            return;
        }
        let form = JobForm {
            title: title(),
            description: description(),
            price: price(),
        };
        let request = match form.to_request(&client_id) {
            Ok(request) => request,
            Err(e) => {
                form_error.set(Some(e.to_string()));
                return;
            }
        };

        form_error.set(None);
        posting.set(true);
        let mut app_state = app_state_post.clone();
        spawn(async move {
            let result = app_state.api().create_job(&request).await;
            posting.set(false);
            match result {
                Ok(receipt) => {
                    let job = RecentJob::new(receipt.id, request.title.clone(), request.price);
                    app_state.update_session(|s| s.push_job(job));
                    app_state.notify(Notification::success(format!(
                        "Job \"{}\" posted",
                        request.title
                    )));
                    title.set(String::new());
                    description.set(String::new());
                    price.set(String::new());
                }
                Err(e) => {
                    tracing::error!("Failed to create job: {}", e);
                    let message = format!("Could not post the job: {}", e.user_message());
                    form_error.set(Some(message.clone()));
                    app_state.notify(Notification::error(message));
                }
            }
        });
    };

    let dialog_job = assigning().and_then(|local_id| {
        session
            .job(local_id)
            .map(|job| (local_id, job.title.clone()))
    });
    let mut app_state_assign = app_state.clone();

    rsx! {
        div {
            class: "max-w-3xl mx-auto space-y-8 animate-fade-in-up pb-8",

            div {
                h1 { class: "text-2xl font-semibold", "My jobs" }
                p { class: "text-sm text-[var(--text-tertiary)]", "Posting as {session.greeting_name()}" }
            }

            // Post form
            form {
                class: "p-5 rounded-2xl glass-md space-y-4",
                onsubmit: handle_post,

                h3 { class: "text-base font-semibold", "Post a new job" }
                Field { label: "Title",
                    input {
                        class: "glass-input w-full px-3 py-2",
                        value: "{title}",
                        oninput: move |evt| title.set(evt.value()),
                    }
                }
                Field { label: "Description",
                    textarea {
                        class: "glass-input w-full px-3 py-2 resize-none",
                        rows: "3",
                        value: "{description}",
                        oninput: move |evt| description.set(evt.value()),
                    }
                }
                Field { label: "Budget",
                    input {
                        class: "glass-input w-full px-3 py-2",
                        value: "{price}",
                        oninput: move |evt| price.set(evt.value()),
                    }
                }
                button {
                    class: "btn-primary",
                    r#type: "submit",
                    disabled: posting(),
                    if posting() { "Posting..." } else { "Post job" }
                }
                if let Some(message) = form_error() {
                    p { class: "text-sm text-[var(--error)]", "{message}" }
                }
            }

            // Recent jobs
            div {
                class: "space-y-3",
                h3 { class: "text-base font-semibold", "Recent jobs" }

                if session.recent_jobs.is_empty() {
                    p { class: "text-sm text-[var(--text-tertiary)]", "Nothing posted yet." }
                }

                {session.recent_jobs.iter().cloned().map(|job| {
                    let mut app_state_upload = app_state.clone();
                    let local_id = job.local_id;
                    rsx! {
                        JobCard {
                            key: "{local_id}",
                            job: job.clone(),
                            on_assign: move |_| assigning.set(Some(local_id)),
                            on_uploaded: move |(job_id, file_key): (EntityId, String)| {
                                app_state_upload.update_session(|s| {
                                    s.record_submission(&job_id, file_key.clone());
                                });
                                app_state_upload.notify(Notification::success("File submitted"));
                            },
                        }
                    }
                })}
            }

            if let Some((local_id, job_title)) = dialog_job {
                AssignDialog {
                    job_title,
                    on_assign: move |assignment: Assignment| {
                        let description = assignment.package_description.clone();
                        app_state_assign.update_session(|s| {
                            s.record_assignment(local_id, assignment);
                        });
                        app_state_assign.notify(Notification::success(format!("Assigned: {description}")));
                        assigning.set(None);
                    },
                    on_close: move |_| assigning.set(None),
                }
            }
        }
    }
}

#[component]
fn JobCard(
    job: RecentJob,
    on_assign: EventHandler<()>,
    on_uploaded: EventHandler<(EntityId, String)>,
) -> Element {
    let created = job.created_at.format("%b %e, %Y").to_string();
    let budget = format_price(job.price);
    let upload_target = job.id.clone();
    let handle_uploaded = {
        let job_id = job.id.clone();
        move |file_key: String| {
            if let Some(job_id) = &job_id {
                on_uploaded.call((job_id.clone(), file_key));
            }
        }
    };

    rsx! {
        div {
            class: "p-5 rounded-2xl glass-md space-y-3",

            div {
                class: "flex items-start justify-between gap-4",
                div {
                    div { class: "font-medium", "{job.title}" }
                    div { class: "text-xs text-[var(--text-tertiary)]", "Budget {budget} · posted {created}" }
                }
                button {
                    class: "btn-ghost text-sm",
                    onclick: move |_| on_assign.call(()),
                    if job.assignment.is_some() { "Reassign" } else { "Assign photographer" }
                }
            }

            if let Some(assignment) = &job.assignment {
                div {
                    class: "text-sm text-[var(--text-secondary)]",
                    "Photographer {assignment.photographer_id} · {assignment.package_description}"
                }
            }

            if let Some(job_id) = upload_target {
                UploadPanel { job_id, on_uploaded: handle_uploaded }
            } else {
                p {
                    class: "text-xs text-[var(--text-tertiary)]",
                    "The server did not return an id for this job, so files cannot be submitted from here."
                }
            }

            if !job.submitted_files.is_empty() {
                div {
                    class: "text-xs text-[var(--text-tertiary)] space-y-1",
                    div { class: "uppercase tracking-widest font-semibold", "Submitted files" }
                    for file_key in job.submitted_files.iter() {
                        div { class: "font-mono truncate", "{file_key}" }
                    }
                }
            }
        }
    }
}
