//! Registration
//!
//! Form validation, submission and the delayed hand-off to the sign-in
//! screen.

use thiserror::Error;
use tokio::time::{sleep, Duration};

use crate::api::{ApiError, MarketplaceApi};
use crate::types::marketplace::{RegisterRequest, Role};

/// Delay between a successful registration and the switch to sign-in
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(2000);

pub const SUCCESS_MESSAGE: &str = "Registration successful! Redirecting to sign in...";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl RegistrationForm {
    /// Check the form without contacting the network
    pub fn validate(&self) -> Result<RegisterRequest, RegistrationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty() {
            return Err(RegistrationError::MissingField("Name"));
        }
        if email.is_empty() {
            return Err(RegistrationError::MissingField("Email"));
        }
        if self.password.is_empty() {
            return Err(RegistrationError::MissingField("Password"));
        }
        match email.split_once('@') {
            Some((user, domain)) if !user.is_empty() && !domain.is_empty() => {}
            _ => return Err(RegistrationError::InvalidEmail),
        }

        Ok(RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            role: self.role,
        })
    }
}

/// What the form shows after a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    Rejected(String),
}

impl RegistrationOutcome {
    pub fn message(&self) -> &str {
        match self {
            RegistrationOutcome::Registered => SUCCESS_MESSAGE,
            RegistrationOutcome::Rejected(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RegistrationOutcome::Registered)
    }
}

/// Text shown for a failed registration call
pub fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Status {
            message: Some(message),
            ..
        } => format!("Error: {message}"),
        ApiError::Status {
            status,
            message: None,
        } => format!("Error: Registration failed ({status})"),
        other => format!("Error: {other}"),
    }
}

/// Validate and submit the form
pub async fn submit_registration<A>(api: &A, form: &RegistrationForm) -> RegistrationOutcome
where
    A: MarketplaceApi + ?Sized,
{
    let request = match form.validate() {
        Ok(request) => request,
        Err(e) => return RegistrationOutcome::Rejected(format!("Error: {e}")),
    };

    match api.register(&request).await {
        Ok(()) => {
            tracing::info!("Registered {} as {}", request.email, request.role.as_str());
            RegistrationOutcome::Registered
        }
        Err(e) => {
            tracing::warn!("Registration failed: {}", e);
            RegistrationOutcome::Rejected(failure_message(&e))
        }
    }
}

/// Submit the form, show the outcome, and after a success switch to
/// sign-in once [`LOGIN_REDIRECT_DELAY`] has passed
pub async fn run_registration<A, M, S>(
    api: &A,
    form: &RegistrationForm,
    mut on_message: M,
    on_switch_to_login: S,
) -> RegistrationOutcome
where
    A: MarketplaceApi + ?Sized,
    M: FnMut(&RegistrationOutcome),
    S: FnOnce(),
{
    let outcome = submit_registration(api, form).await;
    on_message(&outcome);

    if outcome.is_success() {
        sleep(LOGIN_REDIRECT_DELAY).await;
        on_switch_to_login();
    }
    outcome
}
