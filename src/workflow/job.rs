//! Job posting form

use thiserror::Error;

use crate::types::marketplace::NewJob;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobFormError {
    #[error("Please sign in before posting a job")]
    NotSignedIn,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Budget must be a non-negative number")]
    InvalidPrice,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobForm {
    pub title: String,
    pub description: String,
    /// Budget as typed by the user
    pub price: String,
}

impl JobForm {
    /// Build the request body for `client_id`
    pub fn to_request(&self, client_id: &str) -> Result<NewJob, JobFormError> {
        if client_id.trim().is_empty() {
            return Err(JobFormError::NotSignedIn);
        }
        let title = self.title.trim();
        if title.is_empty() {
            return Err(JobFormError::MissingField("Title"));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(JobFormError::MissingField("Description"));
        }

        let price: f64 = self
            .price
            .trim()
            .replace(',', "")
            .parse()
            .map_err(|_| JobFormError::InvalidPrice)?;
        if !price.is_finite() || price < 0.0 {
            return Err(JobFormError::InvalidPrice);
        }

        Ok(NewJob {
            title: title.to_string(),
            description: description.to_string(),
            price,
            client_id: client_id.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(price: &str) -> JobForm {
        JobForm {
            title: " Wedding shoot ".into(),
            description: "Saturday evening".into(),
            price: price.into(),
        }
    }

    #[test]
    fn test_valid_form() {
        let job = form("12,500").to_request("c-1").unwrap();
        assert_eq!(job.title, "Wedding shoot");
        assert_eq!(job.price, 12500.0);
        assert_eq!(job.client_id, "c-1");
    }

    #[test]
    fn test_rejections() {
        assert_eq!(form("10").to_request(" "), Err(JobFormError::NotSignedIn));
        assert_eq!(form("ten").to_request("c"), Err(JobFormError::InvalidPrice));
        assert_eq!(form("-1").to_request("c"), Err(JobFormError::InvalidPrice));
        assert_eq!(form("NaN").to_request("c"), Err(JobFormError::InvalidPrice));

        let mut missing = form("10");
        missing.description.clear();
        assert_eq!(
            missing.to_request("c"),
            Err(JobFormError::MissingField("Description"))
        );
    }
}
