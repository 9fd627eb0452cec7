//! Assign flow
//!
//! Two-step selection: pick a photographer from the directory, then pick
//! one of that photographer's packages. Confirming hands an [`Assignment`]
//! back to the caller.

use thiserror::Error;

use crate::types::marketplace::{Assignment, EntityId, Package, Photographer};

/// Reasons a transition was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    #[error("Please select a photographer first")]
    NoPhotographer,
    #[error("Please select a package")]
    NoPackage,
    #[error("This photographer has no packages to choose from")]
    NoPackagesOffered,
    #[error("Unknown photographer {0}")]
    UnknownPhotographer(EntityId),
    #[error("Unknown package")]
    UnknownPackage,
    #[error("This assignment is already finished")]
    Finished,
}

/// Where the flow currently is
#[derive(Debug, Clone, PartialEq)]
pub enum AssignStep {
    Searching,
    PackageSelection {
        photographer: Photographer,
        /// Index into `photographer.packages`
        package: Option<usize>,
    },
    Confirmed(Assignment),
    Cancelled,
}

/// Photographers whose name contains `query`, ignoring case
pub fn filter_photographers<'a>(
    photographers: &'a [Photographer],
    query: &str,
) -> Vec<&'a Photographer> {
    let needle = query.to_lowercase();
    photographers
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignFlow {
    photographers: Vec<Photographer>,
    loaded: bool,
    query: String,
    step: AssignStep,
}

impl Default for AssignFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignFlow {
    pub fn new() -> Self {
        Self {
            photographers: Vec::new(),
            loaded: false,
            query: String::new(),
            step: AssignStep::Searching,
        }
    }

    pub fn step(&self) -> &AssignStep {
        &self.step
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn photographers(&self) -> &[Photographer] {
        &self.photographers
    }

    /// True until a directory has been delivered, or after [`Self::invalidate`]
    pub fn needs_fetch(&self) -> bool {
        !self.loaded
    }

    pub fn set_photographers(&mut self, photographers: Vec<Photographer>) {
        self.photographers = photographers;
        self.loaded = true;
    }

    /// Ask for a fresh directory on the next open
    pub fn invalidate(&mut self) {
        self.loaded = false;
    }

    /// Start over on the search step, keeping the fetched directory
    pub fn reopen(&mut self) {
        self.query.clear();
        self.step = AssignStep::Searching;
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.step, AssignStep::Confirmed(_) | AssignStep::Cancelled)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        if matches!(self.step, AssignStep::Searching) {
            self.query = query.into();
        }
    }

    /// Directory entries matching the current query
    pub fn visible(&self) -> Vec<&Photographer> {
        filter_photographers(&self.photographers, &self.query)
    }

    pub fn select_photographer(&mut self, id: &EntityId) -> Result<(), AssignError> {
        if !matches!(self.step, AssignStep::Searching) {
            return Err(AssignError::Finished);
        }
        let photographer = self
            .photographers
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| AssignError::UnknownPhotographer(id.clone()))?;

        tracing::debug!("Selected photographer {}", photographer.id);
        self.step = AssignStep::PackageSelection {
            photographer,
            package: None,
        };
        Ok(())
    }

    /// Return to the search step, dropping the selection
    pub fn back(&mut self) {
        if matches!(self.step, AssignStep::PackageSelection { .. }) {
            self.step = AssignStep::Searching;
        }
    }

    pub fn pick_package(&mut self, index: usize) -> Result<(), AssignError> {
        match &mut self.step {
            AssignStep::PackageSelection {
                photographer,
                package,
            } => {
                if photographer.packages.is_empty() {
                    return Err(AssignError::NoPackagesOffered);
                }
                if index >= photographer.packages.len() {
                    return Err(AssignError::UnknownPackage);
                }
                *package = Some(index);
                Ok(())
            }
            AssignStep::Searching => Err(AssignError::NoPhotographer),
            AssignStep::Confirmed(_) | AssignStep::Cancelled => Err(AssignError::Finished),
        }
    }

    pub fn selected_package(&self) -> Option<&Package> {
        match &self.step {
            AssignStep::PackageSelection {
                photographer,
                package: Some(index),
            } => photographer.packages.get(*index),
            _ => None,
        }
    }

    pub fn can_confirm(&self) -> bool {
        self.selected_package().is_some()
    }

    /// Finish the flow. On rejection nothing changes.
    pub fn confirm(&mut self) -> Result<Assignment, AssignError> {
        let assignment = match &self.step {
            AssignStep::Searching => return Err(AssignError::NoPhotographer),
            AssignStep::Confirmed(_) | AssignStep::Cancelled => {
                return Err(AssignError::Finished)
            }
            AssignStep::PackageSelection {
                photographer,
                package,
            } => {
                let package = package
                    .and_then(|index| photographer.packages.get(index))
                    .ok_or(AssignError::NoPackage)?;
                Assignment {
                    photographer_id: photographer.id.clone(),
                    package_description: package.describe(),
                }
            }
        };

        tracing::info!(
            "Assigned photographer {} ({})",
            assignment.photographer_id,
            assignment.package_description
        );
        self.step = AssignStep::Confirmed(assignment.clone());
        Ok(assignment)
    }

    pub fn cancel(&mut self) {
        if !self.is_finished() {
            self.step = AssignStep::Cancelled;
        }
    }
}
