//! Environment group models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use appveyor_api::models::{Environment, Project};

use crate::errors::DeployError;

/// A named bundle of one project and the environments a build is released to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentGroup {
    /// User-chosen group name, unique among saved groups
    pub name: String,

    /// Project every environment deploys
    pub project: Project,

    /// Target environments in trigger order
    pub environments: Vec<Environment>,

    /// When the group record was written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl EnvironmentGroup {
    /// Create a new group
    pub fn new(name: impl Into<String>, project: Project, environments: Vec<Environment>) -> Self {
        Self {
            name: name.into(),
            project,
            environments,
            saved_at: None,
        }
    }

    /// Check the group can be persisted: a name, at least one environment, no duplicates
    ///
    /// Environments are deployed and reported by name, so two entries with the
    /// same name count as duplicates even when their ids differ.
    pub fn validate(&self) -> Result<(), DeployError> {
        if self.name.trim().is_empty() {
            return Err(DeployError::ValidationError(
                "group name must not be empty".to_string(),
            ));
        }

        if self.environments.is_empty() {
            return Err(DeployError::ValidationError(format!(
                "group '{}' has no environments",
                self.name
            )));
        }

        for (i, env) in self.environments.iter().enumerate() {
            if self.environments[..i].iter().any(|e| e.name == env.name) {
                return Err(DeployError::ValidationError(format!(
                    "environment '{}' appears more than once in group '{}'",
                    env.name, self.name
                )));
            }
        }

        Ok(())
    }
}
