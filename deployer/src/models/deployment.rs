//! Deployment models

use std::collections::HashMap;
use std::fmt;

pub use appveyor_api::models::DeploymentId;

/// A deployment that was started and is being followed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentHandle {
    /// Remote deployment ID
    pub deployment_id: DeploymentId,

    /// Environment the deployment targets
    pub environment_name: String,
}

/// Terminal status reported by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentStatus {
    Success,
    Failed,
    Cancelled,
    Other(String),
}

impl DeploymentStatus {
    pub fn parse(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "success" => DeploymentStatus::Success,
            "failed" => DeploymentStatus::Failed,
            "cancelled" => DeploymentStatus::Cancelled,
            _ => DeploymentStatus::Other(status.to_string()),
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentStatus::Success => write!(f, "success"),
            DeploymentStatus::Failed => write!(f, "failed"),
            DeploymentStatus::Cancelled => write!(f, "cancelled"),
            DeploymentStatus::Other(status) => write!(f, "{}", status),
        }
    }
}

/// Final state of one environment's deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentOutcome {
    /// The deployment finished with the reported status
    Completed(DeploymentStatus),

    /// The deployment could not be started
    TriggerFailed(String),

    /// The API returned an ID already tracked for another environment
    DuplicateId(DeploymentId),

    /// Status queries kept failing, the final state is not known
    Unknown(String),

    /// The deployment did not finish within the wait timeout
    TimedOut,
}

impl DeploymentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeploymentOutcome::Completed(DeploymentStatus::Success))
    }
}

impl fmt::Display for DeploymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentOutcome::Completed(status) => write!(f, "{}", status),
            DeploymentOutcome::TriggerFailed(reason) => write!(f, "trigger failed: {}", reason),
            DeploymentOutcome::DuplicateId(id) => write!(f, "duplicate deployment id {}", id),
            DeploymentOutcome::Unknown(reason) => write!(f, "unknown: {}", reason),
            DeploymentOutcome::TimedOut => write!(f, "timed out"),
        }
    }
}

/// An environment whose deployment could not be started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerFailure {
    pub environment_name: String,
    pub reason: String,
}

/// Result of starting a deployment for every environment of a group
#[derive(Debug, Clone, Default)]
pub struct TriggerReport {
    /// Started deployments, in trigger order
    pub started: Vec<DeploymentHandle>,

    /// Environments whose trigger failed, in trigger order
    pub failed: Vec<TriggerFailure>,

    /// Started deployments whose ID collided with an earlier one
    pub conflicts: Vec<DeploymentHandle>,
}

impl TriggerReport {
    /// Deployment ID to environment name for every deployment to follow
    pub fn deployment_map(&self) -> HashMap<DeploymentId, String> {
        self.started
            .iter()
            .map(|h| (h.deployment_id, h.environment_name.clone()))
            .collect()
    }
}

/// Final outcome per environment, in group order
#[derive(Debug, Clone, Default)]
pub struct DeploymentSummary {
    pub outcomes: Vec<(String, DeploymentOutcome)>,
}

impl DeploymentSummary {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|(_, outcome)| outcome.is_success())
    }

    pub fn outcome(&self, environment_name: &str) -> Option<&DeploymentOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == environment_name)
            .map(|(_, outcome)| outcome)
    }
}
