//! API models

use std::fmt;

use serde::{Deserialize, Serialize};

/// A project as returned by `GET /api/projects`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub project_id: i64,
    pub account_name: String,
    pub name: String,
    pub slug: String,
}

impl Project {
    /// The `account/slug` pair identifying the project remotely
    pub fn remote_ref(&self) -> String {
        format!("{}/{}", self.account_name, self.slug)
    }
}

/// A deployment environment as returned by `GET /api/environments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    #[serde(rename = "deploymentEnvironmentId")]
    pub environment_id: i64,
    pub name: String,
}

/// Remote deployment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentId(pub i64);

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of `POST /api/deployments`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDeploymentRequest {
    pub environment_name: String,
    pub account_name: String,
    pub project_slug: String,
    pub build_version: String,
}

/// Response of `POST /api/deployments`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDeploymentResponse {
    pub deployment_id: DeploymentId,
}

/// Response of `GET /api/deployments/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentDetailsResponse {
    pub deployment: DeploymentDetails,
}

/// Deployment state as reported by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentDetails {
    #[serde(default)]
    pub deployment_id: Option<DeploymentId>,

    /// `queued`, `running`, `success`, `failed`, `cancelled`
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub started: Option<String>,

    /// Set once the deployment reached a terminal state
    #[serde(default)]
    pub finished: Option<String>,
}

impl DeploymentDetails {
    /// A deployment is terminal once `finished` carries a non-empty value
    pub fn is_finished(&self) -> bool {
        self.finished.as_deref().is_some_and(|f| !f.is_empty())
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
