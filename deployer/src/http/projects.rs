//! Project and environment API client

use appveyor_api::models::{Environment, Project};

use crate::errors::DeployError;
use crate::http::client::HttpClient;

impl HttpClient {
    /// List the projects of the account
    pub async fn get_projects(&self) -> Result<Vec<Project>, DeployError> {
        self.get("/api/projects").await
    }

    /// List the deployment environments of the account
    pub async fn get_environments(&self) -> Result<Vec<Environment>, DeployError> {
        self.get("/api/environments").await
    }
}
