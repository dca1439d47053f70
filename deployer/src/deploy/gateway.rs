//! Remote deployment service seam

use async_trait::async_trait;

use appveyor_api::models::{DeploymentDetails, DeploymentId, Environment, Project, StartDeploymentRequest};

use crate::errors::DeployError;
use crate::http::client::HttpClient;

/// Operations the deployment flows need from the remote service
#[async_trait]
pub trait DeploymentGateway: Send + Sync {
    /// List all projects
    async fn list_projects(&self) -> Result<Vec<Project>, DeployError>;

    /// List the environments `project` can be deployed to
    async fn list_environments(&self, project: &Project) -> Result<Vec<Environment>, DeployError>;

    /// Start deploying `build_version` of `project` to `environment`
    ///
    /// Fails with [`DeployError::TriggerError`].
    async fn start_deployment(
        &self,
        project: &Project,
        environment: &Environment,
        build_version: &str,
    ) -> Result<DeploymentId, DeployError>;

    /// Fetch the current state of a deployment
    ///
    /// Fails with [`DeployError::QueryError`].
    async fn get_deployment_details(
        &self,
        deployment_id: DeploymentId,
    ) -> Result<DeploymentDetails, DeployError>;
}

#[async_trait]
impl DeploymentGateway for HttpClient {
    async fn list_projects(&self) -> Result<Vec<Project>, DeployError> {
        self.get_projects().await
    }

    async fn list_environments(&self, project: &Project) -> Result<Vec<Environment>, DeployError> {
        // environments are account-wide in AppVeyor
        tracing::debug!("Listing environments for {}", project.remote_ref());
        self.get_environments().await
    }

    async fn start_deployment(
        &self,
        project: &Project,
        environment: &Environment,
        build_version: &str,
    ) -> Result<DeploymentId, DeployError> {
        let request = StartDeploymentRequest {
            environment_name: environment.name.clone(),
            account_name: project.account_name.clone(),
            project_slug: project.slug.clone(),
            build_version: build_version.to_string(),
        };

        HttpClient::start_deployment(self, &request)
            .await
            .map_err(|e| DeployError::TriggerError {
                environment: environment.name.clone(),
                reason: e.to_string(),
            })
    }

    async fn get_deployment_details(
        &self,
        deployment_id: DeploymentId,
    ) -> Result<DeploymentDetails, DeployError> {
        self.get_deployment(deployment_id)
            .await
            .map_err(|e| DeployError::QueryError {
                deployment_id: deployment_id.0,
                reason: e.to_string(),
            })
    }
}
