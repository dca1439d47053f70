//! Deployment API client

use appveyor_api::models::{
    DeploymentDetails, DeploymentDetailsResponse, DeploymentId, StartDeploymentRequest,
    StartDeploymentResponse,
};

use crate::errors::DeployError;
use crate::http::client::HttpClient;

impl HttpClient {
    /// Start a deployment
    pub async fn start_deployment(
        &self,
        request: &StartDeploymentRequest,
    ) -> Result<DeploymentId, DeployError> {
        let response: StartDeploymentResponse = self.post("/api/deployments", request).await?;
        Ok(response.deployment_id)
    }

    /// Get the current state of a deployment
    pub async fn get_deployment(
        &self,
        deployment_id: DeploymentId,
    ) -> Result<DeploymentDetails, DeployError> {
        let path = format!("/api/deployments/{}", deployment_id);
        let response: DeploymentDetailsResponse = self.get(&path).await?;
        Ok(response.deployment)
    }
}
