//! Group deployment orchestration
//!
//! Deployments are started one environment at a time, in group order. The
//! started deployments are then followed concurrently, one poll loop each,
//! and the wait returns once every loop has produced an outcome.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{error, info, warn};

use crate::deploy::gateway::DeploymentGateway;
use crate::deploy::poller::{self, poll_until_finished};
use crate::models::deployment::{
    DeploymentHandle, DeploymentId, DeploymentOutcome, DeploymentSummary, TriggerFailure,
    TriggerReport,
};
use crate::models::group::EnvironmentGroup;

/// Orchestrator options
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Poll loop options
    pub poller: poller::Options,

    /// Stop waiting on a deployment after this long; `None` waits forever
    pub wait_timeout: Option<Duration>,
}

/// Starts and follows the deployments of an environment group
pub struct Orchestrator<G: DeploymentGateway + ?Sized> {
    gateway: Arc<G>,
    options: Options,
}

impl<G: DeploymentGateway + ?Sized> Orchestrator<G> {
    /// Create a new orchestrator
    pub fn new(gateway: Arc<G>, options: Options) -> Self {
        Self { gateway, options }
    }

    /// Start a deployment of `build_version` to every environment of `group`
    ///
    /// A failed start is recorded and the remaining environments are still
    /// triggered.
    pub async fn trigger_group(&self, group: &EnvironmentGroup, build_version: &str) -> TriggerReport {
        let mut report = TriggerReport::default();
        let mut seen: HashSet<DeploymentId> = HashSet::new();

        for env in &group.environments {
            match self
                .gateway
                .start_deployment(&group.project, env, build_version)
                .await
            {
                Ok(deployment_id) => {
                    let handle = DeploymentHandle {
                        deployment_id,
                        environment_name: env.name.clone(),
                    };

                    if !seen.insert(deployment_id) {
                        warn!(
                            "Deployment id {} for {} is already tracked for another environment",
                            deployment_id, env.name
                        );
                        report.conflicts.push(handle);
                        continue;
                    }

                    info!("Success, started deploy to: {} (id {})", env.name, deployment_id);
                    report.started.push(handle);
                }
                Err(e) => {
                    error!("FAILED to start deploy to: {}: {}", env.name, e);
                    report.failed.push(TriggerFailure {
                        environment_name: env.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Started {} of {} deployments, they are NOT finished yet",
            report.started.len(),
            group.environments.len()
        );

        report
    }

    /// Wait until every deployment in `deployments` has finished
    pub async fn await_all(
        &self,
        deployments: &HashMap<DeploymentId, String>,
    ) -> HashMap<String, DeploymentOutcome> {
        self.await_all_with(deployments, tokio::time::sleep).await
    }

    /// [`Self::await_all`] with an injected sleep function
    pub async fn await_all_with<S, F>(
        &self,
        deployments: &HashMap<DeploymentId, String>,
        sleep_fn: S,
    ) -> HashMap<String, DeploymentOutcome>
    where
        S: Fn(Duration) -> F,
        F: Future<Output = ()>,
    {
        info!("Waiting for {} deployments to finish...", deployments.len());

        let sleep_fn = &sleep_fn;
        let polls = deployments.iter().map(|(id, env_name)| async move {
            let handle = DeploymentHandle {
                deployment_id: *id,
                environment_name: env_name.clone(),
            };
            let outcome = self.follow(&handle, sleep_fn).await;
            (handle, outcome)
        });

        let mut outcomes = HashMap::with_capacity(deployments.len());
        for (handle, outcome) in join_all(polls).await {
            if let Some(previous) = outcomes.insert(handle.environment_name.clone(), outcome) {
                warn!(
                    "Environment {} was followed more than once, dropping outcome {}",
                    handle.environment_name, previous
                );
            }
        }

        info!("All deployments FINISHED");
        outcomes
    }

    /// Trigger every environment of `group`, then wait for the started deployments
    ///
    /// The summary holds one outcome per environment in group order.
    pub async fn deploy_group(&self, group: &EnvironmentGroup, build_version: &str) -> DeploymentSummary {
        self.deploy_group_with(group, build_version, tokio::time::sleep).await
    }

    /// [`Self::deploy_group`] with an injected sleep function
    pub async fn deploy_group_with<S, F>(
        &self,
        group: &EnvironmentGroup,
        build_version: &str,
        sleep_fn: S,
    ) -> DeploymentSummary
    where
        S: Fn(Duration) -> F,
        F: Future<Output = ()>,
    {
        let report = self.trigger_group(group, build_version).await;
        let mut finished = self.await_all_with(&report.deployment_map(), sleep_fn).await;

        let outcomes = group
            .environments
            .iter()
            .map(|env| {
                let outcome = if let Some(outcome) = finished.remove(&env.name) {
                    outcome
                } else if let Some(failure) =
                    report.failed.iter().find(|f| f.environment_name == env.name)
                {
                    DeploymentOutcome::TriggerFailed(failure.reason.clone())
                } else if let Some(conflict) =
                    report.conflicts.iter().find(|c| c.environment_name == env.name)
                {
                    DeploymentOutcome::DuplicateId(conflict.deployment_id)
                } else {
                    DeploymentOutcome::Unknown("deployment was not tracked".to_string())
                };
                (env.name.clone(), outcome)
            })
            .collect();

        DeploymentSummary { outcomes }
    }

    async fn follow<S, F>(&self, handle: &DeploymentHandle, sleep_fn: &S) -> DeploymentOutcome
    where
        S: Fn(Duration) -> F,
        F: Future<Output = ()>,
    {
        let poll = poll_until_finished(self.gateway.as_ref(), handle, &self.options.poller, sleep_fn);

        match self.options.wait_timeout {
            Some(limit) => match tokio::time::timeout(limit, poll).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(
                        "Deploy {} did not finish within {:?}",
                        handle.environment_name, limit
                    );
                    DeploymentOutcome::TimedOut
                }
            },
            None => poll.await,
        }
    }
}
