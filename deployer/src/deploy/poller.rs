//! Poll loop following one deployment until it finishes

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::deploy::gateway::DeploymentGateway;
use crate::models::deployment::{DeploymentHandle, DeploymentOutcome, DeploymentStatus};

/// Poll loop options
#[derive(Debug, Clone)]
pub struct Options {
    /// Delay before each status query
    pub interval: Duration,

    /// Consecutive query failures tolerated before the outcome becomes unknown;
    /// `None` retries forever
    pub max_query_failures: Option<u32>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_query_failures: Some(5),
        }
    }
}

/// Query the deployment every `options.interval` until it reports a finish time
pub async fn poll_until_finished<G, S, F>(
    gateway: &G,
    handle: &DeploymentHandle,
    options: &Options,
    sleep_fn: &S,
) -> DeploymentOutcome
where
    G: DeploymentGateway + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let mut consecutive_failures: u32 = 0;

    loop {
        sleep_fn(options.interval).await;

        match gateway.get_deployment_details(handle.deployment_id).await {
            Ok(details) => {
                consecutive_failures = 0;

                if details.is_finished() {
                    let status = DeploymentStatus::parse(&details.status);
                    info!(
                        "Deploy {} finished with status {}",
                        handle.environment_name, status
                    );
                    return DeploymentOutcome::Completed(status);
                }

                debug!(
                    "Deploy {} ({}) still {}",
                    handle.environment_name, handle.deployment_id, details.status
                );
            }
            Err(e) => {
                consecutive_failures += 1;
                warn!(
                    "Status query for {} failed ({} in a row): {}",
                    handle.environment_name, consecutive_failures, e
                );

                if let Some(max) = options.max_query_failures {
                    if consecutive_failures >= max {
                        warn!(
                            "Giving up on {} after {} failed status queries",
                            handle.environment_name, consecutive_failures
                        );
                        return DeploymentOutcome::Unknown(e.to_string());
                    }
                }
            }
        }
    }
}
