//! New deploy flow

use colored::Colorize;
use tracing::info;

use crate::app::prompt::Prompt;
use crate::deploy::gateway::DeploymentGateway;
use crate::deploy::orchestrator::Orchestrator;
use crate::errors::DeployError;
use crate::models::deployment::{DeploymentOutcome, DeploymentStatus, DeploymentSummary};
use crate::models::group::EnvironmentGroup;
use crate::storage::groups::GroupStore;

/// Answers given up front, e.g. from the command line
#[derive(Debug, Clone, Default)]
pub struct DeployRequest {
    /// Group to deploy; asked for when unset
    pub group: Option<String>,

    /// Build version to deploy; asked for when unset
    pub build_version: Option<String>,

    /// Skip the confirmation
    pub assume_yes: bool,
}

/// Pick a group and a build version, then deploy and wait for the results
///
/// Returns `None` when there is nothing to deploy or the user backs out.
pub async fn new_deploy<G, P>(
    orchestrator: &Orchestrator<G>,
    store: &GroupStore,
    prompt: &P,
    request: DeployRequest,
) -> Result<Option<DeploymentSummary>, DeployError>
where
    G: DeploymentGateway + ?Sized,
    P: Prompt + ?Sized,
{
    let group = match request.group {
        Some(name) => store.find(&name).await?,
        None => match pick_group(store, prompt).await? {
            Some(group) => group,
            None => return Ok(None),
        },
    };

    println!("Going to deploy: {}", group.name);
    println!("Project: {}", group.project.name);
    for env in &group.environments {
        println!("Env: {}", env.name);
    }

    let build_version = match request.build_version {
        Some(version) => version.trim().to_string(),
        None => prompt.input("Enter build version to deploy")?,
    };
    if build_version.is_empty() {
        return Err(DeployError::ValidationError(
            "build version must not be empty".to_string(),
        ));
    }

    if !request.assume_yes && !prompt.confirm("Are you sure?", false)? {
        println!("Deploy cancelled");
        return Ok(None);
    }

    info!("Deploying {} to group '{}'", build_version, group.name);
    let summary = orchestrator.deploy_group(&group, &build_version).await;
    print_summary(&summary);

    Ok(Some(summary))
}

async fn pick_group<P>(store: &GroupStore, prompt: &P) -> Result<Option<EnvironmentGroup>, DeployError>
where
    P: Prompt + ?Sized,
{
    let mut groups = store.list().await?;
    if groups.is_empty() {
        println!("No group.json files found! Please create an environment group first.");
        return Ok(None);
    }

    let names: Vec<String> = groups.iter().map(|g| g.name.clone()).collect();
    let picked = prompt.select("Which group do you want to deploy to?", &names)?;
    if picked >= groups.len() {
        return Err(DeployError::ValidationError(format!("no group at index {}", picked)));
    }

    Ok(Some(groups.swap_remove(picked)))
}

/// Print the saved groups
pub async fn list_groups(store: &GroupStore) -> Result<(), DeployError> {
    let groups = store.list().await?;
    if groups.is_empty() {
        println!("No environment groups in {:?}", store.dir().path());
        return Ok(());
    }

    for group in groups {
        let envs: Vec<&str> = group.environments.iter().map(|e| e.name.as_str()).collect();
        println!("{} ({}): {}", group.name.bold(), group.project.name, envs.join(", "));
    }
    Ok(())
}

fn print_summary(summary: &DeploymentSummary) {
    println!();
    for (env_name, outcome) in &summary.outcomes {
        let status = match outcome {
            DeploymentOutcome::Completed(DeploymentStatus::Success) => outcome.to_string().green(),
            DeploymentOutcome::Completed(_) | DeploymentOutcome::TriggerFailed(_) => {
                outcome.to_string().red()
            }
            _ => outcome.to_string().yellow(),
        };
        println!("{}: {}", env_name.bold(), status);
    }
}
