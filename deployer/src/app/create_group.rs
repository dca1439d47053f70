//! Environment group creation flow

use tracing::info;

use appveyor_api::models::Environment;

use crate::app::prompt::Prompt;
use crate::deploy::gateway::DeploymentGateway;
use crate::errors::DeployError;
use crate::models::group::EnvironmentGroup;
use crate::storage::groups::GroupStore;

/// Ask for a group name, a project and its environments, then save the group
pub async fn create_group<G, P>(
    gateway: &G,
    store: &GroupStore,
    prompt: &P,
) -> Result<EnvironmentGroup, DeployError>
where
    G: DeploymentGateway + ?Sized,
    P: Prompt + ?Sized,
{
    println!("Creating new Environment Group");

    let name = prompt.input("Enter new group name")?;
    if name.is_empty() {
        return Err(DeployError::ValidationError(
            "group name must not be empty".to_string(),
        ));
    }

    let projects = gateway.list_projects().await?;
    if projects.is_empty() {
        return Err(DeployError::NotFound("no projects in this account".to_string()));
    }

    let project_names: Vec<String> = projects.iter().map(|p| p.name.clone()).collect();
    let picked = prompt.select("Pick a project", &project_names)?;
    let project = projects
        .get(picked)
        .cloned()
        .ok_or_else(|| DeployError::ValidationError(format!("no project at index {}", picked)))?;

    let candidates = gateway.list_environments(&project).await?;
    if candidates.is_empty() {
        return Err(DeployError::NotFound(format!(
            "no environments for project {}",
            project.remote_ref()
        )));
    }

    let environments = pick_environments(prompt, &candidates)?;
    let group = EnvironmentGroup::new(name, project, environments);

    let file = store.save(&group).await?;
    info!("Saved group '{}' to {:?}", group.name, file.path());
    println!(
        "Saved Environment Group {} with {} environments",
        group.name,
        group.environments.len()
    );

    Ok(group)
}

/// Let the user pick environments one at a time
///
/// Each pick is offered only the environments whose name is not chosen yet. Picking stops
/// when the user declines to add another or nothing is left to add.
pub fn pick_environments<P>(prompt: &P, candidates: &[Environment]) -> Result<Vec<Environment>, DeployError>
where
    P: Prompt + ?Sized,
{
    let mut chosen: Vec<Environment> = Vec::new();

    loop {
        let remaining: Vec<&Environment> = candidates
            .iter()
            .filter(|env| !is_chosen(&chosen, env))
            .collect();
        if remaining.is_empty() {
            break;
        }

        let names: Vec<String> = remaining.iter().map(|env| env.name.clone()).collect();
        let picked = prompt.select("Pick an environment", &names)?;
        let env = remaining
            .get(picked)
            .ok_or_else(|| DeployError::ValidationError(format!("no environment at index {}", picked)))?;
        chosen.push((*env).clone());

        let any_left = candidates.iter().any(|env| !is_chosen(&chosen, env));
        if !any_left || !prompt.confirm("Add another environment?", true)? {
            break;
        }
    }

    Ok(chosen)
}

fn is_chosen(chosen: &[Environment], env: &Environment) -> bool {
    chosen.iter().any(|c| c.name == env.name)
}
