//! Main application flow

use std::sync::Arc;

use secrecy::SecretString;
use tracing::info;

use crate::app::create_group::create_group;
use crate::app::new_deploy::{list_groups, new_deploy, DeployRequest};
use crate::app::options::AppOptions;
use crate::app::prompt::Prompt;
use crate::deploy::orchestrator::Orchestrator;
use crate::errors::DeployError;
use crate::http::client::HttpClient;
use crate::storage::groups::GroupStore;

/// What the user asked avdeploy to do
#[derive(Debug, Clone)]
pub enum Action {
    /// Show the menu
    Menu,
    CreateGroup,
    Deploy(DeployRequest),
    ListGroups,
}

const MENU_ITEMS: [&str; 2] = ["Create environment group", "New deploy"];

/// Run avdeploy
pub async fn run<P>(
    options: AppOptions,
    api_key: Option<String>,
    action: Action,
    prompt: &P,
) -> Result<(), DeployError>
where
    P: Prompt + ?Sized,
{
    let store = GroupStore::new(options.groups_dir.clone());
    info!("Using group records in {:?}", store.dir().path());

    if let Action::ListGroups = action {
        return list_groups(&store).await;
    }

    let api_key = match resolve_api_key(api_key, prompt)? {
        Some(key) => key,
        None => {
            println!("No key, exiting");
            return Ok(());
        }
    };

    let client = Arc::new(HttpClient::new(
        &options.api_base_url,
        api_key,
        options.request_timeout,
    )?);
    info!("Connected to {}", client.base_url());

    let action = match action {
        Action::Menu => choose_action(prompt)?,
        action => action,
    };

    match action {
        Action::CreateGroup => {
            create_group(client.as_ref(), &store, prompt).await?;
        }
        Action::Deploy(request) => {
            let orchestrator = Orchestrator::new(client, options.orchestrator.clone());
            new_deploy(&orchestrator, &store, prompt, request).await?;
        }
        // listing returned early and the menu was resolved above
        Action::ListGroups | Action::Menu => {}
    }

    Ok(())
}

fn resolve_api_key<P>(api_key: Option<String>, prompt: &P) -> Result<Option<SecretString>, DeployError>
where
    P: Prompt + ?Sized,
{
    let key = match api_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => key,
        None => prompt.input("Enter AppVeyor API key")?,
    };

    if key.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(SecretString::from(key.trim().to_string())))
}

fn choose_action<P>(prompt: &P) -> Result<Action, DeployError>
where
    P: Prompt + ?Sized,
{
    let items: Vec<String> = MENU_ITEMS.iter().map(|s| s.to_string()).collect();
    match prompt.select("Choose an action", &items)? {
        0 => Ok(Action::CreateGroup),
        _ => Ok(Action::Deploy(DeployRequest::default())),
    }
}
