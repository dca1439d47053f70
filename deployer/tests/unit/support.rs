//! Test doubles shared by the unit tests

use std::collections::{HashMap, VecDeque};
use std::future::{ready, Ready};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use appveyor_api::models::{DeploymentDetails, DeploymentId, Environment, Project};
use avdeploy::app::prompt::Prompt;
use avdeploy::deploy::gateway::DeploymentGateway;
use avdeploy::errors::DeployError;
use avdeploy::filesys::dir::Dir;
use avdeploy::models::group::EnvironmentGroup;

/// Create an empty scratch directory
pub async fn temp_dir(prefix: &str) -> Dir {
    let path = std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()));
    tokio::fs::create_dir_all(&path).await.unwrap();
    Dir::new(path)
}

/// Remove a scratch directory and everything in it
pub async fn remove_dir(dir: &Dir) {
    tokio::fs::remove_dir_all(dir.path()).await.unwrap();
}

pub fn project() -> Project {
    Project {
        project_id: 42,
        account_name: "acme".to_string(),
        name: "Web Shop".to_string(),
        slug: "web-shop".to_string(),
    }
}

pub fn env(id: i64, name: &str) -> Environment {
    Environment {
        environment_id: id,
        name: name.to_string(),
    }
}

pub fn group(name: &str, env_names: &[&str]) -> EnvironmentGroup {
    let environments = env_names
        .iter()
        .enumerate()
        .map(|(i, n)| env(i as i64 + 1, n))
        .collect();
    EnvironmentGroup::new(name, project(), environments)
}

pub fn running() -> Result<DeploymentDetails, String> {
    Ok(DeploymentDetails {
        status: "running".to_string(),
        finished: None,
        ..Default::default()
    })
}

pub fn empty_finished() -> Result<DeploymentDetails, String> {
    Ok(DeploymentDetails {
        status: "running".to_string(),
        finished: Some(String::new()),
        ..Default::default()
    })
}

pub fn finished(status: &str) -> Result<DeploymentDetails, String> {
    Ok(DeploymentDetails {
        status: status.to_string(),
        finished: Some("2024-05-01T10:00:00Z".to_string()),
        ..Default::default()
    })
}

pub fn query_error() -> Result<DeploymentDetails, String> {
    Err("502 Bad Gateway".to_string())
}

/// Sleep function that returns immediately
pub fn no_sleep(_: Duration) -> Ready<()> {
    ready(())
}

/// Gateway with scripted answers
///
/// Status scripts are consumed one answer per query; the last answer repeats.
#[derive(Default)]
pub struct FakeGateway {
    pub projects: Vec<Project>,
    pub environments: Vec<Environment>,
    starts: HashMap<String, Result<i64, String>>,
    details: Mutex<HashMap<i64, VecDeque<Result<DeploymentDetails, String>>>>,
    triggered: Mutex<Vec<(String, String)>>,
    queries: Mutex<HashMap<i64, usize>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, projects: Vec<Project>, environments: Vec<Environment>) -> Self {
        self.projects = projects;
        self.environments = environments;
        self
    }

    pub fn accept(mut self, env_name: &str, deployment_id: i64) -> Self {
        self.starts.insert(env_name.to_string(), Ok(deployment_id));
        self
    }

    pub fn reject(mut self, env_name: &str) -> Self {
        self.starts
            .insert(env_name.to_string(), Err("400 Bad Request: build not found".to_string()));
        self
    }

    pub fn script(self, deployment_id: i64, answers: Vec<Result<DeploymentDetails, String>>) -> Self {
        self.details
            .lock()
            .unwrap()
            .insert(deployment_id, answers.into_iter().collect());
        self
    }

    /// Environment and build version of every start call, in call order
    pub fn triggered(&self) -> Vec<(String, String)> {
        self.triggered.lock().unwrap().clone()
    }

    pub fn query_count(&self, deployment_id: i64) -> usize {
        self.queries
            .lock()
            .unwrap()
            .get(&deployment_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl DeploymentGateway for FakeGateway {
    async fn list_projects(&self) -> Result<Vec<Project>, DeployError> {
        Ok(self.projects.clone())
    }

    async fn list_environments(&self, _project: &Project) -> Result<Vec<Environment>, DeployError> {
        Ok(self.environments.clone())
    }

    async fn start_deployment(
        &self,
        _project: &Project,
        environment: &Environment,
        build_version: &str,
    ) -> Result<DeploymentId, DeployError> {
        self.triggered
            .lock()
            .unwrap()
            .push((environment.name.clone(), build_version.to_string()));

        match self.starts.get(&environment.name) {
            Some(Ok(id)) => Ok(DeploymentId(*id)),
            Some(Err(reason)) => Err(DeployError::TriggerError {
                environment: environment.name.clone(),
                reason: reason.clone(),
            }),
            None => Err(DeployError::TriggerError {
                environment: environment.name.clone(),
                reason: "unknown environment".to_string(),
            }),
        }
    }

    async fn get_deployment_details(
        &self,
        deployment_id: DeploymentId,
    ) -> Result<DeploymentDetails, DeployError> {
        *self.queries.lock().unwrap().entry(deployment_id.0).or_insert(0) += 1;

        let answer = {
            let mut details = self.details.lock().unwrap();
            let script = details.get_mut(&deployment_id.0);
            match script {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match answer {
            Some(Ok(details)) => Ok(details),
            Some(Err(reason)) => Err(DeployError::QueryError {
                deployment_id: deployment_id.0,
                reason,
            }),
            None => Err(DeployError::QueryError {
                deployment_id: deployment_id.0,
                reason: "404 Not Found".to_string(),
            }),
        }
    }
}

/// Prompt answering from queued scripts and recording what it was offered
#[derive(Default)]
pub struct ScriptedPrompt {
    selects: Mutex<VecDeque<usize>>,
    inputs: Mutex<VecDeque<String>>,
    confirms: Mutex<VecDeque<bool>>,
    offered: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selects(self, answers: &[usize]) -> Self {
        self.selects.lock().unwrap().extend(answers.iter().copied());
        self
    }

    pub fn inputs(self, answers: &[&str]) -> Self {
        self.inputs
            .lock()
            .unwrap()
            .extend(answers.iter().map(|a| a.to_string()));
        self
    }

    pub fn confirms(self, answers: &[bool]) -> Self {
        self.confirms.lock().unwrap().extend(answers.iter().copied());
        self
    }

    /// Items offered by each `select`, with the prompt text
    pub fn offered(&self) -> Vec<(String, Vec<String>)> {
        self.offered.lock().unwrap().clone()
    }

    pub fn confirms_left(&self) -> usize {
        self.confirms.lock().unwrap().len()
    }
}

impl Prompt for ScriptedPrompt {
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize, DeployError> {
        self.offered
            .lock()
            .unwrap()
            .push((prompt.to_string(), items.to_vec()));
        self.selects
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| DeployError::PromptError(format!("unexpected select: {}", prompt)))
    }

    fn input(&self, prompt: &str) -> Result<String, DeployError> {
        self.inputs
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| DeployError::PromptError(format!("unexpected input: {}", prompt)))
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool, DeployError> {
        self.confirms
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| DeployError::PromptError(format!("unexpected confirm: {}", prompt)))
    }
}
