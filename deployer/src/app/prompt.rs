//! User prompts

use dialoguer::{Confirm, Input, Select};

use crate::errors::DeployError;

/// Questions the interactive flows ask, behind a trait for testability
pub trait Prompt {
    /// Pick one of `items`, returning its index
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize, DeployError>;

    /// Read a line of text
    fn input(&self, prompt: &str) -> Result<String, DeployError>;

    /// Ask a yes/no question
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, DeployError>;
}

/// Prompts rendered on the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize, DeployError> {
        if items.is_empty() {
            return Err(DeployError::NotFound(format!("nothing to choose for '{}'", prompt)));
        }

        let selection = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(selection)
    }

    fn input(&self, prompt: &str) -> Result<String, DeployError> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, DeployError> {
        let answer = Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(answer)
    }
}
