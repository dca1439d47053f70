//! Environment group records
//!
//! Each group lives in its own `<name>.group.json` file inside one directory.
//! Saving a group under an existing name replaces the previous record.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::errors::DeployError;
use crate::filesys::dir::Dir;
use crate::filesys::file::File;
use crate::models::group::EnvironmentGroup;

/// Suffix marking a group record
pub const GROUP_FILE_SUFFIX: &str = ".group.json";

/// File name of the record holding the group called `name`
///
/// Characters that are unsafe in file names are replaced with `_`.
pub fn group_file_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}{}", stem, GROUP_FILE_SUFFIX)
}

/// Reads and writes environment group records
#[derive(Debug, Clone)]
pub struct GroupStore {
    dir: Dir,
}

impl GroupStore {
    /// Create a store over `dir`
    pub fn new(dir: Dir) -> Self {
        Self { dir }
    }

    /// Directory holding the records
    pub fn dir(&self) -> &Dir {
        &self.dir
    }

    /// Save a group, overwriting any record with the same file name
    pub async fn save(&self, group: &EnvironmentGroup) -> Result<File, DeployError> {
        group.validate()?;

        let file = self.dir.file(&group_file_name(&group.name));

        if file.exists().await {
            match file.read_json::<EnvironmentGroup>().await {
                Ok(previous) if previous.name != group.name => {
                    warn!(
                        "Group '{}' replaces the record of group '{}' at {:?}",
                        group.name,
                        previous.name,
                        file.path()
                    );
                }
                Ok(_) => info!("Overwriting existing group '{}'", group.name),
                Err(e) => warn!("Overwriting unreadable group record {:?}: {}", file.path(), e),
            }
        }

        let mut record = group.clone();
        record.saved_at = Some(Utc::now());

        file.write_json(&record).await.map_err(|e| {
            DeployError::PersistenceError(format!("failed to write {:?}: {}", file.path(), e))
        })?;

        debug!("Saved group '{}' to {:?}", group.name, file.path());
        Ok(file)
    }

    /// Load every group record, sorted by group name
    ///
    /// A record that cannot be read, parsed or validated fails the whole listing.
    pub async fn list(&self) -> Result<Vec<EnvironmentGroup>, DeployError> {
        if !self.dir.exists().await {
            return Ok(Vec::new());
        }

        let files = self
            .dir
            .list_files_with_suffix(GROUP_FILE_SUFFIX)
            .await
            .map_err(|e| {
                DeployError::PersistenceError(format!("failed to list {:?}: {}", self.dir.path(), e))
            })?;

        let mut groups = Vec::with_capacity(files.len());
        for file in files {
            let group = file.read_json::<EnvironmentGroup>().await.map_err(|e| {
                DeployError::PersistenceError(format!("failed to read {:?}: {}", file.path(), e))
            })?;
            group.validate().map_err(|e| {
                DeployError::PersistenceError(format!("invalid record {:?}: {}", file.path(), e))
            })?;
            groups.push(group);
        }

        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    /// Load the group called `name`
    pub async fn find(&self, name: &str) -> Result<EnvironmentGroup, DeployError> {
        self.list()
            .await?
            .into_iter()
            .find(|g| g.name == name)
            .ok_or_else(|| DeployError::NotFound(format!("environment group '{}'", name)))
    }
}
