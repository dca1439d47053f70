//! Application configuration options

use std::time::Duration;

use crate::deploy::{orchestrator, poller};
use crate::filesys::dir::Dir;
use crate::storage::layout::StorageLayout;
use crate::storage::settings::Settings;

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// AppVeyor API base URL
    pub api_base_url: String,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,

    /// Directory holding the group records
    pub groups_dir: Dir,

    /// Deployment orchestration options
    pub orchestrator: orchestrator::Options,
}

impl AppOptions {
    /// Build options from the settings file, resolving paths against `layout`
    pub fn from_settings(settings: &Settings, layout: &StorageLayout) -> Self {
        let groups_dir = match &settings.groups_dir {
            Some(dir) => Dir::new(layout.base_dir.join(dir)),
            None => layout.groups_dir(),
        };

        Self {
            api_base_url: settings.api.base_url.clone(),
            request_timeout: Duration::from_secs(settings.api.timeout_secs),
            groups_dir,
            orchestrator: orchestrator::Options {
                poller: poller::Options {
                    interval: Duration::from_secs(settings.polling.interval_secs),
                    max_query_failures: settings.polling.max_query_failures,
                },
                wait_timeout: settings.polling.wait_timeout_secs.map(Duration::from_secs),
            },
        }
    }
}
