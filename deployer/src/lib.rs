//! avdeploy library
//!
//! Environment groups, the AppVeyor client and the deployment orchestrator.

pub mod app;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod storage;
pub mod utils;
