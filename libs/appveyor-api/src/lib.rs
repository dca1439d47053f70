//! AppVeyor REST API models
//!
//! Request and response bodies for the subset of the AppVeyor API used to
//! start deployments and follow them to completion.

pub mod models;
