pub mod client;
pub mod deployments;
pub mod projects;
