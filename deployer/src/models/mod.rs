pub mod deployment;
pub mod group;
