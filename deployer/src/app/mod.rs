pub mod create_group;
pub mod new_deploy;
pub mod options;
pub mod prompt;
pub mod run;
