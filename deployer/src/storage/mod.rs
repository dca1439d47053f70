pub mod groups;
pub mod layout;
pub mod settings;
