pub mod actor;
pub mod command;
pub mod ease;
