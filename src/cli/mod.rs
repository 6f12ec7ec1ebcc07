//! Command-line front-end

pub mod cluster;
pub mod commands;
pub mod display;

pub use self::commands::{CliArgs, HubArgs};
