//! Application layer: CLI, configuration, startup, and terminal display

pub mod cli;
pub mod config;
pub mod display;
pub mod startup;
