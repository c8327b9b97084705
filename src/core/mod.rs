//! Core services shared across the application

pub mod logging;
