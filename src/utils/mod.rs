//! Utility modules

pub mod config;
pub mod logging;
