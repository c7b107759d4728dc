//! Shared helpers used across the workspace: logging setup, small response
//! types and filesystem checks performed at startup.

pub mod types;
pub mod utils;
pub mod env;
