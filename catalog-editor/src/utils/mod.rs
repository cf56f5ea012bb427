//! Utility module for helper functions and infrastructure code.

pub mod logger;
pub mod text;
