//! Command implementations for the hostprep CLI

pub mod completions;
pub mod helpers;
pub mod launch;
pub mod provision;
pub mod service_unit;
pub mod version;
