//! Shared utilities

pub mod caseless;
pub mod paths;

pub use caseless::CaselessName;
