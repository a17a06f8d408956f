//! Core data structures for Berth.
//!
//! This module contains the foundational types used throughout the crate:
//! - Library descriptors and per-target library entries
//! - Restore diagnostic records and severity levels

pub mod library;
pub mod log;

pub use library::{LibraryDescriptor, LibraryKind, TargetLibrary};
pub use log::{LogLevel, LogRecord};
