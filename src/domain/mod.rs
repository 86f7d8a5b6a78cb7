//! # Domain Model
//!
//! Core types for Specify projects:
//!
//! - [`Assistant`] - the closed set of supported AI assistants, each
//!   carrying its command-file convention and output directory
//! - [`ScriptType`] - the script flavor (POSIX shell or PowerShell) with
//!   its resolved folder name and file extension
//! - [`StatusReport`] - derived workflow-artifact completion summary

mod assistant;
mod workflow;

pub use assistant::{Assistant, CommandFormat, ScriptType};
pub use workflow::{FeatureStatus, NextAction, StatusReport, Suggestion};
