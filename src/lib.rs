//! Specify CLI - Setup tool for spec-driven development projects
//!
//! Specify scaffolds a project from the latest spec-kit template release,
//! wires up per-assistant command prompts with a selected GitHub Model,
//! and reports workflow progress (constitution, specs, plans, tasks).

pub mod cli;
pub mod domain;
pub mod github;
pub mod scaffold;
pub mod storage;

pub use domain::{Assistant, NextAction, ScriptType, StatusReport};
