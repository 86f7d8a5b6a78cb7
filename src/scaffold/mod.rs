//! # Scaffolding Pipeline
//!
//! Filesystem side of project initialization:
//!
//! | Stage | Module | Purpose |
//! |-------|--------|---------|
//! | Materialize | [`extract`] | Unpack the template archive (fresh or merge) |
//! | Local source | [`local`] | Copy templates from a development checkout |
//! | Generate | [`commands`] | Render per-assistant command files |
//! | Permissions | [`permissions`] | Restore execute bits on shell scripts |
//! | Git | [`git`] | Repo detection and initialization |
//! | Sync | [`sync`] | Copy dot-directories out to the workspace root |
//!
//! Two copy policies coexist on purpose: the materializer overwrites
//! unconditionally (archive content is trusted template output) while the
//! workspace synchronizer never overwrites (workspace content is
//! user-owned).

pub mod commands;
pub mod extract;
pub mod fsutil;
pub mod git;
pub mod local;
pub mod permissions;
pub mod sync;

pub use commands::generate_commands;
pub use extract::{materialize_archive, ExtractMode, ScaffoldError};
pub use local::{copy_local_templates, LocalTemplateError};
pub use sync::{sync_workspace, SyncOutcome};
