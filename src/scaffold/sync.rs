//! Workspace synchronization
//!
//! When `specify init <name>` runs inside a larger version-controlled
//! tree, the editor integration expects the dot-directories at the
//! workspace root, not buried in the new project directory. This pass
//! copies them outward. Unlike the materializer it NEVER overwrites a
//! file that already exists at the destination: workspace content is
//! user-owned, first writer wins.

use std::path::Path;

use anyhow::Result;

use super::fsutil::{copy_tree, Overwrite};
use super::git::is_git_repo;

/// Dot-directories mirrored to the workspace root when present
pub const SYNC_DIRS: &[&str] = &[".specify", ".github", ".vscode"];

/// What the synchronizer did
#[derive(Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Project and workspace coincide, or the workspace is not a git tree
    NotNeeded,
    /// Synchronization ran
    Synced {
        /// Directories where at least one file was copied
        synced: Vec<String>,
        /// Directories present but with nothing new to copy
        skipped: Vec<String>,
    },
}

/// Copies the fixed dot-directory set from `project_path` outward to
/// `workspace_root` without overwriting existing files.
pub fn sync_workspace(project_path: &Path, workspace_root: &Path) -> Result<SyncOutcome> {
    let same_dir = match (project_path.canonicalize(), workspace_root.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => project_path == workspace_root,
    };
    if same_dir || !is_git_repo(workspace_root) {
        return Ok(SyncOutcome::NotNeeded);
    }

    let mut synced = Vec::new();
    let mut skipped = Vec::new();

    for name in SYNC_DIRS {
        let source = project_path.join(name);
        if !source.is_dir() {
            continue;
        }
        let copied = copy_tree(&source, &workspace_root.join(name), Overwrite::Never)?;
        if copied.is_empty() {
            skipped.push(name.to_string());
        } else {
            synced.push(name.to_string());
        }
    }

    Ok(SyncOutcome::Synced { synced, skipped })
}
