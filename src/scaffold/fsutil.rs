//! Recursive copy machinery
//!
//! Directory merges are split into a pure planning step (which relative
//! paths would be copied) and an execution step with an explicit overwrite
//! policy, so the merge semantics are testable without touching the
//! filesystem policy branches.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// What to do when a destination file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Replace existing files unconditionally
    Always,
    /// Keep existing files (first-writer-wins)
    Never,
}

/// Lists every file under `src` as a path relative to `src`, sorted.
///
/// Directories are implied by their files; empty directories are listed
/// explicitly so they survive a copy.
pub fn copy_plan(src: &Path) -> Result<Vec<PathBuf>> {
    let mut plan = Vec::new();
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("Path escapes copy root {}", src.display()))?
            .to_path_buf();
        if entry.file_type().is_file() {
            plan.push(rel);
        } else if entry.file_type().is_dir() && fs::read_dir(entry.path())?.next().is_none() {
            plan.push(rel);
        }
    }
    plan.sort();
    Ok(plan)
}

/// Merge-copies `src` into `dest` under the given overwrite policy.
///
/// Returns the relative paths actually written. With [`Overwrite::Never`]
/// a path that already exists at the destination is skipped and does not
/// appear in the result.
pub fn copy_tree(src: &Path, dest: &Path, overwrite: Overwrite) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for rel in copy_plan(src)? {
        let from = src.join(&rel);
        let to = dest.join(&rel);

        if from.is_dir() {
            fs::create_dir_all(&to)
                .with_context(|| format!("Failed to create {}", to.display()))?;
            continue;
        }

        if to.exists() && overwrite == Overwrite::Never {
            continue;
        }
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::copy(&from, &to).with_context(|| {
            format!("Failed to copy {} -> {}", from.display(), to.display())
        })?;
        copied.push(rel);
    }
    Ok(copied)
}
