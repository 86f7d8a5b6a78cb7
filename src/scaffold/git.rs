//! Git plumbing
//!
//! Only two operations are needed: detecting whether a path is inside a
//! work tree, and creating a repository with an initial commit.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};

/// True when `path` is inside a git work tree. Missing git binary or a
/// failing invocation both count as "not a repo".
pub fn is_git_repo(path: &Path) -> bool {
    if !path.is_dir() {
        return false;
    }
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(path)
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Initializes a repository at `path` with everything committed.
pub fn init_repo(path: &Path) -> Result<()> {
    for args in [
        vec!["init"],
        vec!["add", "."],
        vec!["commit", "-m", "Initial commit from Specify template"],
    ] {
        let output = Command::new("git")
            .args(&args)
            .current_dir(path)
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("git {} failed: {}", args.join(" "), stderr.trim());
        }
    }
    Ok(())
}
