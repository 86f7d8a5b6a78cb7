//! Local template source
//!
//! Alternative to the network download for development: copies the
//! template content straight from an adjacent checkout of the spec-kit
//! repository. Targets fresh scaffolds, so directory copies merge by
//! overwrite.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::fsutil::{copy_tree, Overwrite};

/// Environment variable pointing at the development checkout
pub const DEV_DIR_ENV: &str = "SPECIFY_DEV_DIR";

#[derive(Debug, Error)]
pub enum LocalTemplateError {
    #[error(
        "Local templates directory not found: {0}. \
         Set {env} to your spec-kit checkout to use --local.",
        env = DEV_DIR_ENV
    )]
    TemplatesMissing(PathBuf),
}

/// Locates the development checkout: `$SPECIFY_DEV_DIR` when set,
/// otherwise the current directory.
pub fn locate_dev_root() -> PathBuf {
    std::env::var_os(DEV_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Copies the local template set from `dev_root` into `project_path`.
///
/// Layout produced:
/// - `templates/` -> `.specify/templates/`
/// - `memory/`    -> `.specify/memory/`
/// - `scripts/`   -> `.specify/scripts/`
/// - `.vscode/`   -> `.vscode/`
/// - `.github/`   -> `.github/` (its `prompts/` subdirectory is skipped;
///   those files are regenerated by the command generator)
pub fn copy_local_templates(dev_root: &Path, project_path: &Path) -> Result<()> {
    let templates = dev_root.join("templates");
    if !templates.is_dir() {
        return Err(LocalTemplateError::TemplatesMissing(templates).into());
    }

    fs::create_dir_all(project_path)
        .with_context(|| format!("Failed to create {}", project_path.display()))?;

    let specify_dir = project_path.join(".specify");
    copy_tree(&templates, &specify_dir.join("templates"), Overwrite::Always)?;

    let memory = dev_root.join("memory");
    if memory.is_dir() {
        copy_tree(&memory, &specify_dir.join("memory"), Overwrite::Always)?;
    }

    let scripts = dev_root.join("scripts");
    if scripts.is_dir() {
        copy_tree(&scripts, &specify_dir.join("scripts"), Overwrite::Always)?;
    }

    let vscode = dev_root.join(".vscode");
    if vscode.is_dir() {
        copy_tree(&vscode, &project_path.join(".vscode"), Overwrite::Always)?;
    }

    let github = dev_root.join(".github");
    if github.is_dir() {
        copy_github_excluding_prompts(&github, &project_path.join(".github"))?;
    }

    Ok(())
}

/// Copies `.github/` but leaves out its `prompts/` subdirectory, which is
/// regenerated per assistant.
fn copy_github_excluding_prompts(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))?;
    for entry in fs::read_dir(src).with_context(|| format!("Failed to read {}", src.display()))? {
        let entry = entry?;
        let name = entry.file_name();
        if name == "prompts" {
            continue;
        }
        let from = entry.path();
        let to = dest.join(&name);
        if from.is_dir() {
            copy_tree(&from, &to, Overwrite::Always)?;
        } else {
            fs::copy(&from, &to)
                .with_context(|| format!("Failed to copy {}", from.display()))?;
        }
    }
    Ok(())
}
