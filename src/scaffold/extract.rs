//! Template archive materialization
//!
//! Unpacks a downloaded template zip into the destination directory.
//! Archives published by release automation often wrap everything in a
//! single root directory; when the top level is exactly one directory it
//! is treated as a wrapper and its contents become the effective tree,
//! in both extraction modes. Zero or multiple top-level entries are used
//! as-is.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;
use thiserror::Error;
use zip::ZipArchive;

use super::fsutil::{copy_tree, Overwrite};

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Directory '{0}' already exists. Choose a different project name or remove it.")]
    DestinationExists(PathBuf),

    #[error("Destination directory '{0}' does not exist")]
    DestinationMissing(PathBuf),

    #[error("Archive entry has an unsafe path: {0}")]
    UnsafeEntry(String),
}

/// How the destination directory is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Destination must not exist; it is created and owned by the tool.
    /// A failure removes the partially created directory.
    Fresh,
    /// Destination already exists (typically the current directory);
    /// archive content is merged in, overwriting colliding files. A
    /// failure leaves the directory as-is.
    Merge,
}

/// Populates `dest` with the archive's effective tree.
///
/// The source archive is deleted afterwards whether or not
/// materialization succeeded.
pub fn materialize_archive(archive: &Path, dest: &Path, mode: ExtractMode) -> Result<()> {
    let result = match mode {
        ExtractMode::Fresh => extract_fresh(archive, dest),
        ExtractMode::Merge => extract_merge(archive, dest),
    };

    // Best-effort cleanup of the downloaded archive, success or not.
    let _ = fs::remove_file(archive);

    result
}

fn extract_fresh(archive: &Path, dest: &Path) -> Result<()> {
    if dest.exists() {
        return Err(ScaffoldError::DestinationExists(dest.to_path_buf()).into());
    }

    let result = (|| -> Result<()> {
        fs::create_dir_all(dest)
            .with_context(|| format!("Failed to create {}", dest.display()))?;
        extract_zip(archive, dest)?;
        flatten_in_place(dest)?;
        Ok(())
    })();

    if result.is_err() {
        // The directory is ours; remove whatever was partially created.
        let _ = fs::remove_dir_all(dest);
    }
    result
}

fn extract_merge(archive: &Path, dest: &Path) -> Result<()> {
    if !dest.is_dir() {
        return Err(ScaffoldError::DestinationMissing(dest.to_path_buf()).into());
    }

    let staging = TempDir::new().context("Failed to create staging directory")?;
    extract_zip(archive, staging.path())?;
    let source = effective_root(staging.path())?;

    copy_tree(&source, dest, Overwrite::Always)?;
    Ok(())
}

/// Extracts every entry of the zip under `dest`, rejecting entries whose
/// paths escape it.
fn extract_zip(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open archive: {}", archive_path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Failed to read zip archive: {}", archive_path.display()))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .with_context(|| format!("Failed to read archive entry {i}"))?;

        let Some(entry_path) = entry.enclosed_name() else {
            return Err(ScaffoldError::UnsafeEntry(entry.name().to_string()).into());
        };
        let output = dest.join(&entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
        } else {
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let mut outfile = File::create(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            std::io::copy(&mut entry, &mut outfile)
                .with_context(|| format!("Failed to extract {}", output.display()))?;
        }
    }
    Ok(())
}

/// Returns the directory holding the effective tree under `root`: the
/// single top-level directory when it is the only entry, `root` itself
/// otherwise.
fn effective_root(root: &Path) -> Result<PathBuf> {
    let entries: Vec<_> = fs::read_dir(root)
        .with_context(|| format!("Failed to read {}", root.display()))?
        .filter_map(|e| e.ok())
        .collect();

    if entries.len() == 1 && entries[0].path().is_dir() {
        Ok(entries[0].path())
    } else {
        Ok(root.to_path_buf())
    }
}

/// Applies the flatten rule to a freshly extracted directory by moving the
/// single wrapper directory into the destination's place.
fn flatten_in_place(dest: &Path) -> Result<()> {
    let wrapper = effective_root(dest)?;
    if wrapper == dest {
        return Ok(());
    }

    let parent = dest.parent().context("Destination has no parent")?;
    let name = dest
        .file_name()
        .context("Destination has no file name")?
        .to_string_lossy();
    let staging = parent.join(format!("{}_unwrap", name));

    fs::rename(&wrapper, &staging)
        .with_context(|| format!("Failed to move {}", wrapper.display()))?;
    fs::remove_dir(dest)
        .with_context(|| format!("Failed to remove wrapper shell {}", dest.display()))?;
    fs::rename(&staging, dest)
        .with_context(|| format!("Failed to move tree into {}", dest.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    /// Builds a zip at `path` from (entry name, content) pairs. Entries
    /// ending in '/' become directories.
    fn build_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            if name.ends_with('/') {
                writer.add_directory(name.trim_end_matches('/'), options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
        }
        writer.finish().unwrap();
    }

    fn read(root: &Path, rel: &str) -> String {
        fs::read_to_string(root.join(rel)).unwrap()
    }

    #[test]
    fn fresh_extracts_flat_archive() {
        let work = TempDir::new().unwrap();
        let archive = work.path().join("t.zip");
        build_zip(&archive, &[("a.txt", "alpha"), ("sub/b.txt", "beta")]);

        let dest = work.path().join("project");
        materialize_archive(&archive, &dest, ExtractMode::Fresh).unwrap();

        assert_eq!(read(&dest, "a.txt"), "alpha");
        assert_eq!(read(&dest, "sub/b.txt"), "beta");
        assert!(!archive.exists(), "archive is cleaned up");
    }

    #[test]
    fn fresh_flattens_single_wrapper() {
        let work = TempDir::new().unwrap();
        let archive = work.path().join("t.zip");
        build_zip(
            &archive,
            &[("pkg/a.txt", "alpha"), ("pkg/sub/b.txt", "beta")],
        );

        let dest = work.path().join("project");
        materialize_archive(&archive, &dest, ExtractMode::Fresh).unwrap();

        assert_eq!(read(&dest, "a.txt"), "alpha");
        assert_eq!(read(&dest, "sub/b.txt"), "beta");
        assert!(!dest.join("pkg").exists());
    }

    #[test]
    fn flatten_is_transparent() {
        // A wrapped archive and its flat equivalent materialize the same.
        let work = TempDir::new().unwrap();
        let wrapped = work.path().join("wrapped.zip");
        let flat = work.path().join("flat.zip");
        build_zip(&wrapped, &[("root/x.txt", "x"), ("root/d/y.txt", "y")]);
        build_zip(&flat, &[("x.txt", "x"), ("d/y.txt", "y")]);

        let dest_a = work.path().join("a");
        let dest_b = work.path().join("b");
        materialize_archive(&wrapped, &dest_a, ExtractMode::Fresh).unwrap();
        materialize_archive(&flat, &dest_b, ExtractMode::Fresh).unwrap();

        let plan_a = super::super::fsutil::copy_plan(&dest_a).unwrap();
        let plan_b = super::super::fsutil::copy_plan(&dest_b).unwrap();
        assert_eq!(plan_a, plan_b);
        assert_eq!(read(&dest_a, "x.txt"), read(&dest_b, "x.txt"));
    }

    #[test]
    fn multiple_roots_skip_flatten() {
        let work = TempDir::new().unwrap();
        let archive = work.path().join("t.zip");
        build_zip(&archive, &[("one/a.txt", "a"), ("two/b.txt", "b")]);

        let dest = work.path().join("project");
        materialize_archive(&archive, &dest, ExtractMode::Fresh).unwrap();

        assert_eq!(read(&dest, "one/a.txt"), "a");
        assert_eq!(read(&dest, "two/b.txt"), "b");
    }

    #[test]
    fn fresh_refuses_existing_destination() {
        let work = TempDir::new().unwrap();
        let archive = work.path().join("t.zip");
        build_zip(&archive, &[("a.txt", "alpha")]);

        let dest = work.path().join("project");
        fs::create_dir(&dest).unwrap();

        let err = materialize_archive(&archive, &dest, ExtractMode::Fresh).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(!archive.exists(), "archive removed even on failure");
    }

    #[test]
    fn fresh_failure_removes_partial_destination() {
        let work = TempDir::new().unwrap();
        let archive = work.path().join("t.zip");
        fs::write(&archive, "not a zip").unwrap();

        let dest = work.path().join("project");
        let result = materialize_archive(&archive, &dest, ExtractMode::Fresh);

        assert!(result.is_err());
        assert!(!dest.exists(), "partial destination cleaned up");
    }

    #[test]
    fn merge_overwrites_colliding_files() {
        let work = TempDir::new().unwrap();
        let archive = work.path().join("t.zip");
        build_zip(&archive, &[("pkg/a.txt", "from archive")]);

        let dest = work.path().join("existing");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("a.txt"), "pre-existing").unwrap();

        materialize_archive(&archive, &dest, ExtractMode::Merge).unwrap();

        // Merge mode takes the archive's version; the wrapper was
        // flattened first so the collision is at the top level.
        assert_eq!(read(&dest, "a.txt"), "from archive");
    }

    #[test]
    fn merge_preserves_non_colliding_files() {
        let work = TempDir::new().unwrap();
        let archive = work.path().join("t.zip");
        build_zip(&archive, &[("pkg/new.txt", "new")]);

        let dest = work.path().join("existing");
        fs::create_dir_all(dest.join("mine")).unwrap();
        fs::write(dest.join("mine/keep.txt"), "untouched").unwrap();

        materialize_archive(&archive, &dest, ExtractMode::Merge).unwrap();

        assert_eq!(read(&dest, "mine/keep.txt"), "untouched");
        assert_eq!(read(&dest, "new.txt"), "new");
    }

    #[test]
    fn merge_leaves_destination_on_failure() {
        let work = TempDir::new().unwrap();
        let archive = work.path().join("t.zip");
        fs::write(&archive, "not a zip").unwrap();

        let dest = work.path().join("existing");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("a.txt"), "keep").unwrap();

        let result = materialize_archive(&archive, &dest, ExtractMode::Merge);

        assert!(result.is_err());
        assert_eq!(read(&dest, "a.txt"), "keep");
    }

    #[test]
    fn merge_requires_existing_destination() {
        let work = TempDir::new().unwrap();
        let archive = work.path().join("t.zip");
        build_zip(&archive, &[("a.txt", "a")]);

        let dest = work.path().join("nope");
        let err = materialize_archive(&archive, &dest, ExtractMode::Merge).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
