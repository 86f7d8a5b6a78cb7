//! Script permission fixup
//!
//! Zip extraction does not preserve POSIX permission bits, so shell
//! scripts under `.specify/scripts/` come out non-executable. This pass
//! adds execute bits mirroring the existing read bits. No-op on Windows.

use std::path::Path;

/// Outcome of the permission pass
#[derive(Debug, Default)]
pub struct PermissionReport {
    pub updated: usize,
    pub failures: Vec<String>,
}

impl PermissionReport {
    pub fn detail(&self) -> String {
        if self.failures.is_empty() {
            format!("{} updated", self.updated)
        } else {
            format!("{} updated, {} failed", self.updated, self.failures.len())
        }
    }
}

/// Ensures `.specify/scripts/**/*.sh` files that start with `#!` carry
/// execute bits. Individual failures are collected, never fatal.
#[cfg(unix)]
pub fn ensure_executable_scripts(project_path: &Path) -> PermissionReport {
    use std::fs;
    use std::io::Read;
    use std::os::unix::fs::PermissionsExt;

    use walkdir::WalkDir;

    let mut report = PermissionReport::default();
    let scripts_root = project_path.join(".specify").join("scripts");
    if !scripts_root.is_dir() {
        return report;
    }

    for entry in WalkDir::new(&scripts_root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "sh"))
    {
        let path = entry.path();

        // Only scripts with a shebang line.
        let mut magic = [0u8; 2];
        let has_shebang = fs::File::open(path)
            .and_then(|mut f| f.read_exact(&mut magic))
            .map(|_| &magic == b"#!")
            .unwrap_or(false);
        if !has_shebang {
            continue;
        }

        let result = (|| -> std::io::Result<bool> {
            let metadata = fs::metadata(path)?;
            let mode = metadata.permissions().mode();
            if mode & 0o111 != 0 {
                return Ok(false);
            }
            let mut new_mode = mode;
            if mode & 0o400 != 0 {
                new_mode |= 0o100;
            }
            if mode & 0o040 != 0 {
                new_mode |= 0o010;
            }
            if mode & 0o004 != 0 {
                new_mode |= 0o001;
            }
            if new_mode & 0o100 == 0 {
                new_mode |= 0o100;
            }
            fs::set_permissions(path, fs::Permissions::from_mode(new_mode))?;
            Ok(true)
        })();

        match result {
            Ok(true) => report.updated += 1,
            Ok(false) => {}
            Err(e) => {
                let rel = path.strip_prefix(&scripts_root).unwrap_or(path);
                report.failures.push(format!("{}: {}", rel.display(), e));
            }
        }
    }

    report
}

#[cfg(not(unix))]
pub fn ensure_executable_scripts(_project_path: &Path) -> PermissionReport {
    PermissionReport::default()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn write_script(root: &Path, rel: &str, content: &str, mode: u32) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn adds_execute_bits_to_shebang_scripts() {
        let dir = TempDir::new().unwrap();
        write_script(
            dir.path(),
            ".specify/scripts/bash/plan.sh",
            "#!/bin/sh\necho hi\n",
            0o644,
        );

        let report = ensure_executable_scripts(dir.path());
        assert_eq!(report.updated, 1);

        let mode = fs::metadata(dir.path().join(".specify/scripts/bash/plan.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_ne!(mode & 0o100, 0, "owner execute bit set");
        assert_ne!(mode & 0o001, 0, "other execute follows other read");
    }

    #[test]
    fn leaves_already_executable_scripts_alone() {
        let dir = TempDir::new().unwrap();
        write_script(
            dir.path(),
            ".specify/scripts/bash/run.sh",
            "#!/bin/sh\n",
            0o755,
        );

        let report = ensure_executable_scripts(dir.path());
        assert_eq!(report.updated, 0);
    }

    #[test]
    fn skips_files_without_shebang() {
        let dir = TempDir::new().unwrap();
        write_script(
            dir.path(),
            ".specify/scripts/bash/data.sh",
            "just data\n",
            0o644,
        );

        let report = ensure_executable_scripts(dir.path());
        assert_eq!(report.updated, 0);

        let mode = fs::metadata(dir.path().join(".specify/scripts/bash/data.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0);
    }

    #[test]
    fn missing_scripts_dir_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let report = ensure_executable_scripts(dir.path());
        assert_eq!(report.updated, 0);
        assert!(report.failures.is_empty());
    }
}
