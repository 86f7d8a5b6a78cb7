//! Streamed asset download
//!
//! Downloads a release asset to a local path in fixed-size chunks. When
//! the remote declares a content length and progress display is enabled,
//! a proportional progress bar is shown; otherwise chunks are written
//! without progress tracking. A partially written file is removed before
//! any error propagates.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use super::{Asset, GithubClient, Release};

const CHUNK_SIZE: usize = 8192;

/// A downloaded template archive plus its release metadata
#[derive(Debug, Clone)]
pub struct TemplateArchive {
    pub path: PathBuf,
    pub filename: String,
    pub size: u64,
    pub release_tag: String,
    pub source_url: String,
}

/// Downloads `asset` into `download_dir`, returning the archive handle.
pub fn download_asset(
    client: &GithubClient,
    release: &Release,
    asset: &Asset,
    download_dir: &Path,
    show_progress: bool,
) -> Result<TemplateArchive> {
    let dest = download_dir.join(&asset.name);

    let result = stream_to_file(client, &asset.browser_download_url, &dest, show_progress);
    if let Err(e) = result {
        // Never leave a partial archive behind.
        let _ = fs::remove_file(&dest);
        return Err(e).with_context(|| format!("Failed to download {}", asset.name));
    }

    Ok(TemplateArchive {
        path: dest,
        filename: asset.name.clone(),
        size: asset.size,
        release_tag: release.tag_name.clone(),
        source_url: asset.browser_download_url.clone(),
    })
}

fn stream_to_file(
    client: &GithubClient,
    url: &str,
    dest: &Path,
    show_progress: bool,
) -> Result<()> {
    let mut response = client
        .get_download(url)
        .send()
        .with_context(|| format!("Failed to GET {}", url))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        let sample: String = body.chars().take(400).collect();
        bail!("Download failed with {}: {}", status, sample);
    }

    let total = response.content_length();
    let bar = match (show_progress, total) {
        (true, Some(total)) if total > 0 => {
            let bar = ProgressBar::new(total);
            let style = ProgressStyle::with_template(
                "{msg} [{bar:30}] {bytes}/{total_bytes} ({percent}%)",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style.progress_chars("=> "));
            bar.set_message("Downloading");
            Some(bar)
        }
        _ => None,
    };

    let mut file = File::create(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let read = response.read(&mut buffer).context("Read from remote failed")?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read])
            .with_context(|| format!("Write to {} failed", dest.display()))?;
        if let Some(bar) = &bar {
            bar.inc(read as u64);
        }
    }

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    Ok(())
}
