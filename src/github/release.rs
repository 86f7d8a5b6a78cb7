//! Release lookup and template asset selection
//!
//! Fetches the latest release record for the template repository and
//! selects the asset matching the `spec-kit-template-{assistant}-{script}`
//! naming pattern.

use serde::Deserialize;
use thiserror::Error;

use super::GithubClient;
use crate::domain::{Assistant, ScriptType};

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("GitHub API returned {status} for {url}{detail}")]
    Api {
        status: u16,
        url: String,
        detail: String,
    },

    #[error("Failed to parse release JSON: {0}")]
    Parse(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(
        "No release asset matches pattern '{pattern}'. Available assets:\n{available}"
    )]
    NoMatchingAsset { pattern: String, available: String },
}

/// A downloadable file attached to a release
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub name: String,
    pub size: u64,
    pub browser_download_url: String,
}

/// Latest-release record as returned by the GitHub API
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// Fetches the latest release for the template repository.
///
/// In debug mode upstream failures carry the response body, truncated to
/// 500 bytes.
pub fn fetch_latest_release(
    client: &GithubClient,
    owner: &str,
    repo: &str,
    debug: bool,
) -> Result<Release, ReleaseError> {
    let url = format!(
        "https://api.github.com/repos/{}/{}/releases/latest",
        owner, repo
    );

    let response = client.get_api(&url).send()?;
    let status = response.status();
    if !status.is_success() {
        let detail = if debug {
            let body = response.text().unwrap_or_default();
            format!("\nBody (truncated 500): {}", truncate(&body, 500))
        } else {
            String::new()
        };
        return Err(ReleaseError::Api {
            status: status.as_u16(),
            url,
            detail,
        });
    }

    let body = response.text()?;
    serde_json::from_str(&body).map_err(|e| {
        ReleaseError::Parse(format!(
            "{} (raw, truncated 400: {})",
            e,
            truncate(&body, 400)
        ))
    })
}

/// Selects the template asset for an assistant/script-type pair.
///
/// The asset name must contain `spec-kit-template-{assistant}-{script}`
/// and end with `.zip`. Multiple matches silently pick the first; zero
/// matches is an error naming the expected pattern and listing what the
/// release actually carries.
pub fn select_template_asset<'a>(
    release: &'a Release,
    assistant: Assistant,
    script_type: ScriptType,
) -> Result<&'a Asset, ReleaseError> {
    let pattern = format!(
        "spec-kit-template-{}-{}",
        assistant.id(),
        script_type.id()
    );

    release
        .assets
        .iter()
        .find(|asset| asset.name.contains(&pattern) && asset.name.ends_with(".zip"))
        .ok_or_else(|| {
            let available = if release.assets.is_empty() {
                "(no assets)".to_string()
            } else {
                release
                    .assets
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            ReleaseError::NoMatchingAsset { pattern, available }
        })
}

fn truncate(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str) -> Asset {
        Asset {
            name: name.to_string(),
            size: 1024,
            browser_download_url: format!("https://example.invalid/{}", name),
        }
    }

    fn release(assets: Vec<Asset>) -> Release {
        Release {
            tag_name: "v1.0.0".to_string(),
            assets,
        }
    }

    #[test]
    fn selects_matching_assistant_and_script() {
        let rel = release(vec![
            asset("spec-kit-template-claude-sh-v1.zip"),
            asset("spec-kit-template-copilot-ps-v1.zip"),
            asset("spec-kit-template-copilot-sh-v1.zip"),
        ]);

        let selected =
            select_template_asset(&rel, Assistant::Copilot, ScriptType::Sh).unwrap();
        assert_eq!(selected.name, "spec-kit-template-copilot-sh-v1.zip");
    }

    #[test]
    fn first_match_wins_on_duplicates() {
        let rel = release(vec![
            asset("spec-kit-template-copilot-sh-v1.zip"),
            asset("spec-kit-template-copilot-sh-v2.zip"),
        ]);

        let selected =
            select_template_asset(&rel, Assistant::Copilot, ScriptType::Sh).unwrap();
        assert_eq!(selected.name, "spec-kit-template-copilot-sh-v1.zip");
    }

    #[test]
    fn non_zip_assets_are_ignored() {
        let rel = release(vec![asset("spec-kit-template-copilot-sh-v1.tar.gz")]);

        let err =
            select_template_asset(&rel, Assistant::Copilot, ScriptType::Sh).unwrap_err();
        match err {
            ReleaseError::NoMatchingAsset { pattern, .. } => {
                assert_eq!(pattern, "spec-kit-template-copilot-sh");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_asset_error_names_the_pattern() {
        let rel = release(vec![asset("spec-kit-template-claude-sh-v1.zip")]);

        let err =
            select_template_asset(&rel, Assistant::Gemini, ScriptType::Ps).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("spec-kit-template-gemini-ps"));
        assert!(message.contains("spec-kit-template-claude-sh-v1.zip"));
    }

    #[test]
    fn empty_release_lists_no_assets() {
        let rel = release(vec![]);
        let err =
            select_template_asset(&rel, Assistant::Copilot, ScriptType::Sh).unwrap_err();
        assert!(err.to_string().contains("(no assets)"));
    }

    #[test]
    fn release_json_parses() {
        let body = r#"{
            "tag_name": "v0.4.2",
            "assets": [
                {
                    "name": "spec-kit-template-copilot-sh-v0.4.2.zip",
                    "size": 123456,
                    "browser_download_url": "https://example.invalid/a.zip"
                }
            ]
        }"#;
        let rel: Release = serde_json::from_str(body).unwrap();
        assert_eq!(rel.tag_name, "v0.4.2");
        assert_eq!(rel.assets.len(), 1);
        assert_eq!(rel.assets[0].size, 123456);
    }
}
