//! # GitHub Access
//!
//! Blocking HTTP access to the template release API and the models
//! catalog. All requests go through a [`GithubClient`] built once per
//! command and passed down explicitly; there is no ambient global client.
//!
//! An optional bearer token is attached to every outbound request,
//! resolved from an explicit CLI value first, then the `GH_TOKEN` and
//! `GITHUB_TOKEN` environment variables. Absence means unauthenticated
//! requests subject to anonymous rate limits.

mod download;
mod models;
mod release;

pub use download::{download_asset, TemplateArchive};
pub use models::{fallback_models, fetch_models, CatalogSource, ModelCatalog};
pub use release::{fetch_latest_release, select_template_asset, Asset, Release, ReleaseError};

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};

/// Owner of the repository that publishes template releases
pub const TEMPLATE_REPO_OWNER: &str = "FractionEstate";

/// Repository that publishes template releases
pub const TEMPLATE_REPO_NAME: &str = "development-spec-kit";

/// Timeout for metadata requests (release lookup, model catalog)
const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for asset downloads
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Resolves the GitHub token: explicit value first, then environment.
/// Blank values count as absent.
pub fn resolve_token(explicit: Option<&str>) -> Option<String> {
    let candidates = [
        explicit.map(str::to_string),
        std::env::var("GH_TOKEN").ok(),
        std::env::var("GITHUB_TOKEN").ok(),
    ];
    candidates
        .into_iter()
        .flatten()
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
}

/// Blocking HTTP client plus the request options shared by every call
pub struct GithubClient {
    api: Client,
    download: Client,
    token: Option<String>,
}

impl GithubClient {
    /// Builds a client pair with fixed per-call timeouts.
    ///
    /// `skip_tls` disables certificate verification for environments with
    /// intercepting proxies; it applies to every request made through this
    /// client.
    pub fn new(token: Option<String>, skip_tls: bool) -> Result<Self> {
        let api = Client::builder()
            .user_agent(concat!("specify-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(API_TIMEOUT)
            .danger_accept_invalid_certs(skip_tls)
            .build()
            .context("Failed to build HTTP client")?;
        let download = Client::builder()
            .user_agent(concat!("specify-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(DOWNLOAD_TIMEOUT)
            .danger_accept_invalid_certs(skip_tls)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            api,
            download,
            token,
        })
    }

    /// True when a token was resolved
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// GET with the API timeout and auth header when a token is present
    pub(crate) fn get_api(&self, url: &str) -> RequestBuilder {
        self.authorize(self.api.get(url))
    }

    /// GET with the download timeout and auth header when a token is present
    pub(crate) fn get_download(&self, url: &str) -> RequestBuilder {
        self.authorize(self.download.get(url))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}
