//! GitHub Models catalog
//!
//! Fetches the available model list from the models API and merges it with
//! a built-in fallback catalog; the fallback entries win for ids they
//! share with the API response. The cache layer is consulted first and
//! refreshed best-effort - any cache error is a miss, never a failure.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;

use super::GithubClient;
use crate::storage::ModelsCache;

const MODELS_API_URL: &str = "https://models.inference.ai.azure.com/models";
const MODELS_TIMEOUT: Duration = Duration::from_secs(10);

/// Where a catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Cache,
    Api,
    Fallback,
}

impl CatalogSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogSource::Cache => "cache",
            CatalogSource::Api => "api_with_fallback",
            CatalogSource::Fallback => "fallback",
        }
    }
}

/// Model id -> display name, plus provenance
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    pub models: BTreeMap<String, String>,
    pub source: CatalogSource,
    /// Timestamp of the cache record the catalog came from, when cached
    pub cached_at: Option<String>,
}

/// Known models used when the API is unavailable
pub fn fallback_models() -> BTreeMap<String, String> {
    [
        ("gpt-4", "GPT-4"),
        ("gpt-4-turbo", "GPT-4 Turbo"),
        ("gpt-4.1", "GPT-4.1"),
        ("gpt-4o", "GPT-4o"),
        ("gpt-4o-mini", "GPT-4o Mini"),
        ("gpt-5-mini", "GPT-5 Mini"),
        ("gpt-5", "GPT-5"),
        ("gpt-5-codex", "GPT-5 Codex"),
        ("grok-code-fast-1", "Grok Code Fast 1"),
        ("claude-3-5-sonnet", "Claude Sonnet 3.5"),
        ("claude-3-7-sonnet", "Claude Sonnet 3.7"),
        ("claude-4-sonnet", "Claude Sonnet 4"),
        ("gemini-2.5-pro", "Gemini 2.5 Pro"),
        ("o3-mini", "o3-mini"),
        ("o4-mini", "o4-mini"),
        ("meta-llama-3-70b-instruct", "Meta Llama 3 70B Instruct"),
        ("meta-llama-3-8b-instruct", "Meta Llama 3 8B Instruct"),
        ("meta-llama-3.1-405b-instruct", "Meta Llama 3.1 405B Instruct"),
        ("meta-llama-3.1-70b-instruct", "Meta Llama 3.1 70B Instruct"),
        ("meta-llama-3.1-8b-instruct", "Meta Llama 3.1 8B Instruct"),
        ("mistral-nemo", "Mistral Nemo"),
        ("mistral-large-2407", "Mistral Large 2407"),
        ("mistral-small", "Mistral Small"),
        ("ai21-jamba-instruct", "AI21 Jamba Instruct"),
        ("cohere-embed-v3-english", "Cohere Embed v3 English"),
        ("cohere-embed-v3-multilingual", "Cohere Embed v3 Multilingual"),
    ]
    .into_iter()
    .map(|(id, name)| (id.to_string(), name.to_string()))
    .collect()
}

/// Fetches the model catalog, preferring the cache when `use_cache` holds.
///
/// Never fails: the fallback catalog is the answer of last resort.
pub fn fetch_models(client: &GithubClient, use_cache: bool) -> ModelCatalog {
    let cache = ModelsCache::open_default().ok();

    if use_cache {
        if let Some(cache) = &cache {
            if let Ok((models, cached_at)) = cache.read() {
                return ModelCatalog {
                    models,
                    source: CatalogSource::Cache,
                    cached_at: Some(cached_at),
                };
            }
        }
    }

    match fetch_from_api(client) {
        Some(api_models) => {
            // Fallback entries take precedence for ids both sides know.
            let mut combined = api_models;
            combined.extend(fallback_models());

            if use_cache {
                if let Some(cache) = &cache {
                    let _ = cache.write(&combined, CatalogSource::Api.as_str());
                }
            }

            ModelCatalog {
                models: combined,
                source: CatalogSource::Api,
                cached_at: None,
            }
        }
        None => ModelCatalog {
            models: fallback_models(),
            source: CatalogSource::Fallback,
            cached_at: None,
        },
    }
}

/// Queries the models API; any failure is reported as `None`.
fn fetch_from_api(client: &GithubClient) -> Option<BTreeMap<String, String>> {
    let response = client
        .get_api(MODELS_API_URL)
        .timeout(MODELS_TIMEOUT)
        .send()
        .ok()?;
    if !response.status().is_success() {
        return None;
    }
    let body: Value = response.json().ok()?;
    Some(parse_catalog(&body))
}

/// Extracts `{id -> name}` from either `{"data": [...]}` or a bare list.
/// Model ids of the form `publisher/name/version` are simplified to the
/// middle segment.
fn parse_catalog(body: &Value) -> BTreeMap<String, String> {
    let entries = match body {
        Value::Object(map) => map.get("data").and_then(Value::as_array),
        Value::Array(_) => body.as_array(),
        _ => None,
    };

    let mut models = BTreeMap::new();
    for entry in entries.into_iter().flatten() {
        let Some(id) = entry.get("id").and_then(Value::as_str) else {
            continue;
        };
        if id.is_empty() {
            continue;
        }
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(id)
            .to_string();
        let simple_id = simplify_model_id(id);
        models.insert(simple_id, name);
    }
    models
}

fn simplify_model_id(id: &str) -> String {
    if id.contains('/') {
        let segments: Vec<&str> = id.split('/').collect();
        segments[segments.len().saturating_sub(2)].to_string()
    } else {
        id.to_string()
    }
}
