//! # Storage Layer
//!
//! Flat-file persistence for Specify:
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Model/script selection | JSON | `.specify/config/models.json` |
//! | Model catalog cache | JSON | `~/.specify/models_cache.json` |
//!
//! Config writes are merge-additive: the `github_models` and `scripts`
//! namespaces are updated independently and unrelated keys survive every
//! rewrite. The catalog cache is best-effort; every [`CacheError`] is
//! treated as a miss by its callers.

mod cache;
mod config;

pub use cache::{CacheError, ModelsCache, CACHE_TTL};
pub use config::{ModelsConfig, ScriptSelection};
