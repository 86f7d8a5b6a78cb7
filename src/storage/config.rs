//! Model and script selection persistence
//!
//! The config lives at `.specify/config/models.json` inside the project.
//! Reads tolerate a missing or corrupt file (treated as an empty record);
//! writes rewrite the whole file but only touch their own top-level key,
//! so model metadata and script metadata never erase each other.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::domain::ScriptType;

/// Relative path of the config file inside a project
pub const CONFIG_PATH: &str = ".specify/config/models.json";

/// Script-flavor selection as persisted under the `scripts` key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSelection {
    pub preferred: String,
    pub folder: String,
    pub extension: String,
}

impl From<ScriptType> for ScriptSelection {
    fn from(script: ScriptType) -> Self {
        Self {
            preferred: script.id().to_string(),
            folder: script.folder().to_string(),
            extension: script.extension().to_string(),
        }
    }
}

/// Handle on a project's `models.json`
pub struct ModelsConfig {
    path: PathBuf,
}

impl ModelsConfig {
    /// Config handle for the project rooted at `project_root`
    pub fn for_project(project_root: &Path) -> Self {
        Self {
            path: project_root.join(CONFIG_PATH),
        }
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw record, treating a missing or corrupt file as empty
    fn read_record(&self) -> Map<String, Value> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Map::new();
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Rewrites the whole file with the given record
    fn write_record(&self, record: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = serde_json::to_string_pretty(&Value::Object(record.clone()))
            .context("Failed to serialize models config")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write config: {}", self.path.display()))
    }

    /// Records the selected model under `github_models`, leaving other
    /// top-level keys untouched
    pub fn set_selected_model(
        &self,
        model: &str,
        catalog_source: &str,
        catalog_cached_at: Option<&str>,
    ) -> Result<()> {
        let mut record = self.read_record();
        record.insert(
            "github_models".to_string(),
            json!({
                "selected_model": model,
                "last_updated": Utc::now().to_rfc3339(),
                "catalog_source": catalog_source,
                "catalog_cached_at": catalog_cached_at,
            }),
        );
        self.write_record(&record)
    }

    /// Records the script-flavor selection under `scripts`, leaving other
    /// top-level keys untouched
    pub fn set_script_selection(&self, selection: &ScriptSelection) -> Result<()> {
        let mut record = self.read_record();
        record.insert(
            "scripts".to_string(),
            json!({
                "preferred": selection.preferred,
                "folder": selection.folder,
                "extension": selection.extension,
                "last_updated": Utc::now().to_rfc3339(),
            }),
        );
        self.write_record(&record)
    }

    /// Selected model id, if one has been recorded
    pub fn selected_model(&self) -> Option<String> {
        self.read_record()
            .get("github_models")?
            .get("selected_model")?
            .as_str()
            .map(str::to_string)
    }

    /// Timestamp of the last model selection, if recorded
    pub fn model_last_updated(&self) -> Option<String> {
        self.read_record()
            .get("github_models")?
            .get("last_updated")?
            .as_str()
            .map(str::to_string)
    }

    /// Persisted script-flavor selection, if recorded
    pub fn script_selection(&self) -> Option<ScriptSelection> {
        let record = self.read_record();
        let scripts = record.get("scripts")?;
        Some(ScriptSelection {
            preferred: scripts.get("preferred")?.as_str()?.to_string(),
            folder: scripts.get("folder")?.as_str()?.to_string(),
            extension: scripts.get("extension")?.as_str()?.to_string(),
        })
    }
}
