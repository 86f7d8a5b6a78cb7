//! Command file generation
//!
//! Renders every command template under `.specify/templates/commands/`
//! into the assistant's command directory. Substitution is literal string
//! replacement, not a templating language: `$ARGUMENTS` becomes the
//! assistant's placeholder literal and `{SCRIPT}` becomes the path of the
//! matching helper script for the selected script flavor.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::fsutil::copy_plan;
use crate::domain::{Assistant, CommandFormat, ScriptType};
use crate::storage::{ModelsConfig, ScriptSelection};

/// Template directory relative to the project root
pub const COMMAND_TEMPLATES_DIR: &str = ".specify/templates/commands";

/// Marker replaced with the assistant's argument placeholder
const ARGUMENTS_MARKER: &str = "$ARGUMENTS";

/// Marker replaced with the helper-script path
const SCRIPT_MARKER: &str = "{SCRIPT}";

/// Generates command files for the assistant and persists the model and
/// script selections. Returns the generated file names.
pub fn generate_commands(
    project_path: &Path,
    assistant: Assistant,
    script_type: ScriptType,
    selected_model: Option<&str>,
    catalog_source: &str,
    catalog_cached_at: Option<&str>,
) -> Result<Vec<String>> {
    let config = ModelsConfig::for_project(project_path);
    if let Some(model) = selected_model {
        config.set_selected_model(model, catalog_source, catalog_cached_at)?;
    }
    config.set_script_selection(&ScriptSelection::from(script_type))?;

    let templates_dir = project_path.join(COMMAND_TEMPLATES_DIR);
    if !templates_dir.is_dir() {
        return Ok(Vec::new());
    }

    let output_dir = project_path.join(assistant.commands_dir());
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut generated = Vec::new();
    let mut templates: Vec<_> = copy_plan(&templates_dir)?
        .into_iter()
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .filter(|p| p.parent().map_or(true, |parent| parent.as_os_str().is_empty()))
        .collect();
    templates.sort();

    for template in templates {
        let stem = template
            .file_stem()
            .context("Template has no file stem")?
            .to_string_lossy()
            .to_string();
        let content = fs::read_to_string(templates_dir.join(&template))
            .with_context(|| format!("Failed to read template {}", template.display()))?;

        let rendered = render_command(&content, assistant, script_type, &stem);
        let filename = assistant.command_filename(&stem);
        fs::write(output_dir.join(&filename), rendered)
            .with_context(|| format!("Failed to write {}", filename))?;
        generated.push(filename);
    }

    Ok(generated)
}

/// Applies placeholder substitution and the assistant's file format.
fn render_command(
    template: &str,
    assistant: Assistant,
    script_type: ScriptType,
    stem: &str,
) -> String {
    let content = template
        .replace(ARGUMENTS_MARKER, assistant.arg_placeholder())
        .replace(SCRIPT_MARKER, &script_type.script_path(stem));

    match assistant.command_format() {
        CommandFormat::Markdown | CommandFormat::PromptMarkdown => content,
        CommandFormat::Toml => to_toml_command(&content),
    }
}

/// Wraps rendered markdown as a TOML command file: the leading heading
/// becomes the `description`, the remainder the quoted `prompt` block.
fn to_toml_command(content: &str) -> String {
    let (description, rest) = match content.split_once('\n') {
        Some((first, rest)) => (first.trim_start_matches('#').trim(), rest),
        None => (content.trim_start_matches('#').trim(), ""),
    };
    let prompt = rest.trim();
    format!(
        "description = \"{}\"\n\nprompt = \"\"\"\n{}\n\"\"\"\n",
        description.replace('"', "\\\""),
        prompt
    )
}
