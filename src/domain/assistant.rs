//! Assistant and script-type configuration
//!
//! The set of supported assistants is fixed and small, so each one is an
//! enum variant carrying its output directory, file-naming convention and
//! argument placeholder as typed fields rather than a lookup in a dynamic
//! table.

use std::fmt;

use serde::Serialize;

/// How generated command files are named and formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFormat {
    /// Plain markdown, `<name>.md`
    Markdown,
    /// Dual-extension markdown, `<name>.prompt.md`
    PromptMarkdown,
    /// TOML with a `description` key and a triple-quoted `prompt` block,
    /// `<name>.toml`
    Toml,
}

/// AI assistants we can set up command prompts for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Assistant {
    /// GitHub Models via the Copilot integration
    Copilot,
    /// Claude Code
    Claude,
    /// Gemini CLI
    Gemini,
}

impl Assistant {
    /// Identifier used in release asset names and CLI arguments
    pub fn id(&self) -> &'static str {
        match self {
            Assistant::Copilot => "copilot",
            Assistant::Claude => "claude",
            Assistant::Gemini => "gemini",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Assistant::Copilot => "GitHub Models",
            Assistant::Claude => "Claude Code",
            Assistant::Gemini => "Gemini CLI",
        }
    }

    /// Directory (relative to the project root) for generated command files
    pub fn commands_dir(&self) -> &'static str {
        match self {
            Assistant::Copilot => ".github/prompts",
            Assistant::Claude => ".claude/commands",
            Assistant::Gemini => ".gemini/commands",
        }
    }

    /// File-naming and formatting convention for generated command files
    pub fn command_format(&self) -> CommandFormat {
        match self {
            Assistant::Copilot => CommandFormat::PromptMarkdown,
            Assistant::Claude => CommandFormat::Markdown,
            Assistant::Gemini => CommandFormat::Toml,
        }
    }

    /// Literal that replaces the `$ARGUMENTS` marker in templates
    pub fn arg_placeholder(&self) -> &'static str {
        match self {
            Assistant::Copilot => "$ARGUMENTS",
            Assistant::Claude => "$ARGUMENTS",
            Assistant::Gemini => "{{args}}",
        }
    }

    /// Output filename for a command template with the given base name
    pub fn command_filename(&self, stem: &str) -> String {
        match self.command_format() {
            CommandFormat::Markdown => format!("{}.md", stem),
            CommandFormat::PromptMarkdown => format!("{}.prompt.md", stem),
            CommandFormat::Toml => format!("{}.toml", stem),
        }
    }

    /// Top-level folder the assistant stores its artifacts under, used for
    /// the post-init credential warning
    pub fn agent_folder(&self) -> &'static str {
        match self {
            Assistant::Copilot => ".github/",
            Assistant::Claude => ".claude/",
            Assistant::Gemini => ".gemini/",
        }
    }

    /// True when the assistant selects a GitHub Model at init time
    pub fn uses_github_models(&self) -> bool {
        matches!(self, Assistant::Copilot)
    }

    /// All supported assistants
    pub fn all() -> &'static [Assistant] {
        &[Assistant::Copilot, Assistant::Claude, Assistant::Gemini]
    }
}

impl fmt::Display for Assistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Script flavor for the helper scripts shipped with the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    /// POSIX shell (bash/zsh)
    Sh,
    /// PowerShell
    Ps,
}

impl ScriptType {
    /// Identifier used in release asset names and CLI arguments
    pub fn id(&self) -> &'static str {
        match self {
            ScriptType::Sh => "sh",
            ScriptType::Ps => "ps",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ScriptType::Sh => "POSIX Shell (bash/zsh)",
            ScriptType::Ps => "PowerShell",
        }
    }

    /// Folder under `.specify/scripts/` holding this flavor's scripts
    pub fn folder(&self) -> &'static str {
        match self {
            ScriptType::Sh => "bash",
            ScriptType::Ps => "powershell",
        }
    }

    /// File extension for this flavor's scripts
    pub fn extension(&self) -> &'static str {
        match self {
            ScriptType::Sh => "sh",
            ScriptType::Ps => "ps1",
        }
    }

    /// Script path (relative to the project root) for a command template
    /// with the given base name
    pub fn script_path(&self, stem: &str) -> String {
        format!(
            ".specify/scripts/{}/{}.{}",
            self.folder(),
            stem,
            self.extension()
        )
    }

    /// Platform default: PowerShell on Windows, POSIX shell elsewhere
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            ScriptType::Ps
        } else {
            ScriptType::Sh
        }
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
