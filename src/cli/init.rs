//! Project initialization command
//!
//! Orchestrates the pipeline: release fetch, download, materialization
//! (or local template copy), command generation, script permissions, git
//! setup and workspace synchronization, with a step tracker reporting
//! progress.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use super::output::Output;
use super::tracker::StepTracker;
use crate::domain::{Assistant, ScriptType};
use crate::github::{
    self, download_asset, fetch_latest_release, fetch_models, select_template_asset,
    GithubClient, ModelCatalog,
};
use crate::scaffold::{
    self, copy_local_templates, generate_commands, materialize_archive, sync_workspace,
    ExtractMode, SyncOutcome,
};

#[derive(Args)]
pub struct InitArgs {
    /// Name for the new project directory ('.' for the current directory)
    pub project_name: Option<String>,

    /// AI assistant to set up command prompts for
    #[arg(long = "ai", value_enum)]
    pub assistant: Option<Assistant>,

    /// Specific GitHub Model to use (e.g. gpt-4o, claude-3-5-sonnet)
    #[arg(long)]
    pub model: Option<String>,

    /// Script flavor to use
    #[arg(long = "script", value_enum)]
    pub script_type: Option<ScriptType>,

    /// Skip checks for assistant tooling
    #[arg(long)]
    pub ignore_agent_tools: bool,

    /// Skip git repository initialization
    #[arg(long)]
    pub no_git: bool,

    /// Initialize in the current directory instead of creating a new one
    #[arg(long)]
    pub here: bool,

    /// Merge into a non-empty current directory without confirmation
    #[arg(long)]
    pub force: bool,

    /// Skip SSL/TLS verification (not recommended)
    #[arg(long)]
    pub skip_tls: bool,

    /// Show verbose diagnostics for network and extraction failures
    #[arg(long)]
    pub debug: bool,

    /// GitHub token for API requests (or set GH_TOKEN / GITHUB_TOKEN)
    #[arg(long)]
    pub github_token: Option<String>,

    /// Use local templates from a development checkout
    #[arg(long)]
    pub local: bool,
}

/// Validated target location for the new project
#[derive(Debug)]
struct Target {
    path: PathBuf,
    /// True when initializing into the current directory (merge mode)
    here: bool,
}

pub fn run(output: &Output, mut args: InitArgs) -> Result<()> {
    // '.' is shorthand for --here.
    if args.project_name.as_deref() == Some(".") {
        args.here = true;
        args.project_name = None;
    }

    let target = resolve_target(&args)?;
    let workspace_root = env::current_dir().context("Failed to resolve working directory")?;

    let assistant = args.assistant.unwrap_or(Assistant::Copilot);
    let script_type = args.script_type.unwrap_or_else(ScriptType::platform_default);

    output.verbose_ctx(
        "init",
        &format!(
            "target={} assistant={} script={}",
            target.path.display(),
            assistant,
            script_type
        ),
    );

    let token = github::resolve_token(args.github_token.as_deref());
    let client = GithubClient::new(token, args.skip_tls)?;

    // Resolve the model before touching the filesystem so an unknown id
    // fails with nothing to clean up.
    let model_choice = if assistant.uses_github_models() {
        Some(resolve_model(output, &client, args.model.as_deref())?)
    } else {
        None
    };

    let mut tracker = StepTracker::new("Initialize Specify Project");
    if output.is_verbose() {
        tracker.attach_refresh(Box::new(|t| eprint!("{}", t.render())));
    }
    tracker.add("precheck", "Check required tools");
    tracker.complete("precheck", "ok");
    tracker.add("ai-select", "Select AI assistant");
    tracker.complete("ai-select", assistant.id());
    tracker.add("script-select", "Select script type");
    tracker.complete("script-select", script_type.id());

    let result = execute(
        output,
        &mut tracker,
        &args,
        &target,
        &workspace_root,
        assistant,
        script_type,
        model_choice.as_ref(),
        &client,
    );

    if !output.is_json() {
        print!("{}", tracker.render());
    }

    if let Err(e) = result {
        // The destination is only removed when the tool created it;
        // never delete the user's current directory.
        if !target.here && target.path.exists() {
            let _ = fs::remove_dir_all(&target.path);
        }
        return Err(e);
    }

    report_success(output, &target, assistant, model_choice.as_ref());
    Ok(())
}

/// Validates the project-name/--here combination and the destination state.
fn resolve_target(args: &InitArgs) -> Result<Target> {
    if args.here && args.project_name.is_some() {
        bail!("Cannot specify both a project name and --here");
    }

    if args.here {
        let path = env::current_dir().context("Failed to resolve working directory")?;
        let occupied = fs::read_dir(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?
            .next()
            .is_some();
        if occupied && !args.force {
            bail!(
                "Current directory is not empty. Template files will be merged with \
                 existing content; pass --force to proceed."
            );
        }
        return Ok(Target { path, here: true });
    }

    let Some(name) = &args.project_name else {
        bail!("Must specify a project name, '.' for the current directory, or --here");
    };
    let path = PathBuf::from(name);
    if path.exists() {
        bail!(
            "Directory '{}' already exists. Choose a different project name or remove it.",
            name
        );
    }
    Ok(Target { path, here: false })
}

/// Resolved model plus the catalog provenance recorded alongside it
struct ModelChoice {
    model: String,
    catalog_source: &'static str,
    catalog_cached_at: Option<String>,
}

/// Validates an explicit model id against the catalog, or picks the
/// default when none was given.
fn resolve_model(
    output: &Output,
    client: &GithubClient,
    requested: Option<&str>,
) -> Result<ModelChoice> {
    let ModelCatalog {
        models,
        source,
        cached_at,
    } = fetch_models(client, true);
    output.verbose_ctx(
        "init",
        &format!("model catalog: {} entries from {}", models.len(), source.as_str()),
    );

    let model = match requested {
        Some(id) => {
            if !models.contains_key(id) {
                bail!(
                    "Model '{}' not found. Available models: {}\n\
                     Use 'specify list-models' to see details.",
                    id,
                    models.keys().cloned().collect::<Vec<_>>().join(", ")
                );
            }
            id.to_string()
        }
        None => {
            // Without an explicit choice, prefer the catalog default.
            let fallback = models.keys().next().cloned().unwrap_or_default();
            if models.contains_key("gpt-4o") {
                "gpt-4o".to_string()
            } else {
                fallback
            }
        }
    };

    Ok(ModelChoice {
        model,
        catalog_source: source.as_str(),
        catalog_cached_at: cached_at,
    })
}

#[allow(clippy::too_many_arguments)]
fn execute(
    output: &Output,
    tracker: &mut StepTracker,
    args: &InitArgs,
    target: &Target,
    workspace_root: &std::path::Path,
    assistant: Assistant,
    script_type: ScriptType,
    model_choice: Option<&ModelChoice>,
    client: &GithubClient,
) -> Result<()> {
    if args.local {
        tracker.add("copy", "Copy local templates");
        tracker.start("copy", "");
        let dev_root = scaffold::local::locate_dev_root();
        match copy_local_templates(&dev_root, &target.path) {
            Ok(()) => tracker.complete("copy", "local templates copied"),
            Err(e) => {
                tracker.error("copy", &e.to_string());
                return Err(e);
            }
        }
    } else {
        fetch_and_materialize(tracker, args, target, assistant, script_type, client)?;
    }

    tracker.add("chmod", "Ensure scripts executable");
    let report = scaffold::permissions::ensure_executable_scripts(&target.path);
    if report.failures.is_empty() {
        tracker.complete("chmod", &report.detail());
    } else {
        tracker.error("chmod", &report.detail());
        for failure in &report.failures {
            output.verbose_ctx("chmod", failure);
        }
    }

    tracker.add("commands", "Generate assistant commands");
    tracker.start("commands", "");
    let generated = generate_commands(
        &target.path,
        assistant,
        script_type,
        model_choice.map(|c| c.model.as_str()),
        model_choice.map_or("none", |c| c.catalog_source),
        model_choice.and_then(|c| c.catalog_cached_at.as_deref()),
    )?;
    tracker.complete("commands", &format!("{} files", generated.len()));

    tracker.add("git", "Initialize git repository");
    if args.no_git {
        tracker.skip("git", "--no-git flag");
    } else if scaffold::git::is_git_repo(&target.path) {
        tracker.complete("git", "existing repo detected");
    } else if which::which("git").is_ok() {
        match scaffold::git::init_repo(&target.path) {
            Ok(()) => tracker.complete("git", "initialized"),
            Err(e) => {
                tracker.error("git", "init failed");
                output.verbose_ctx("git", &e.to_string());
            }
        }
    } else {
        tracker.skip("git", "git not available");
    }

    tracker.add("sync", "Sync workspace directories");
    match sync_workspace(&target.path, workspace_root)? {
        SyncOutcome::NotNeeded => tracker.skip("sync", "no sync needed"),
        SyncOutcome::Synced { synced, skipped } => {
            let detail = if synced.is_empty() {
                format!("nothing new ({} up to date)", skipped.len())
            } else {
                synced.join(", ")
            };
            tracker.complete("sync", &detail);
        }
    }

    tracker.add("final", "Finalize");
    tracker.complete("final", "project ready");
    Ok(())
}

/// Network path: release lookup, asset download, materialization.
fn fetch_and_materialize(
    tracker: &mut StepTracker,
    args: &InitArgs,
    target: &Target,
    assistant: Assistant,
    script_type: ScriptType,
    client: &GithubClient,
) -> Result<()> {
    tracker.add("fetch", "Fetch latest release");
    tracker.add("download", "Download template");
    tracker.add("extract", "Extract template");

    tracker.start("fetch", "contacting GitHub API");
    let release = match fetch_latest_release(
        client,
        github::TEMPLATE_REPO_OWNER,
        github::TEMPLATE_REPO_NAME,
        args.debug,
    ) {
        Ok(release) => release,
        Err(e) => {
            tracker.error("fetch", &e.to_string());
            return Err(e.into());
        }
    };
    let asset = match select_template_asset(&release, assistant, script_type) {
        Ok(asset) => asset,
        Err(e) => {
            tracker.error("fetch", &e.to_string());
            return Err(e.into());
        }
    };
    tracker.complete(
        "fetch",
        &format!("release {} ({} bytes)", release.tag_name, asset.size),
    );

    tracker.start("download", &asset.name);
    let staging = tempfile::tempdir().context("Failed to create download directory")?;
    let archive = match download_asset(
        client,
        &release,
        asset,
        staging.path(),
        stderr_is_terminal(),
    ) {
        Ok(archive) => archive,
        Err(e) => {
            tracker.error("download", &e.to_string());
            return Err(e);
        }
    };
    tracker.complete("download", &archive.filename);

    tracker.start("extract", "");
    let mode = if target.here {
        ExtractMode::Merge
    } else {
        ExtractMode::Fresh
    };
    tracker.add("cleanup", "Remove temporary archive");
    // The materializer removes the archive whether or not it succeeds.
    match materialize_archive(&archive.path, &target.path, mode) {
        Ok(()) => {
            tracker.complete("extract", "");
            tracker.complete("cleanup", "");
        }
        Err(e) => {
            tracker.error("extract", &e.to_string());
            tracker.complete("cleanup", "");
            return Err(e);
        }
    }

    Ok(())
}

/// Progress bars only make sense on a terminal; tests and pipes skip them.
fn stderr_is_terminal() -> bool {
    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

fn report_success(
    output: &Output,
    target: &Target,
    assistant: Assistant,
    model_choice: Option<&ModelChoice>,
) {
    if output.is_json() {
        output.data(&serde_json::json!({
            "success": true,
            "project": target.path.display().to_string(),
            "assistant": assistant.id(),
            "model": model_choice.map(|c| c.model.clone()),
        }));
        return;
    }

    output.blank();
    output.success("Project ready.");
    output.blank();

    println!(
        "Some agents may store credentials or auth tokens under {}.",
        assistant.agent_folder()
    );
    println!("Consider adding it (or parts of it) to .gitignore.");
    output.blank();

    println!("Next steps:");
    if target.here {
        println!("  1. You're already in the project directory");
    } else {
        println!("  1. cd {}", target.path.display());
    }
    println!("  2. Work through the slash commands with {}:", assistant.display_name());
    println!("     /constitution - Establish project principles");
    println!("     /specify      - Create baseline specification");
    println!("     /plan         - Create implementation plan");
    println!("     /tasks        - Generate actionable tasks");
    println!("     /implement    - Execute implementation");
    output.blank();
    println!("Optional: /clarify before /plan, /analyze after /tasks.");
}
