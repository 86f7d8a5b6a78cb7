//! Project status command
//!
//! Read-only: walks the current directory, derives the workflow summary
//! and prints it in plain text, JSON or an agent-oriented compact form.

use std::env;

use anyhow::{Context, Result};
use serde::Serialize;

use super::output::Output;
use crate::domain::StatusReport;
use crate::scaffold::git::is_git_repo;
use crate::storage::ModelsConfig;

/// Full status payload: the derived report plus surrounding configuration
#[derive(Serialize)]
struct StatusPayload {
    #[serde(flatten)]
    report: StatusReport,
    selected_model: Option<String>,
    script_flavor: Option<String>,
    git_repo: bool,
}

pub fn run(output: &Output) -> Result<()> {
    let root = env::current_dir().context("Failed to resolve working directory")?;
    let report = StatusReport::scan(&root)?;

    let config = ModelsConfig::for_project(&root);
    let payload = StatusPayload {
        selected_model: config.selected_model(),
        script_flavor: config.script_selection().map(|s| s.preferred),
        git_repo: is_git_repo(&root),
        report,
    };

    if output.is_json() {
        output.data(&payload);
    } else if output.is_agent() {
        render_agent(&payload);
    } else {
        render_text(&payload);
    }
    Ok(())
}

fn render_text(payload: &StatusPayload) {
    let report = &payload.report;

    println!("Project Status");
    println!("{}", "=".repeat(40));

    if !report.is_project {
        println!();
        println!("Not a Specify project (no .specify directory found).");
        println!("Run 'specify init .' to initialize this directory.");
        return;
    }

    println!();
    println!(
        "Constitution: {}",
        if report.has_constitution {
            "recorded"
        } else {
            "missing"
        }
    );
    if let Some(model) = &payload.selected_model {
        println!("Model:        {}", model);
    }
    if let Some(flavor) = &payload.script_flavor {
        println!("Scripts:      {}", flavor);
    }
    println!(
        "Git:          {}",
        if payload.git_repo { "initialized" } else { "none" }
    );

    println!();
    if report.features.is_empty() {
        println!("No features under specs/ yet.");
    } else {
        println!("Features ({}):", report.features.len());
        println!("{:<24} {:<6} {:<6} {:<6} NEXT", "NAME", "SPEC", "PLAN", "TASKS");
        println!("{}", "-".repeat(60));
        for feature in &report.features {
            println!(
                "{:<24} {:<6} {:<6} {:<6} {}",
                feature.name,
                mark(feature.has_spec),
                mark(feature.has_plan),
                mark(feature.has_tasks),
                feature.next_action.command()
            );
        }
        println!();
        println!(
            "Specs: {}  Plans: {}  Tasks: {}",
            report.specs_present, report.plans_present, report.tasks_present
        );
        if !report.missing_spec.is_empty() {
            println!("Missing spec:     {}", report.missing_spec.join(", "));
        }
        if !report.waiting_on_plan.is_empty() {
            println!("Waiting on plan:  {}", report.waiting_on_plan.join(", "));
        }
        if !report.waiting_on_tasks.is_empty() {
            println!("Waiting on tasks: {}", report.waiting_on_tasks.join(", "));
        }
    }

    println!();
    println!("Next: {}", report.suggestion.message());
}

/// Compact form for AI agents: one line per fact, no decoration.
fn render_agent(payload: &StatusPayload) {
    let report = &payload.report;

    if !report.is_project {
        println!("project: none (run 'specify init .')");
        return;
    }

    println!("project: specify");
    println!(
        "constitution: {}",
        if report.has_constitution { "yes" } else { "no" }
    );
    if let Some(model) = &payload.selected_model {
        println!("model: {}", model);
    }
    for feature in &report.features {
        println!(
            "feature: {} spec={} plan={} tasks={} next={}",
            feature.name,
            mark(feature.has_spec),
            mark(feature.has_plan),
            mark(feature.has_tasks),
            feature.next_action.command()
        );
    }
    println!("next: {}", report.suggestion.message());
}

fn mark(present: bool) -> &'static str {
    if present {
        "x"
    } else {
        "-"
    }
}
