//! Tool availability check command

use anyhow::Result;

use super::output::Output;
use super::tracker::StepTracker;
use crate::domain::Assistant;

pub fn run(output: &Output) -> Result<()> {
    let mut tracker = StepTracker::new("Check Available Tools");

    tracker.add("git", "Git version control");
    tracker.add("code", "Visual Studio Code");
    tracker.add("code-insiders", "Visual Studio Code Insiders");
    for assistant in Assistant::all() {
        tracker.add(assistant.id(), assistant.display_name());
    }

    let git_ok = check_tool(&mut tracker, "git");
    let code_ok = check_tool(&mut tracker, "code");
    let insiders_ok = check_tool(&mut tracker, "code-insiders");

    // Assistants are IDE-based; no CLI binary is required.
    for assistant in Assistant::all() {
        tracker.complete(assistant.id(), "IDE-based (no CLI check)");
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "git": git_ok,
            "code": code_ok,
            "code_insiders": insiders_ok,
        }));
        return Ok(());
    }

    print!("{}", tracker.render());
    println!();
    output.success("Specify CLI is ready to use.");

    if !git_ok {
        println!("Tip: install git for repository management");
    }
    if !(code_ok || insiders_ok) {
        println!("Tip: install VS Code for the best integration experience");
    }

    Ok(())
}

fn check_tool(tracker: &mut StepTracker, tool: &str) -> bool {
    match which::which(tool) {
        Ok(_) => {
            tracker.complete(tool, "available");
            true
        }
        Err(_) => {
            tracker.error(tool, "not found");
            false
        }
    }
}
