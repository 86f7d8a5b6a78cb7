//! Workflow artifact status
//!
//! Derives a completion summary from the project tree: the constitution
//! file plus spec/plan/tasks marker files for each feature under `specs/`.
//! Everything here is computed fresh on each query, nothing is persisted.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Marker subdirectory that identifies a Specify project
pub const MARKER_DIR: &str = ".specify";

/// Constitution file path relative to the project root
pub const CONSTITUTION_PATH: &str = ".specify/memory/constitution.md";

/// Directory holding per-feature artifact directories
pub const SPECS_DIR: &str = "specs";

/// The next recommended command for a feature, by fixed precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NextAction {
    Specify,
    Plan,
    Tasks,
    Implement,
}

impl NextAction {
    /// Slash command the action corresponds to
    pub fn command(&self) -> &'static str {
        match self {
            NextAction::Specify => "/specify",
            NextAction::Plan => "/plan",
            NextAction::Tasks => "/tasks",
            NextAction::Implement => "/implement",
        }
    }

    /// Derives the next action from marker-file presence.
    ///
    /// Precedence is strict: a missing spec always wins, regardless of
    /// whether plan or tasks files exist.
    pub fn derive(has_spec: bool, has_plan: bool, has_tasks: bool) -> Self {
        if !has_spec {
            NextAction::Specify
        } else if !has_plan {
            NextAction::Plan
        } else if !has_tasks {
            NextAction::Tasks
        } else {
            NextAction::Implement
        }
    }
}

/// Artifact presence for one feature directory under `specs/`
#[derive(Debug, Clone, Serialize)]
pub struct FeatureStatus {
    pub name: String,
    pub has_spec: bool,
    pub has_plan: bool,
    pub has_tasks: bool,
    pub next_action: NextAction,
}

impl FeatureStatus {
    pub fn new(name: String, has_spec: bool, has_plan: bool, has_tasks: bool) -> Self {
        let next_action = NextAction::derive(has_spec, has_plan, has_tasks);
        Self {
            name,
            has_spec,
            has_plan,
            has_tasks,
            next_action,
        }
    }

    /// True when spec, plan and tasks are all present
    pub fn is_ready(&self) -> bool {
        self.has_spec && self.has_plan && self.has_tasks
    }
}

/// Single top-priority follow-up, by fixed precedence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum Suggestion {
    /// No constitution file yet
    RecordConstitution,
    /// No feature directories exist at all
    StartFirstFeature,
    /// Features exist whose spec file is missing
    FinishSpecDrafts(Vec<String>),
    /// Features with a spec but no plan
    PlanFeatures(Vec<String>),
    /// Features with a plan but no tasks
    TaskFeatures(Vec<String>),
    /// At least one feature has all three artifacts
    Implement(Vec<String>),
    /// Everything in place
    AllReady,
}

impl Suggestion {
    /// One-line human-readable form
    pub fn message(&self) -> String {
        match self {
            Suggestion::RecordConstitution => {
                "Run /constitution to record your project principles".to_string()
            }
            Suggestion::StartFirstFeature => {
                "Run /specify to start your first feature".to_string()
            }
            Suggestion::FinishSpecDrafts(names) => {
                format!("Finish spec drafts with /specify: {}", names.join(", "))
            }
            Suggestion::PlanFeatures(names) => {
                format!("Run /plan for: {}", names.join(", "))
            }
            Suggestion::TaskFeatures(names) => {
                format!("Run /tasks for: {}", names.join(", "))
            }
            Suggestion::Implement(names) => {
                format!("Ready to /implement: {}", names.join(", "))
            }
            Suggestion::AllReady => "All workflow artifacts are in place".to_string(),
        }
    }
}

/// Derived workflow completion summary for a project
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub is_project: bool,
    pub has_constitution: bool,
    pub features: Vec<FeatureStatus>,
    pub specs_present: usize,
    pub plans_present: usize,
    pub tasks_present: usize,
    /// Features with a spec but no plan, in directory order
    pub waiting_on_plan: Vec<String>,
    /// Features with a plan but no tasks, in directory order
    pub waiting_on_tasks: Vec<String>,
    /// Features whose spec file is missing entirely, in directory order
    pub missing_spec: Vec<String>,
    pub suggestion: Suggestion,
}

impl StatusReport {
    /// Scans the directory tree at `root` and derives the report.
    ///
    /// Read-only: only existence checks, no files are created or modified.
    pub fn scan(root: &Path) -> Result<Self> {
        let is_project = root.join(MARKER_DIR).is_dir();
        let has_constitution = root.join(CONSTITUTION_PATH).is_file();

        let mut features = Vec::new();
        let specs_dir = root.join(SPECS_DIR);
        if specs_dir.is_dir() {
            let mut entries: Vec<_> = fs::read_dir(&specs_dir)
                .with_context(|| format!("Failed to read {}", specs_dir.display()))?
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_dir())
                .collect();
            entries.sort_by_key(|e| e.file_name());

            for entry in entries {
                let dir = entry.path();
                let name = entry.file_name().to_string_lossy().to_string();
                features.push(FeatureStatus::new(
                    name,
                    dir.join("spec.md").is_file(),
                    dir.join("plan.md").is_file(),
                    dir.join("tasks.md").is_file(),
                ));
            }
        }

        Ok(Self::derive(is_project, has_constitution, features))
    }

    /// Derives counts, waiting lists and the top suggestion from the
    /// per-feature presence data. Pure; exercised directly in tests.
    pub fn derive(
        is_project: bool,
        has_constitution: bool,
        features: Vec<FeatureStatus>,
    ) -> Self {
        let specs_present = features.iter().filter(|f| f.has_spec).count();
        let plans_present = features.iter().filter(|f| f.has_plan).count();
        let tasks_present = features.iter().filter(|f| f.has_tasks).count();

        let missing_spec: Vec<String> = features
            .iter()
            .filter(|f| !f.has_spec)
            .map(|f| f.name.clone())
            .collect();
        let waiting_on_plan: Vec<String> = features
            .iter()
            .filter(|f| f.has_spec && !f.has_plan)
            .map(|f| f.name.clone())
            .collect();
        let waiting_on_tasks: Vec<String> = features
            .iter()
            .filter(|f| f.has_spec && f.has_plan && !f.has_tasks)
            .map(|f| f.name.clone())
            .collect();
        let ready: Vec<String> = features
            .iter()
            .filter(|f| f.is_ready())
            .map(|f| f.name.clone())
            .collect();

        let suggestion = if !has_constitution {
            Suggestion::RecordConstitution
        } else if features.is_empty() {
            Suggestion::StartFirstFeature
        } else if !missing_spec.is_empty() {
            Suggestion::FinishSpecDrafts(missing_spec.clone())
        } else if !waiting_on_plan.is_empty() {
            Suggestion::PlanFeatures(waiting_on_plan.clone())
        } else if !waiting_on_tasks.is_empty() {
            Suggestion::TaskFeatures(waiting_on_tasks.clone())
        } else if !ready.is_empty() {
            Suggestion::Implement(ready)
        } else {
            Suggestion::AllReady
        };

        Self {
            is_project,
            has_constitution,
            features,
            specs_present,
            plans_present,
            tasks_present,
            waiting_on_plan,
            waiting_on_tasks,
            missing_spec,
            suggestion,
        }
    }
}
