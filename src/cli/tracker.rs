//! Hierarchical step tracking for multi-stage commands
//!
//! Tracks labeled steps through pending/running/done/error/skipped states
//! and renders them as an indented tree. An optional callback fires
//! synchronously after every mutation so a caller can re-render as the
//! pipeline advances.

use std::fmt::Write as _;

/// State of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Running,
    Done,
    Error,
    Skipped,
}

impl StepStatus {
    fn symbol(&self) -> &'static str {
        match self {
            StepStatus::Pending => "○",
            StepStatus::Running => "◐",
            StepStatus::Done => "●",
            StepStatus::Error => "✗",
            StepStatus::Skipped => "-",
        }
    }
}

struct Step {
    key: String,
    label: String,
    status: StepStatus,
    detail: String,
}

/// Ordered collection of tracked steps
pub struct StepTracker {
    title: String,
    steps: Vec<Step>,
    refresh: Option<Box<dyn Fn(&StepTracker)>>,
}

impl StepTracker {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            steps: Vec::new(),
            refresh: None,
        }
    }

    /// Attaches a callback invoked synchronously after each mutation
    pub fn attach_refresh(&mut self, callback: Box<dyn Fn(&StepTracker)>) {
        self.refresh = Some(callback);
    }

    /// Registers a pending step; duplicate keys are ignored
    pub fn add(&mut self, key: &str, label: &str) {
        if self.steps.iter().any(|s| s.key == key) {
            return;
        }
        self.steps.push(Step {
            key: key.to_string(),
            label: label.to_string(),
            status: StepStatus::Pending,
            detail: String::new(),
        });
        self.maybe_refresh();
    }

    pub fn start(&mut self, key: &str, detail: &str) {
        self.update(key, StepStatus::Running, detail);
    }

    pub fn complete(&mut self, key: &str, detail: &str) {
        self.update(key, StepStatus::Done, detail);
    }

    pub fn error(&mut self, key: &str, detail: &str) {
        self.update(key, StepStatus::Error, detail);
    }

    pub fn skip(&mut self, key: &str, detail: &str) {
        self.update(key, StepStatus::Skipped, detail);
    }

    /// Updates a step, registering it first if the key is unknown
    fn update(&mut self, key: &str, status: StepStatus, detail: &str) {
        match self.steps.iter_mut().find(|s| s.key == key) {
            Some(step) => {
                step.status = status;
                if !detail.is_empty() {
                    step.detail = detail.to_string();
                }
            }
            None => self.steps.push(Step {
                key: key.to_string(),
                label: key.to_string(),
                status,
                detail: detail.to_string(),
            }),
        }
        self.maybe_refresh();
    }

    fn maybe_refresh(&self) {
        if let Some(callback) = &self.refresh {
            callback(self);
        }
    }

    /// True when any step errored
    pub fn has_errors(&self) -> bool {
        self.steps.iter().any(|s| s.status == StepStatus::Error)
    }

    /// Renders the tree as plain text
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        for step in &self.steps {
            let _ = write!(out, "  {} {}", step.status.symbol(), step.label);
            if !step.detail.is_empty() {
                let _ = write!(out, " ({})", step.detail);
            }
            let _ = writeln!(out);
        }
        out
    }
}
