//! Prompt-testing playground state for one agent.
//!
//! A run is begun synchronously (it becomes "in flight") and finished later by
//! whoever executes it. The session only records outcomes; it never waits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::unix_seconds_now;

/// Default number of results kept per session.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// A `{{key}}` placeholder binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

/// Substitute variables into `template`. For every variable with a non-empty
/// key and value, the first `{{key}}` occurrence is replaced.
pub fn render_prompt(template: &str, variables: &[Variable]) -> String {
    let mut prompt = template.to_string();
    for var in variables {
        if var.key.is_empty() || var.value.is_empty() {
            continue;
        }
        let placeholder = format!("{{{{{}}}}}", var.key);
        prompt = prompt.replacen(&placeholder, &var.value, 1);
    }
    prompt
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunOutcome {
    Success,
    Error,
}

/// A finished playground run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: Uuid,
    pub prompt: String,
    pub response: String,
    pub completed_at: u64,
    pub status: RunOutcome,
    pub response_time_secs: f64,
    pub cost: f64,
}

impl TestResult {
    /// The canned answer the simulated model gives for `run`.
    pub fn simulated(run: &PendingRun, response_time_secs: f64, cost: f64) -> Self {
        Self {
            id: run.id,
            prompt: run.prompt.clone(),
            response: format!("Mock response for: {}", run.prompt),
            completed_at: unix_seconds_now(),
            status: RunOutcome::Success,
            response_time_secs,
            cost,
        }
    }
}

/// A run that has been started but not finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingRun {
    pub id: Uuid,
    pub prompt: String,
}

/// Editable fields of a session; absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaygroundEdit {
    pub system_prompt: Option<String>,
    pub user_prompt: Option<String>,
    pub model: Option<String>,
    pub variables: Option<Vec<Variable>>,
}

/// Playground state for one agent.
#[derive(Debug, Clone)]
pub struct PlaygroundSession {
    agent_id: String,
    system_prompt: String,
    user_prompt: String,
    model: String,
    variables: Vec<Variable>,
    /// Newest first.
    history: Vec<TestResult>,
    in_flight: Vec<PendingRun>,
    history_limit: usize,
}

/// Serializable snapshot of a session.
#[derive(Debug, Clone, Serialize)]
pub struct PlaygroundView {
    pub agent_id: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub model: String,
    pub variables: Vec<Variable>,
    pub rendered_prompt: String,
    pub running: bool,
    pub in_flight: Vec<PendingRun>,
    pub history: Vec<TestResult>,
}

impl PlaygroundSession {
    pub fn new(
        agent_id: impl Into<String>,
        model: impl Into<String>,
        history_limit: usize,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            system_prompt: "You are an expert in geography".to_string(),
            user_prompt: "What is the capital of {{country}}?".to_string(),
            model: model.into(),
            variables: vec![Variable {
                key: "country".to_string(),
                value: "India".to_string(),
            }],
            history: vec![TestResult {
                id: Uuid::new_v4(),
                prompt: "What is the capital of India?".to_string(),
                response: "The capital of India is New Delhi.".to_string(),
                completed_at: unix_seconds_now(),
                status: RunOutcome::Success,
                response_time_secs: 1.67,
                cost: 0.000052,
            }],
            in_flight: Vec::new(),
            history_limit: history_limit.max(1),
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn history(&self) -> &[TestResult] {
        &self.history
    }

    pub fn is_running(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn in_flight(&self) -> &[PendingRun] {
        &self.in_flight
    }

    pub fn rendered_prompt(&self) -> String {
        render_prompt(&self.user_prompt, &self.variables)
    }

    pub fn edit(&mut self, edit: PlaygroundEdit) {
        if let Some(system_prompt) = edit.system_prompt {
            self.system_prompt = system_prompt;
        }
        if let Some(user_prompt) = edit.user_prompt {
            self.user_prompt = user_prompt;
        }
        if let Some(model) = edit.model {
            self.model = model;
        }
        if let Some(variables) = edit.variables {
            self.variables = variables;
        }
    }

    /// Render the current prompt and mark a new run in flight.
    pub fn begin_run(&mut self) -> PendingRun {
        let run = PendingRun {
            id: Uuid::new_v4(),
            prompt: self.rendered_prompt(),
        };
        self.in_flight.push(run.clone());
        run
    }

    /// Record a finished run at the head of the history. Results for runs
    /// that are no longer in flight (cancelled) are discarded; returns
    /// whether the result was recorded.
    pub fn complete_run(&mut self, result: TestResult) -> bool {
        let Some(pos) = self.in_flight.iter().position(|r| r.id == result.id) else {
            return false;
        };
        self.in_flight.remove(pos);
        self.history.insert(0, result);
        self.history.truncate(self.history_limit);
        true
    }

    /// Drop an in-flight run. Returns false if it was not in flight.
    pub fn cancel_run(&mut self, run_id: Uuid) -> bool {
        let before = self.in_flight.len();
        self.in_flight.retain(|r| r.id != run_id);
        self.in_flight.len() != before
    }

    pub fn snapshot(&self) -> PlaygroundView {
        PlaygroundView {
            agent_id: self.agent_id.clone(),
            system_prompt: self.system_prompt.clone(),
            user_prompt: self.user_prompt.clone(),
            model: self.model.clone(),
            variables: self.variables.clone(),
            rendered_prompt: self.rendered_prompt(),
            running: self.is_running(),
            in_flight: self.in_flight.clone(),
            history: self.history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(key: &str, value: &str) -> Variable {
        Variable {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    fn session() -> PlaygroundSession {
        PlaygroundSession::new("1", "gpt-3.5-turbo", DEFAULT_HISTORY_LIMIT)
    }

    #[test]
    fn render_substitutes_variables() {
        let prompt = render_prompt(
            "What is the capital of {{country}}?",
            &[var("country", "India")],
        );
        assert_eq!(prompt, "What is the capital of India?");
    }

    #[test]
    fn render_skips_blank_bindings() {
        let template = "{{a}} and {{b}}";
        assert_eq!(render_prompt(template, &[var("", "x"), var("b", "")]), template);
    }

    #[test]
    fn render_replaces_first_occurrence_only() {
        assert_eq!(render_prompt("{{x}} {{x}}", &[var("x", "1")]), "1 {{x}}");
    }

    #[test]
    fn new_session_has_seed_result() {
        let s = session();
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history()[0].response, "The capital of India is New Delhi.");
        assert!(!s.is_running());
    }

    #[test]
    fn begin_marks_in_flight() {
        let mut s = session();
        let run = s.begin_run();
        assert_eq!(run.prompt, "What is the capital of India?");
        assert!(s.is_running());
    }

    #[test]
    fn completion_inserts_at_head() {
        let mut s = session();
        let run = s.begin_run();
        assert!(s.complete_run(TestResult::simulated(&run, 1.0, 0.0005)));
        assert!(!s.is_running());
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.history()[0].response, "Mock response for: What is the capital of India?");
    }

    #[test]
    fn overlapping_runs_land_in_completion_order() {
        let mut s = session();
        s.edit(PlaygroundEdit {
            variables: Some(vec![var("country", "France")]),
            ..PlaygroundEdit::default()
        });
        let first = s.begin_run();
        s.edit(PlaygroundEdit {
            variables: Some(vec![var("country", "Japan")]),
            ..PlaygroundEdit::default()
        });
        let second = s.begin_run();

        assert!(s.complete_run(TestResult::simulated(&second, 0.5, 0.0)));
        assert!(s.is_running());
        assert!(s.complete_run(TestResult::simulated(&first, 2.5, 0.0)));

        assert_eq!(s.history()[0].prompt, "What is the capital of France?");
        assert_eq!(s.history()[1].prompt, "What is the capital of Japan?");
    }

    #[test]
    fn cancelled_run_is_never_recorded() {
        let mut s = session();
        let run = s.begin_run();
        assert!(s.cancel_run(run.id));
        assert!(!s.cancel_run(run.id));
        assert!(!s.complete_run(TestResult::simulated(&run, 1.0, 0.0)));
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn history_is_capped() {
        let mut s = PlaygroundSession::new("1", "gpt-4", 3);
        for _ in 0..5 {
            let run = s.begin_run();
            s.complete_run(TestResult::simulated(&run, 0.1, 0.0));
        }
        assert_eq!(s.history().len(), 3);
    }

    #[test]
    fn edit_keeps_absent_fields() {
        let mut s = session();
        s.edit(PlaygroundEdit {
            model: Some("claude-3".to_string()),
            ..PlaygroundEdit::default()
        });
        let view = s.snapshot();
        assert_eq!(view.model, "claude-3");
        assert_eq!(view.system_prompt, "You are an expert in geography");
    }
}
