use crate::application::tooling::ActionOutput;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Tool outputs keyed by `action_{iteration}` or the pre-processing key.
pub type IntermediateResults = BTreeMap<String, ActionOutput>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Initialized,
    Started,
    Thinking,
    Acting,
    Observing,
    Finished,
    Error,
    MaxIterationsReached,
}

impl AgentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentStatus::Initialized => "initialized",
            AgentStatus::Started => "started",
            AgentStatus::Thinking => "thinking",
            AgentStatus::Acting => "acting",
            AgentStatus::Observing => "observing",
            AgentStatus::Finished => "finished",
            AgentStatus::Error => "error",
            AgentStatus::MaxIterationsReached => "max_iterations_reached",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Thought,
    Action,
    Observation,
}

impl StepKind {
    pub fn label(self) -> &'static str {
        match self {
            StepKind::Thought => "THOUGHT",
            StepKind::Action => "ACTION",
            StepKind::Observation => "OBSERVATION",
        }
    }
}

/// One appended history entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryStep {
    pub iteration: u32,
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub content: String,
    pub timestamp: DateTime<Local>,
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSummary {
    pub user_input: String,
    pub total_iterations: u32,
    pub final_answer: String,
    pub execution_time: f64,
    pub status: AgentStatus,
    pub finished: bool,
    pub error: Option<String>,
    pub total_steps: usize,
}

/// Mutable bookkeeping for a single agent run.
///
/// The iteration counter only moves through [`AgentState::advance`], which
/// refuses to step past the budget or out of a terminal state. History is
/// append-only.
#[derive(Debug)]
pub struct AgentState {
    iteration: u32,
    max_iterations: u32,
    user_input: String,
    history: Vec<HistoryStep>,
    intermediate_results: IntermediateResults,
    final_answer: String,
    finished: bool,
    status: AgentStatus,
    error: Option<String>,
    started_at: DateTime<Local>,
    clock: Instant,
}

impl AgentState {
    pub fn new(user_input: impl Into<String>, max_iterations: u32) -> Self {
        Self {
            iteration: 0,
            max_iterations,
            user_input: user_input.into(),
            history: Vec::new(),
            intermediate_results: IntermediateResults::new(),
            final_answer: String::new(),
            finished: false,
            status: AgentStatus::Initialized,
            error: None,
            started_at: Local::now(),
            clock: Instant::now(),
        }
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn history(&self) -> &[HistoryStep] {
        &self.history
    }

    pub fn intermediate_results(&self) -> &IntermediateResults {
        &self.intermediate_results
    }

    pub fn final_answer(&self) -> &str {
        &self.final_answer
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn set_status(&mut self, status: AgentStatus) {
        self.status = status;
    }

    pub fn is_max_iterations_reached(&self) -> bool {
        self.iteration >= self.max_iterations
    }

    /// Start the next pass. Returns the new iteration number, or `None` when
    /// the run is over or the budget is spent.
    pub fn advance(&mut self) -> Option<u32> {
        if self.finished || self.status == AgentStatus::Error || self.is_max_iterations_reached() {
            return None;
        }
        self.iteration += 1;
        Some(self.iteration)
    }

    pub fn record(
        &mut self,
        kind: StepKind,
        content: impl Into<String>,
        metadata: Option<Map<String, Value>>,
    ) {
        self.history.push(HistoryStep {
            iteration: self.iteration,
            kind,
            content: content.into(),
            timestamp: Local::now(),
            metadata: metadata.unwrap_or_default(),
        });
    }

    /// The original input followed by the last `max_steps` history entries.
    pub fn conversation_context(&self, max_steps: usize) -> String {
        let start = self.history.len().saturating_sub(max_steps);
        let mut context = format!("User Input: {}\n\nRecent History:\n", self.user_input);
        for step in &self.history[start..] {
            context.push_str(&format!("[{}] {}\n", step.kind.label(), step.content));
        }
        context
    }

    pub fn store_result(&mut self, key: impl Into<String>, output: ActionOutput) {
        self.intermediate_results.insert(key.into(), output);
    }

    pub fn finish(&mut self, answer: impl Into<String>) {
        self.final_answer = answer.into();
        self.finished = true;
        self.status = AgentStatus::Finished;
    }

    /// Replace the final answer of a finished run.
    pub fn refine_answer(&mut self, answer: impl Into<String>) {
        if self.finished {
            self.final_answer = answer.into();
        }
    }

    /// Close an unfinished run whose budget is spent.
    pub fn exhaust(&mut self, answer: impl Into<String>) {
        self.final_answer = answer.into();
        self.finished = true;
        self.status = AgentStatus::MaxIterationsReached;
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = AgentStatus::Error;
        self.error = Some(error.into());
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Seconds since the state was created.
    pub fn execution_time(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    pub fn summary(&self) -> StateSummary {
        StateSummary {
            user_input: self.user_input.clone(),
            total_iterations: self.iteration,
            final_answer: self.final_answer.clone(),
            execution_time: self.execution_time(),
            status: self.status,
            finished: self.finished,
            error: self.error.clone(),
            total_steps: self.history.len(),
        }
    }

    pub(crate) fn into_parts(self) -> StateParts {
        let summary = self.summary();
        StateParts {
            user_input: self.user_input,
            final_answer: self.final_answer,
            iteration: self.iteration,
            execution_time: summary.execution_time,
            status: self.status,
            error: self.error,
            history: self.history,
            intermediate_results: self.intermediate_results,
            summary,
        }
    }
}

pub(crate) struct StateParts {
    pub user_input: String,
    pub final_answer: String,
    pub iteration: u32,
    pub execution_time: f64,
    pub status: AgentStatus,
    pub error: Option<String>,
    pub history: Vec<HistoryStep>,
    pub intermediate_results: IntermediateResults,
    pub summary: StateSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::tooling::NoOpOutcome;

    #[test]
    fn new_state_is_initialized() {
        let state = AgentState::new("hello", 3);
        assert_eq!(state.status(), AgentStatus::Initialized);
        assert_eq!(state.iteration(), 0);
        assert!(!state.is_finished());
        assert!(state.history().is_empty());
    }

    #[test]
    fn advance_stops_at_budget() {
        let mut state = AgentState::new("hello", 2);
        assert_eq!(state.advance(), Some(1));
        assert_eq!(state.advance(), Some(2));
        assert!(state.is_max_iterations_reached());
        assert_eq!(state.advance(), None);
        assert_eq!(state.iteration(), 2);
    }

    #[test]
    fn advance_refuses_after_finish_or_error() {
        let mut state = AgentState::new("hello", 5);
        state.advance();
        state.finish("done");
        assert_eq!(state.advance(), None);

        let mut state = AgentState::new("hello", 5);
        state.advance();
        state.fail("boom");
        assert_eq!(state.advance(), None);
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn record_stamps_current_iteration() {
        let mut state = AgentState::new("hello", 5);
        state.advance();
        state.record(StepKind::Thought, "think", None);
        state.advance();
        state.record(StepKind::Action, "act", None);

        let iterations: Vec<_> = state.history().iter().map(|s| s.iteration).collect();
        assert_eq!(iterations, vec![1, 2]);
        assert!(state.history()[0].metadata.is_empty());
    }

    #[test]
    fn context_keeps_last_steps() {
        let mut state = AgentState::new("weather in Hanoi", 5);
        state.advance();
        for i in 0..4 {
            state.record(StepKind::Thought, format!("t{i}"), None);
        }
        state.record(StepKind::Observation, "seen", None);

        let context = state.conversation_context(2);
        assert_eq!(
            context,
            "User Input: weather in Hanoi\n\nRecent History:\n[THOUGHT] t3\n[OBSERVATION] seen\n"
        );
    }

    #[test]
    fn exhaust_marks_finished() {
        let mut state = AgentState::new("hello", 1);
        state.advance();
        state.exhaust("sorry");
        assert!(state.is_finished());
        assert_eq!(state.status(), AgentStatus::MaxIterationsReached);
        assert_eq!(state.final_answer(), "sorry");
    }

    #[test]
    fn refine_only_applies_to_finished_runs() {
        let mut state = AgentState::new("hello", 1);
        state.refine_answer("ignored");
        assert_eq!(state.final_answer(), "");
        state.finish("draft");
        state.refine_answer("polished");
        assert_eq!(state.final_answer(), "polished");
    }

    #[test]
    fn summary_reflects_state() {
        let mut state = AgentState::new("hello", 4);
        state.advance();
        state.record(StepKind::Thought, "t", None);
        state.store_result("action_1", ActionOutput::NoOp(NoOpOutcome::new()));
        state.finish("bye");

        let summary = state.summary();
        assert_eq!(summary.total_iterations, 1);
        assert_eq!(summary.total_steps, 1);
        assert_eq!(summary.status, AgentStatus::Finished);
        assert!(summary.finished);
        assert!(summary.execution_time >= 0.0);
        assert_eq!(state.intermediate_results().len(), 1);
    }

    #[test]
    fn status_serializes_snake_case() {
        let value = serde_json::to_value(AgentStatus::MaxIterationsReached).expect("serialize");
        assert_eq!(value, "max_iterations_reached");
        assert_eq!(
            AgentStatus::MaxIterationsReached.to_string(),
            "max_iterations_reached"
        );
    }
}
