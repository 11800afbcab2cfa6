use astrolabe_core::agent::{AgentOutcome, AgentStatus};
use chrono::{DateTime, Local};
use std::path::PathBuf;

const SEPARATOR_WIDTH: usize = 80;
const REPORT_STEPS: usize = 6;
const REPORT_STEP_CHARS: usize = 150;
const VERDICT_ANSWER_CHARS: usize = 150;

/// Default file name for a saved result, e.g. `agent_result_20250101_093000.json`.
pub fn default_result_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("agent_result_{}.json", now.format("%Y%m%d_%H%M%S")))
}

pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// Human-readable summary of a run.
pub fn render_outcome(outcome: &AgentOutcome) -> String {
    let mut lines = vec![
        separator(),
        "ASTROLABE SEARCH AGENT RESULT".to_string(),
        separator(),
    ];

    if !outcome.success {
        lines.push("Status: ERROR".to_string());
        let error = outcome.error.as_deref().unwrap_or("unknown error");
        lines.push(format!("Error: {error}"));
        lines.push(format!("Execution Time: {:.2}s", outcome.execution_time));
        return lines.join("\n");
    }

    let status = outcome.status.as_str().to_uppercase();
    lines.push(format!("Status: {status}"));
    lines.push(format!("Execution Time: {:.2}s", outcome.execution_time));
    lines.push(format!("Total Iterations: {}", outcome.total_iterations));
    lines.push(String::new());
    lines.push("USER INPUT:".to_string());
    lines.push(format!("   {}", outcome.user_input));
    lines.push(String::new());
    lines.push("FINAL ANSWER:".to_string());
    lines.push(format!("   {}", outcome.final_answer));
    lines.push(String::new());

    if !outcome.history.is_empty() {
        lines.push("REASONING PROCESS:".to_string());
        let start = outcome.history.len().saturating_sub(REPORT_STEPS);
        for (index, step) in outcome.history[start..].iter().enumerate() {
            lines.push(format!(
                "   {}. [{}] {}",
                index + 1,
                step.kind.label(),
                clip(&step.content, REPORT_STEP_CHARS)
            ));
        }
        lines.push(String::new());
    }

    if !outcome.intermediate_results.is_empty() {
        lines.push("TOOLS USED:".to_string());
        for (key, output) in &outcome.intermediate_results {
            let mark = if output.success() { "ok  " } else { "fail" };
            lines.push(format!("   [{mark}] {key} ({})", output.kind()));
        }
        lines.push(String::new());
    }

    if outcome.status == AgentStatus::MaxIterationsReached {
        lines.push("Note: the iteration budget ran out before an answer was found.".to_string());
    }

    lines.join("\n")
}

/// One-line verdict used by test mode.
pub fn render_verdict(outcome: &AgentOutcome) -> String {
    if outcome.success {
        format!(
            "SUCCESS ({:.1}s, {} iterations) {}",
            outcome.execution_time,
            outcome.total_iterations,
            clip(&outcome.final_answer, VERDICT_ANSWER_CHARS)
        )
    } else {
        let error = outcome.error.as_deref().unwrap_or("unknown error");
        format!("FAILED: {error}")
    }
}

fn clip(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}
