use super::outcome::{AnswerOutcome, AnswerSource};
use super::summarize::summarize_text;
use super::truncate_chars;
use crate::infrastructure::search::SearchHit;
use chrono::Local;

const MAX_SOURCES: usize = 5;
const SOURCE_SNIPPET_CHARS: usize = 100;
const ANSWER_SUMMARY_CHARS: usize = 300;

/// Build an answer from the top search results that carry a snippet.
pub fn compose_answer(question: &str, results: &[SearchHit], current_date: &str) -> AnswerOutcome {
    if results.is_empty() {
        return AnswerOutcome::failed(question, "No search results provided");
    }

    let mut snippets = Vec::new();
    let mut sources = Vec::new();
    for hit in results.iter().take(MAX_SOURCES) {
        if hit.snippet.is_empty() {
            continue;
        }
        snippets.push(hit.snippet.as_str());
        sources.push(AnswerSource {
            title: if hit.title.is_empty() {
                "Unknown".to_string()
            } else {
                hit.title.clone()
            },
            link: hit.link.clone(),
            snippet: preview(&hit.snippet, SOURCE_SNIPPET_CHARS),
        });
    }

    let combined = snippets.join(" ");
    let answer = if combined.trim().is_empty() {
        "No detailed information was found to answer this question.".to_string()
    } else {
        let summary = summarize_text(&combined, ANSWER_SUMMARY_CHARS);
        if summary.success {
            format!(
                "Based on search results (updated {current_date}): {}",
                summary.summary
            )
        } else {
            format!(
                "Based on search results: {}...",
                truncate_chars(&combined, ANSWER_SUMMARY_CHARS)
            )
        }
    };

    AnswerOutcome {
        success: true,
        question: question.to_string(),
        answer,
        total_sources: sources.len(),
        sources,
        current_date: current_date.to_string(),
        error: None,
        timestamp: Local::now(),
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", truncate_chars(text, max_chars))
    } else {
        text.to_string()
    }
}
