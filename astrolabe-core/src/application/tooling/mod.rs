//! The five actions the reasoning loop can invoke.
//!
//! Model output arrives as an [`ActionRequest`] (a name plus JSON
//! parameters) and is resolved into the closed [`Action`] enum before a
//! [`Toolkit`] runs it. Every action produces a structured record carrying
//! its own `success` flag, collected in [`ActionOutput`].

mod action;
mod answer;
mod error;
mod outcome;
mod summarize;
mod toolkit;

pub use action::{Action, ActionKind, ActionRequest};
pub use answer::compose_answer;
pub use error::{ToolError, ToolInvokeError};
pub use outcome::{
    ActionOutput, AnswerOutcome, AnswerSource, NoOpOutcome, SearchOutcome, SummaryOutcome,
    WeatherOutcome, WeatherReport,
};
pub use summarize::{ModelSummarizer, summarize_text};
pub use toolkit::{Toolkit, WebToolkit};

/// Truncate to at most `max_chars` characters without splitting a code point.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

pub(crate) fn current_date() -> String {
    chrono::Local::now()
        .format(crate::constants::CURRENT_DATE_FORMAT)
        .to_string()
}
