use super::outcome::SummaryOutcome;
use super::truncate_chars;
use crate::infrastructure::model::{ModelProvider, ModelRequest};
use crate::types::ChatMessage;
use std::sync::Arc;
use tracing::{debug, warn};

const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Extractive summary: short texts are kept whole, longer ones reduced to
/// their first two and last sentence, then clipped to `max_length` chars.
pub fn summarize_text(text: &str, max_length: usize) -> SummaryOutcome {
    if text.trim().is_empty() {
        return SummaryOutcome::failed("Empty text provided");
    }

    let sentences: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect();

    let summary = if sentences.len() <= 3 {
        text.to_string()
    } else {
        let mut picked = sentences[..2].to_vec();
        picked.push(sentences[sentences.len() - 1]);
        format!("{}.", picked.join(". "))
    };

    SummaryOutcome::new(text, clip(&summary, max_length))
}

fn clip(summary: &str, max_length: usize) -> String {
    if summary.chars().count() > max_length {
        format!("{}...", truncate_chars(summary, max_length))
    } else {
        summary.to_string()
    }
}

/// Summarises with a language model, falling back to [`summarize_text`].
#[derive(Clone)]
pub struct ModelSummarizer {
    provider: Arc<dyn ModelProvider>,
    provider_id: String,
    model: String,
}

impl ModelSummarizer {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        provider_id: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            provider_id: provider_id.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn summarize(&self, text: &str, max_length: usize) -> SummaryOutcome {
        if text.trim().is_empty() {
            return SummaryOutcome::failed("Empty text provided");
        }

        let prompt = format!(
            "Summarize the following text in at most {max_length} characters. \
             Keep the language of the text and reply with the summary only.\n\n{text}"
        );
        let request = ModelRequest::new(
            self.provider_id.clone(),
            self.model.clone(),
            vec![ChatMessage::user(prompt)],
        )
        .with_sampling(SUMMARY_TEMPERATURE, max_length.max(64) as u32);

        match self.provider.chat(request).await {
            Ok(response) => {
                let summary = response.content().trim();
                if summary.is_empty() {
                    warn!(model = %self.model, "Model returned an empty summary, using extractive summary");
                    return summarize_text(text, max_length);
                }
                debug!(model = %self.model, chars = summary.chars().count(), "Model summary produced");
                SummaryOutcome::new(text, clip(summary, max_length)).with_model(&self.model)
            }
            Err(err) => {
                warn!(model = %self.model, error = %err, "Model summarization failed, using extractive summary");
                summarize_text(text, max_length)
            }
        }
    }
}
