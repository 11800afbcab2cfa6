//! Optional stage run after each unfinished reasoning pass.
//!
//! A [`Preprocessor`] inspects the raw user input and may compute an extra
//! result that the agent stores under [`ADVANCED_RESULT_KEY`] for the next
//! reasoning call.
//!
//! [`ADVANCED_RESULT_KEY`]: crate::constants::ADVANCED_RESULT_KEY

mod keyword;

use crate::application::agent::IntermediateResults;
use crate::application::tooling::{ActionOutput, ToolInvokeError};
use async_trait::async_trait;

pub use keyword::KeywordPreprocessor;

#[async_trait]
pub trait Preprocessor: Send + Sync {
    /// `Ok(None)` when the input needs no extra processing.
    async fn process(
        &self,
        user_input: &str,
        intermediate: &IntermediateResults,
    ) -> Result<Option<ActionOutput>, ToolInvokeError>;
}
