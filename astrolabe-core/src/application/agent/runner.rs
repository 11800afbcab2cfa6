use super::directive::Decision;
use super::errors::AgentError;
use super::models::{AgentOptions, AgentOutcome};
use super::observation::format_observation;
use super::runtime::ActionRuntime;
use super::state::{AgentState, AgentStatus, StepKind};
use crate::application::preprocess::Preprocessor;
use crate::application::tooling::{ActionOutput, ActionRequest, Toolkit, current_date};
use crate::constants::ADVANCED_RESULT_KEY;
use crate::model::{ModelProvider, ModelRequest};
use crate::types::ChatMessage;
use serde_json::Map;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

/// Final answer when an answer action could not use its search results.
pub const ANSWER_NOT_FOUND: &str = "Could not find information to answer the question.";

/// Final answer when the iteration budget runs out.
pub const MAX_ITERATIONS_ANSWER: &str =
    "Reached the maximum number of attempts. Unable to complete the request.";

/// ReAct loop: reason, act, observe until the model stops, an answer action
/// runs, or the iteration budget is spent.
pub struct Agent<P: ModelProvider> {
    provider: Arc<P>,
    runtime: ActionRuntime,
    preprocessor: Option<Box<dyn Preprocessor>>,
    options: AgentOptions,
}

impl<P: ModelProvider> Agent<P> {
    pub fn new(provider: Arc<P>, toolkit: Arc<dyn Toolkit>, options: AgentOptions) -> Self {
        Self {
            provider,
            runtime: ActionRuntime::new(toolkit),
            preprocessor: None,
            options,
        }
    }

    pub fn with_preprocessor(mut self, preprocessor: Box<dyn Preprocessor>) -> Self {
        self.preprocessor = Some(preprocessor);
        self
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Run the loop for one input. Failures are reported through the
    /// outcome's `success`, `status` and `error` fields.
    pub async fn run(&self, user_input: &str) -> AgentOutcome {
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("agent_run", run_id = %run_id);

        async {
            let mut state = AgentState::new(user_input, self.options.max_iterations);
            state.set_status(AgentStatus::Started);
            info!(
                input = user_input,
                max_iterations = self.options.max_iterations,
                "Agent run started"
            );

            if let Err(err) = self.drive(&mut state).await {
                error!(iteration = state.iteration(), error = %err, "Agent run failed");
                state.fail(err.to_string());
            }

            if !state.is_finished()
                && state.status() != AgentStatus::Error
                && state.is_max_iterations_reached()
            {
                warn!(
                    iterations = state.iteration(),
                    "Iteration budget exhausted without an answer"
                );
                state.exhaust(MAX_ITERATIONS_ANSWER);
            }

            if self.options.refine_final_answer
                && state.status() == AgentStatus::Finished
                && !state.final_answer().is_empty()
            {
                self.refine_final_answer(&mut state).await;
            }

            info!(
                iterations = state.iteration(),
                status = %state.status(),
                elapsed_ms = state.elapsed().as_millis() as u64,
                "Agent run completed"
            );
            AgentOutcome::from_state(run_id.clone(), state)
        }
        .instrument(span)
        .await
    }

    async fn drive(&self, state: &mut AgentState) -> Result<(), AgentError> {
        let mut advanced_filled = false;

        while let Some(iteration) = state.advance() {
            info!(iteration, "Starting iteration");

            let decision = self.reasoning_step(state).await?;
            if !decision.should_continue {
                info!(iteration, "Model signalled completion");
                state.finish(decision.final_answer);
                break;
            }

            if let Some(request) = decision.action.as_ref() {
                self.act(state, iteration, request).await?;
            }

            if !state.is_finished() && !advanced_filled {
                advanced_filled = self.run_preprocessor(state).await;
            }
        }

        Ok(())
    }

    async fn reasoning_step(&self, state: &mut AgentState) -> Result<Decision, AgentError> {
        state.set_status(AgentStatus::Thinking);

        let context = state.conversation_context(self.options.context_window);
        let prompt = self.runtime.reasoning_prompt(
            &context,
            state.intermediate_results(),
            &current_date(),
        )?;
        let request = ModelRequest::new(
            self.options.provider.clone(),
            self.options.model.clone(),
            vec![
                ChatMessage::system(self.runtime.reasoning_instructions()),
                ChatMessage::user(prompt),
            ],
        )
        .with_sampling(self.options.temperature, self.options.max_output_tokens)
        .expect_json();

        debug!(
            provider = %self.options.provider,
            model = %self.options.model,
            "Submitting reasoning request"
        );
        let response = self.provider.chat(request).await?;
        debug!(response = response.content(), "Reasoning response received");

        let decision = self.runtime.parse_decision(response.content())?;
        info!(thought = %decision.thought, "Thought");
        state.record(StepKind::Thought, decision.thought.clone(), None);
        Ok(decision)
    }

    async fn act(
        &self,
        state: &mut AgentState,
        iteration: u32,
        request: &ActionRequest,
    ) -> Result<(), AgentError> {
        state.set_status(AgentStatus::Acting);

        let mut metadata = Map::new();
        metadata.insert("action".to_string(), serde_json::to_value(request)?);
        let description = request.describe();
        info!(%description, "Taking action");
        state.record(StepKind::Action, description, Some(metadata));

        let result = self.runtime.execute(request).await;

        state.set_status(AgentStatus::Observing);
        let observation = format_observation(&result);
        debug!(%observation, "Observation");
        state.record(StepKind::Observation, observation, None);

        if let Ok(output) = result {
            let answer = match &output {
                ActionOutput::Answer(outcome) if outcome.success => Some(outcome.answer.clone()),
                ActionOutput::Answer(_) => Some(ANSWER_NOT_FOUND.to_string()),
                _ => None,
            };
            // no_op leaves intermediate results untouched
            if !matches!(output, ActionOutput::NoOp(_)) {
                state.store_result(format!("action_{iteration}"), output);
            }

            if let Some(answer) = answer {
                info!(iteration, "Answer action completed the run");
                state.finish(answer);
            }
        }

        Ok(())
    }

    /// Returns whether a result was stored.
    async fn run_preprocessor(&self, state: &mut AgentState) -> bool {
        let Some(preprocessor) = self.preprocessor.as_ref() else {
            return false;
        };

        let result = preprocessor
            .process(state.user_input(), state.intermediate_results())
            .await;
        match result {
            Ok(Some(output)) => {
                info!(kind = %output.kind(), "Keyword stage stored a result");
                state.store_result(ADVANCED_RESULT_KEY, output);
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "Keyword stage failed");
                false
            }
        }
    }

    async fn refine_final_answer(&self, state: &mut AgentState) {
        let prompt = self.runtime.final_response_prompt(
            state.user_input(),
            state.history(),
            state.final_answer(),
        );
        let request = ModelRequest::new(
            self.options.provider.clone(),
            self.options.model.clone(),
            vec![ChatMessage::user(prompt)],
        )
        .with_sampling(
            self.options.final_temperature,
            self.options.final_max_output_tokens,
        );

        match self.provider.chat(request).await {
            Ok(response) => {
                let refined = response.content().trim();
                if refined.is_empty() {
                    debug!("Refinement returned nothing, keeping draft answer");
                } else {
                    state.refine_answer(refined);
                }
            }
            Err(err) => {
                warn!(error = %err, "Final answer refinement failed, keeping draft answer");
            }
        }
    }
}
