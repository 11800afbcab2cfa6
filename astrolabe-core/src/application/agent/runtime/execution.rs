use super::{Action, ActionOutput, ActionRequest, ActionRuntime, ToolError};
use tracing::{debug, info, warn};

impl ActionRuntime {
    /// Resolve and run one requested action.
    pub async fn execute(&self, request: &ActionRequest) -> Result<ActionOutput, ToolError> {
        let action = match Action::from_request(request) {
            Ok(action) => action,
            Err(err) => {
                warn!(requested_action = %request.name, error = %err, "Rejected action request");
                return Err(err);
            }
        };

        let kind = action.kind();
        debug!(action = %kind, "Dispatching action");

        let result = match action {
            Action::Search { query, num_results } => self
                .toolkit
                .search(&query, num_results)
                .await
                .map(ActionOutput::Search),
            Action::ExtractWeather { location } => self
                .toolkit
                .extract_weather(&location)
                .await
                .map(ActionOutput::Weather),
            Action::Summarize { text, max_length } => self
                .toolkit
                .summarize(&text, max_length)
                .await
                .map(ActionOutput::Summary),
            Action::Answer {
                question,
                search_results,
                current_date,
            } => self
                .toolkit
                .answer(&question, &search_results, &current_date)
                .await
                .map(ActionOutput::Answer),
            Action::NoOp => Ok(ActionOutput::NoOp(self.toolkit.no_op())),
        };

        match result {
            Ok(output) => {
                info!(action = %kind, success = output.success(), "Action executed");
                Ok(output)
            }
            Err(source) => {
                warn!(action = %kind, %source, "Action execution failed");
                Err(ToolError::Execution {
                    action: request.name.clone(),
                    source,
                })
            }
        }
    }
}
