mod directive;
mod errors;
mod factory;
mod models;
mod observation;
mod runner;
mod runtime;
mod state;


pub use directive::Decision;
pub use errors::{AgentError, ToolError};
pub use models::{AgentOptions, AgentOutcome, OutcomeWriteError};
pub use observation::{describe_value, format_observation};
pub use runner::{ANSWER_NOT_FOUND, Agent, MAX_ITERATIONS_ANSWER};
pub use runtime::ActionRuntime;
pub use state::{
    AgentState, AgentStatus, HistoryStep, IntermediateResults, StateSummary, StepKind,
};
