//! Core of the astrolabe search agent: configuration, model and search
//! backends, the action toolkit and the ReAct loop.

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{agent, preprocess, tooling};
pub use config::{AppConfig, ModelProviderConfig};
pub use domain::types;
pub use infrastructure::{model, search};

pub use agent::{Agent, AgentOptions, AgentOutcome, AgentStatus};
