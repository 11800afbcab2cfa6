// Agent outcome tests - terminal states and the persisted JSON document

use astrolabe_core::agent::{Agent, AgentOptions, AgentStatus, MAX_ITERATIONS_ANSWER};
use astrolabe_core::config::SearchSettings;
use astrolabe_core::model::{ModelError, ModelProvider, ModelRequest, ModelResponse};
use astrolabe_core::search::{SearchError, SearchHit, SearchProvider};
use astrolabe_core::tooling::{Toolkit, WebToolkit};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

/// Answers every request with the same text.
struct FixedModel(String);

#[async_trait]
impl ModelProvider for FixedModel {
    async fn chat(&self, _request: ModelRequest) -> Result<ModelResponse, ModelError> {
        Ok(ModelResponse::new(self.0.clone()))
    }
}

struct NoResults;

#[async_trait]
impl SearchProvider for NoResults {
    fn id(&self) -> &str {
        "empty"
    }

    async fn search(&self, _query: &str, _n: usize) -> Result<Vec<SearchHit>, SearchError> {
        Ok(Vec::new())
    }
}

fn toolkit() -> Arc<dyn Toolkit> {
    Arc::new(WebToolkit::new(Arc::new(NoResults), SearchSettings::default()))
}

fn agent(reply: String, max_iterations: u32) -> Agent<FixedModel> {
    let options = AgentOptions {
        provider: "fixed".into(),
        model: "fixed-model".into(),
        max_iterations,
        refine_final_answer: true,
        ..AgentOptions::default()
    };
    Agent::new(Arc::new(FixedModel(reply)), toolkit(), options)
}

fn no_op_decision() -> String {
    json!({
        "thought": "Nothing useful to do yet",
        "action": { "name": "no_op", "parameters": {} },
        "should_continue": true,
        "final_answer": ""
    })
    .to_string()
}

#[tokio::test]
async fn exhausted_budget_is_reported_and_saved() {
    let outcome = agent(no_op_decision(), 3).run("Is anything happening?").await;

    assert!(outcome.success);
    assert_eq!(outcome.status, AgentStatus::MaxIterationsReached);
    assert_eq!(outcome.total_iterations, 3);
    assert_eq!(outcome.final_answer, MAX_ITERATIONS_ANSWER);
    assert_eq!(outcome.history.len(), 9);
    assert!(outcome.intermediate_results.is_empty());
    assert!(outcome.summary.finished);

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("result.json");
    outcome.save(&path).expect("save outcome");

    let saved: Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(saved["success"], json!(true));
    assert_eq!(saved["status"], json!("max_iterations_reached"));
    assert_eq!(saved["user_input"], json!("Is anything happening?"));
    assert_eq!(saved["history"][0]["type"], json!("thought"));
    assert_eq!(saved["history"][1]["type"], json!("action"));
    assert_eq!(
        saved["history"][1]["metadata"]["action"]["name"],
        json!("no_op")
    );
    assert_eq!(saved["intermediate_results"], json!({}));
    assert!(saved.get("error").is_none());
}

#[tokio::test]
async fn unreadable_model_reply_ends_in_error_outcome() {
    let outcome = agent("I cannot answer in JSON".into(), 4)
        .run("What time is it?")
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.status, AgentStatus::Error);
    assert_eq!(outcome.total_iterations, 1);
    assert!(outcome.final_answer.is_empty());
    assert!(outcome.history.is_empty());

    let saved: Value = serde_json::from_str(&outcome.to_json_pretty().expect("encode"))
        .expect("valid json");
    assert_eq!(saved["status"], json!("error"));
    let error = saved["error"].as_str().expect("error text");
    assert!(error.starts_with("invalid agent response"));
}
