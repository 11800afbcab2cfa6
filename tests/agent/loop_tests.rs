// Agent loop tests - the full reason/act/observe cycle through the public API
//
// A scripted model drives the loop; SerpAPI is served by wiremock so the
// real search client, toolkit and keyword stage are exercised.

use astrolabe_core::agent::{Agent, AgentOptions, AgentStatus, StepKind};
use astrolabe_core::config::SearchSettings;
use astrolabe_core::model::{ModelError, ModelProvider, ModelRequest, ModelResponse};
use astrolabe_core::preprocess::KeywordPreprocessor;
use astrolabe_core::search::{SearchProvider, SerpApiClient};
use astrolabe_core::tooling::{ActionOutput, Toolkit, WebToolkit};
use async_trait::async_trait;
use serde_json::{Value, json};
use serial_test::serial;
use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY_VAR: &str = "ASTROLABE_IT_LOOP_SERPAPI_KEY";

struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<usize>,
}

impl ScriptedModel {
    fn new(replies: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(0),
        })
    }

    fn calls(&self) -> usize {
        *self.calls.lock().expect("calls lock")
    }
}

#[async_trait]
impl ModelProvider for ScriptedModel {
    async fn chat(&self, _request: ModelRequest) -> Result<ModelResponse, ModelError> {
        *self.calls.lock().expect("calls lock") += 1;
        let next = self.replies.lock().expect("replies lock").pop_front();
        next.map(ModelResponse::new)
            .ok_or_else(|| ModelError::invalid_response("scripted", "script exhausted"))
    }
}

fn act(name: &str, parameters: Value) -> String {
    json!({
        "thought": format!("I should use {name}"),
        "action": { "name": name, "parameters": parameters },
        "should_continue": true,
        "final_answer": ""
    })
    .to_string()
}

fn stop(answer: &str) -> String {
    json!({
        "thought": "I have enough information",
        "action": null,
        "should_continue": false,
        "final_answer": answer
    })
    .to_string()
}

fn options(refine: bool) -> AgentOptions {
    AgentOptions {
        provider: "scripted".into(),
        model: "scripted-model".into(),
        max_iterations: 5,
        refine_final_answer: refine,
        ..AgentOptions::default()
    }
}

fn toolkit_for(server: &MockServer, api_key: Option<&str>) -> Arc<dyn Toolkit> {
    let settings = SearchSettings {
        endpoint: server.uri(),
        api_key: api_key.map(String::from),
        ..SearchSettings::default()
    };
    let search: Arc<dyn SearchProvider> = Arc::new(SerpApiClient::from_settings(&settings));
    Arc::new(WebToolkit::new(search, settings))
}

async fn serp_server(body: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

fn weather_hits() -> Value {
    json!({
        "organic_results": [
            {
                "title": "Dự báo thời tiết Hà Nội",
                "link": "https://weather.example/hanoi",
                "snippet": "Hà Nội hôm nay 30°C, trời nắng, độ ẩm 70%.",
                "position": 1
            },
            {
                "title": "Hanoi travel guide",
                "link": "https://travel.example/hanoi",
                "snippet": "Things to do in the old quarter.",
                "position": 2
            }
        ]
    })
}

#[tokio::test]
#[serial]
async fn weather_question_runs_action_and_keyword_stage() {
    unsafe { env::set_var(KEY_VAR, "serp-key") };
    let server = serp_server(weather_hits()).await;
    let toolkit = toolkit_for(&server, Some(KEY_VAR));
    let model = ScriptedModel::new(vec![
        act("extract_weather", json!({ "location": "Hà Nội" })),
        stop("Hà Nội hôm nay 30°C"),
        "Hôm nay Hà Nội khoảng 30°C, trời nắng.".to_string(),
    ]);
    let agent = Agent::new(Arc::clone(&model), Arc::clone(&toolkit), options(true))
        .with_preprocessor(Box::new(KeywordPreprocessor::new(toolkit)));

    let outcome = agent.run("Thời tiết Hà Nội hôm nay?").await;
    unsafe { env::remove_var(KEY_VAR) };

    assert!(outcome.success);
    assert_eq!(outcome.status, AgentStatus::Finished);
    assert_eq!(outcome.total_iterations, 2);
    assert_eq!(outcome.final_answer, "Hôm nay Hà Nội khoảng 30°C, trời nắng.");
    assert_eq!(model.calls(), 3);

    let keys: Vec<&str> = outcome
        .intermediate_results
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["action_1", "advanced"]);
    match &outcome.intermediate_results["action_1"] {
        ActionOutput::Weather(weather) => {
            assert!(weather.success);
            assert_eq!(weather.location, "Hà Nội");
            assert_eq!(weather.weather_data.len(), 1);
        }
        other => panic!("expected weather output, got {:?}", other.kind()),
    }
    assert!(matches!(
        outcome.intermediate_results["advanced"],
        ActionOutput::Weather(_)
    ));

    let requests = server.received_requests().await.expect("recorded requests");
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
#[serial]
async fn search_provider_error_becomes_failed_observation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("quota exceeded"))
        .mount(&server)
        .await;
    unsafe { env::set_var(KEY_VAR, "serp-key") };
    let toolkit = toolkit_for(&server, Some(KEY_VAR));
    let model = ScriptedModel::new(vec![
        act("search", json!({ "query": "rust async" })),
        stop("Search is unavailable right now."),
    ]);
    let agent = Agent::new(model, toolkit, options(false));

    let outcome = agent.run("Tell me about rust async").await;
    unsafe { env::remove_var(KEY_VAR) };

    assert!(outcome.success);
    assert_eq!(outcome.final_answer, "Search is unavailable right now.");
    assert!(outcome.intermediate_results.is_empty());

    let observation = outcome
        .history
        .iter()
        .find(|step| step.kind == StepKind::Observation)
        .expect("observation recorded");
    assert!(
        observation
            .content
            .starts_with("Action failed: failed to execute action 'search'")
    );
    assert!(observation.content.contains("500"));
}

#[tokio::test]
async fn weather_without_api_key_stores_failed_record() {
    let server = MockServer::start().await;
    let toolkit = toolkit_for(&server, None);
    let model = ScriptedModel::new(vec![
        act("extract_weather", json!({ "location": "Đà Nẵng" })),
        stop("No weather data available."),
    ]);
    let agent = Agent::new(model, toolkit, options(false));

    let outcome = agent.run("How hot is Da Nang?").await;

    assert!(outcome.success);
    match &outcome.intermediate_results["action_1"] {
        ActionOutput::Weather(weather) => {
            assert!(!weather.success);
            let error = weather.error.as_deref().unwrap_or_default();
            assert!(error.starts_with("Failed to search weather data:"));
        }
        other => panic!("expected weather output, got {:?}", other.kind()),
    }
    let observation = &outcome.history[2];
    assert_eq!(observation.kind, StepKind::Observation);
    assert!(observation.content.starts_with("Action failed:"));
}

#[tokio::test]
#[serial]
async fn answer_action_finishes_run_with_composed_answer() {
    unsafe { env::set_var(KEY_VAR, "serp-key") };
    let server = serp_server(json!({
        "organic_results": [{
            "title": "Bitcoin price today",
            "link": "https://prices.example/btc",
            "snippet": "Bitcoin trades near 60,000 USD.",
            "position": 1
        }]
    }))
    .await;
    let toolkit = toolkit_for(&server, Some(KEY_VAR));
    let model = ScriptedModel::new(vec![
        act("search", json!({ "query": "bitcoin price", "num_results": 3 })),
        act(
            "answer",
            json!({
                "question": "What is the bitcoin price?",
                "search_results": [{
                    "title": "Bitcoin price today",
                    "link": "https://prices.example/btc",
                    "snippet": "Bitcoin trades near 60,000 USD."
                }],
                "current_date": "18/10/2026 09:00:00"
            }),
        ),
    ]);
    let agent = Agent::new(Arc::clone(&model), toolkit, options(false));

    let outcome = agent.run("What is the bitcoin price?").await;
    unsafe { env::remove_var(KEY_VAR) };

    assert!(outcome.success);
    assert_eq!(outcome.status, AgentStatus::Finished);
    assert_eq!(outcome.total_iterations, 2);
    assert_eq!(model.calls(), 2);
    assert!(
        outcome
            .final_answer
            .starts_with("Based on search results (updated 18/10/2026 09:00:00):")
    );
    assert!(outcome.final_answer.contains("60,000 USD"));

    match &outcome.intermediate_results["action_1"] {
        ActionOutput::Search(search) => {
            assert_eq!(search.query, "bitcoin price");
            assert_eq!(search.total_results, 1);
        }
        other => panic!("expected search output, got {:?}", other.kind()),
    }
    assert!(matches!(
        outcome.intermediate_results["action_2"],
        ActionOutput::Answer(_)
    ));
}
