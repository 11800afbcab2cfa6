mod cli;
mod report;
mod stdio;

use astrolabe_core::agent::Agent;
use astrolabe_core::config::AppConfig;
use astrolabe_core::model::ModelProvider;
use chrono::Local;
use clap::Parser;
use cli::{Cli, RunMode};
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

const TEST_QUERIES: [&str; 3] = [
    "Thời tiết Hà Nội hôm nay?",
    "Giá Bitcoin hiện tại?",
    "Tin tức AI mới nhất?",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.mode);

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    debug!(
        provider = %config.default_provider,
        model = %config.model,
        max_iterations = config.agent.max_iterations,
        "Configuration loaded"
    );

    let agent = Agent::from_config(&config);

    match cli.mode {
        RunMode::Interactive => stdio::run(&agent).await?,
        RunMode::Query => run_query(&agent, &cli).await?,
        RunMode::Test => run_tests(&agent).await,
    }

    Ok(())
}

async fn run_query<P: ModelProvider>(agent: &Agent<P>, cli: &Cli) -> Result<(), Box<dyn Error>> {
    let prompt = cli
        .prompt_text()
        .ok_or("query mode needs a question, e.g. `astrolabe --mode query \"weather in Hanoi\"`")?;

    println!("Processing query: {prompt}");
    let outcome = agent.run(&prompt).await;
    println!("{}", report::render_outcome(&outcome));

    let path = cli
        .output_path()
        .unwrap_or_else(|| report::default_result_path(Local::now()));
    outcome.save(&path)?;
    info!(path = %path.display(), "Saved agent result");
    println!("\nDetailed results saved to: {}", path.display());

    Ok(())
}

async fn run_tests<P: ModelProvider>(agent: &Agent<P>) {
    println!("Running sample queries...");
    for (index, query) in TEST_QUERIES.iter().enumerate() {
        println!("\nTest {}: {query}", index + 1);
        let outcome = agent.run(query).await;
        println!("{}", report::render_verdict(&outcome));
    }
}

/// Interactive sessions stay quiet unless `RUST_LOG` asks otherwise.
fn init_tracing(mode: RunMode) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let default_level = match mode {
            RunMode::Interactive => "warn",
            RunMode::Query | RunMode::Test => "info",
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
