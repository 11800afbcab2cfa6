use astrolabe_core::config::AppConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "astrolabe",
    version,
    about = "ReAct search agent with web search and weather lookup"
)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = RunMode::Interactive)]
    pub mode: RunMode,
    /// Configuration file; defaults to config/agent.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Where query mode writes the JSON result
    #[arg(long)]
    pub output: Option<PathBuf>,
    #[arg(long)]
    pub max_iterations: Option<u32>,
    /// Disable the keyword pre-processing stage
    #[arg(long)]
    pub no_preprocess: bool,
    #[arg()]
    pub prompt: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    Interactive,
    Query,
    Test,
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(max_iterations) = self.max_iterations.filter(|n| *n > 0) {
            info!(max_iterations, "Overriding iteration budget from CLI flag");
            config.agent.max_iterations = max_iterations;
        }
        if self.no_preprocess {
            info!("Keyword stage disabled by CLI flag");
            config.agent.preprocess = false;
        }
    }

    /// Positional words joined into one prompt, if any.
    pub fn prompt_text(&self) -> Option<String> {
        let joined = self.prompt.join(" ");
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn output_path(&self) -> Option<PathBuf> {
        self.output
            .as_ref()
            .map(|path| PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned()))
    }
}
