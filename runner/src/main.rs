// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for evaluations and diagnostic games
// ═══════════════════════════════════════════════════════════════════════

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use arena_agents::{ArenaConnector, LlmClient, RemoteAgentClient};
use arena_engine::game::Game;
use arena_engine::gateway::{Connector, Gateway};
use arena_engine::setup::{create_game, GameConfig};
use arena_eval::{run_evaluation, EvalRequest};

#[derive(Parser)]
#[command(name = "arena-runner", about = "Werewolf Arena - agent evaluation harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full evaluation batch described by a request file
    Evaluate {
        /// Path to the evaluation request JSON
        #[arg(short, long)]
        request: PathBuf,
        /// Run the batch's independent games concurrently
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Also write the structured report to this path
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// LLM backend base URL (default: ARENA_LLM_BASE_URL)
        #[arg(long)]
        llm_url: Option<String>,
        /// LLM model name (default: ARENA_LLM_MODEL)
        #[arg(long)]
        llm_model: Option<String>,
    },
    /// Run a single all-simulated game and print its analytics
    Play {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Debate passes per round
        #[arg(short, long, default_value_t = 1)]
        turns: u32,
        #[arg(long)]
        llm_url: Option<String>,
        #[arg(long)]
        llm_model: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Evaluate {
            request,
            parallel,
            out,
            llm_url,
            llm_model,
        } => cmd_evaluate(&request, parallel, out.as_deref(), llm_url, llm_model),
        Commands::Play {
            seed,
            turns,
            llm_url,
            llm_model,
        } => cmd_play(seed, turns, llm_url, llm_model),
    }
}

/// Flags win over the environment; with no flags, ARENA_LLM_* applies.
fn build_llm(url: Option<String>, model: Option<String>) -> LlmClient {
    if url.is_none() && model.is_none() {
        return LlmClient::from_env();
    }
    let url = url.unwrap_or_else(|| arena_agents::llm::DEFAULT_LLM_BASE_URL.to_string());
    let model = model.unwrap_or_else(|| arena_agents::llm::DEFAULT_LLM_MODEL.to_string());
    LlmClient::new(&url, &model)
}

fn cmd_evaluate(
    request_path: &std::path::Path,
    parallel: bool,
    out: Option<&std::path::Path>,
    llm_url: Option<String>,
    llm_model: Option<String>,
) -> anyhow::Result<()> {
    let text = fs::read_to_string(request_path)
        .with_context(|| format!("reading {}", request_path.display()))?;
    let request = EvalRequest::from_json(&text)?;
    let validated = request.validate()?;

    println!("=== Werewolf Arena ===\n");
    println!(
        "Evaluating {} over {} roles, {} games per role\n",
        validated.participant_endpoint,
        validated.roles.len(),
        validated.games_per_role,
    );

    let llm = build_llm(llm_url, llm_model);
    let remote = RemoteAgentClient::new();
    let report = run_evaluation(&validated, parallel, || {
        Box::new(ArenaConnector::new(llm.clone(), remote.clone())) as Box<dyn Connector>
    });

    println!("{}", report.summary_text());

    if let Some(path) = out {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("\nReport written to: {}", path.display());
    }
    Ok(())
}

fn cmd_play(
    seed: u64,
    turns: u32,
    llm_url: Option<String>,
    llm_model: Option<String>,
) -> anyhow::Result<()> {
    println!("=== Werewolf Arena ===\n");
    println!("Running single simulated game: seed={seed}, turns per round={turns}\n");

    let config = GameConfig {
        turns_to_speak_per_round: turns,
        seed,
        ..GameConfig::default()
    };
    let state = create_game(None, &config);

    let connector = ArenaConnector::new(build_llm(llm_url, llm_model), RemoteAgentClient::new());
    let mut game =
        Game::new(state, Gateway::new(Box::new(connector))).with_max_rounds(config.max_rounds);
    let analytics = game.run_to_completion()?;

    println!("{}", analytics.summary_text);
    Ok(())
}
