//! reel - conversational ad campaign builder CLI

mod config;

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use clap::Parser;
use reel_agent::{Engine, EngineConfig};
use reel_ai::{GoogleProvider, OfflineGenerator, TextGenerator};
use reel_api::{MockAds, MockApiConfig, MockMusic, MockOauth};

/// reel - conversational ad campaign builder
#[derive(Parser, Debug)]
#[command(name = "reel")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Model to use (default: gemini-2.5-flash)
    #[arg(short, long)]
    model: Option<String>,

    /// Use the offline rule-based normalizer instead of a live model
    #[arg(long)]
    offline: bool,

    /// Seed the mock backends' randomness (reproducible runs)
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("reel=debug")
            .init();
    }

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Load config file
    let cfg = config::Config::load();

    let offline = args.offline || cfg.offline.unwrap_or(false);

    let llm: Arc<dyn TextGenerator> = if offline {
        Arc::new(OfflineGenerator::new())
    } else {
        let Some(api_key) = cfg.google_api_key() else {
            eprintln!("Error: No Google API key found");
            eprintln!();
            eprintln!("Options:");
            eprintln!("  1. Set the key: export GOOGLE_API_KEY=your-key");
            eprintln!("  2. Add it to the config file: reel --init-config");
            eprintln!("  3. Run without a live model: reel --offline");
            std::process::exit(1);
        };

        let model = args
            .model
            .or(cfg.model.clone())
            .unwrap_or_else(|| reel_ai::providers::google::DEFAULT_MODEL.to_string());

        Arc::new(GoogleProvider::new(api_key).with_model(model))
    };

    // Wire the mock platform backends
    let api = Arc::new(MockApiConfig::default());
    let music = match args.seed {
        Some(seed) => MockMusic::with_seed(Arc::clone(&api), seed),
        None => MockMusic::new(Arc::clone(&api)),
    };
    let engine_config = EngineConfig {
        client_id: api.client_id.clone(),
        client_secret: api.client_secret.clone(),
    };

    let mut engine = Engine::new(
        engine_config,
        llm,
        Arc::new(MockOauth::new(Arc::clone(&api))),
        Arc::new(music),
        Arc::new(MockAds::new(api)),
    );

    run_loop(&mut engine).await
}

async fn run_loop(engine: &mut Engine) -> anyhow::Result<()> {
    // Show minimal startup info (only if TTY)
    if io::stderr().is_terminal() {
        eprintln!("reel - ad campaign builder");
        eprintln!("Type 'exit' to quit.");
        eprintln!();
    }

    println!("Let's build an ad campaign. What's the campaign name?");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        // Strip the line ending but keep inner whitespace: the ad-text
        // length rule counts the raw input.
        let input = line.trim_end_matches(['\r', '\n']);
        if input.trim().is_empty() {
            continue;
        }
        if input.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = engine.handle_message(input).await;
        println!("\n{}\n", reply);
    }

    Ok(())
}
