use anyhow::{bail, Context, Result};
use bargain_challenge::Challenge;
use bargain_core::{Constraints, SearchProvider};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod local_index;
mod state;
mod tavily;
mod web;

use config::{Config, SearchSection};
use local_index::LocalIndex;
use tavily::TavilyClient;
use web::{ProviderMode, WebSearch};

#[derive(Parser, Debug)]
#[command(
    name = "bargain",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BARGAIN_BUILD_REV"), ")"),
    about = "Find the best discount on a spec'd machine versus the vendor's refurbished price"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Options shared by commands that search.
#[derive(clap::Args, Debug)]
struct SearchOpts {
    /// Results requested per query (default: config, else 8)
    #[arg(long)]
    max_results: Option<usize>,

    /// JSON file to use instead of the built-in local index
    #[arg(long)]
    index: Option<PathBuf>,

    /// Never call the live search API
    #[arg(long)]
    offline: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search offers and refurbished baselines, print ranked discounts as JSON
    Challenge {
        /// Required chip, matched exactly
        #[arg(long, default_value = "M2 Ultra")]
        chip: String,

        /// Minimum memory in GB
        #[arg(long = "min-ram", default_value_t = 64)]
        min_ram: u32,

        /// Minimum SSD size in GB
        #[arg(long = "min-ssd", default_value_t = 1024)]
        min_ssd: u32,

        #[arg(long, default_value = "USD")]
        currency: String,

        #[command(flatten)]
        search: SearchOpts,
    },

    /// Smoke-test the search collaborator with one query
    Search {
        #[arg(default_value = "refurbished Mac Studio M2 Ultra")]
        query: String,

        #[command(flatten)]
        search: SearchOpts,
    },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default ~/.bargain/config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_search(cfg: &SearchSection, opts: &SearchOpts) -> Result<WebSearch> {
    let index_path = opts.index.as_ref().or(cfg.index.as_ref());
    let local = match index_path {
        Some(p) => LocalIndex::from_path(p)?,
        None => LocalIndex::builtin()?,
    };

    let mode = if opts.offline { ProviderMode::Mock } else { cfg.provider };
    let live = std::env::var(tavily::API_KEY_VAR)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .map(|k| TavilyClient::new(k.trim(), &cfg.tavily_base_url, cfg.timeout()));

    let web = WebSearch::new(mode, live, local)?;
    debug!(mode = web.mode_label(), index_entries = web.local().len(), "search provider ready");
    Ok(web)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let cfg = config::load_config().context("loading config")?;

    match cli.command {
        Command::Challenge { chip, min_ram, min_ssd, currency, search } => {
            let constraints = Constraints::new(chip, min_ram, min_ssd).with_currency(currency);
            run_challenge_cmd(&cfg, &constraints, &search)?;
        }

        Command::Search { query, search } => {
            search_smoke(&cfg, &query, &search)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => print!("{}", config::render_config(&cfg)?),
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

fn run_challenge_cmd(cfg: &Config, constraints: &Constraints, opts: &SearchOpts) -> Result<()> {
    let web = build_search(&cfg.search, opts)?;
    let max_results = opts.max_results.unwrap_or(cfg.search.max_results);

    info!(chip = %constraints.chip, mode = web.mode_label(), max_results, "running challenge");
    let challenge = Challenge::new(&cfg.challenge)?;
    let out = challenge.run(&web, constraints, max_results)?;

    println!("{}", serde_json::to_string_pretty(&out).context("serialize result")?);
    Ok(())
}

fn search_smoke(cfg: &Config, query: &str, opts: &SearchOpts) -> Result<()> {
    let web = build_search(&cfg.search, opts)?;
    let max_results = opts.max_results.unwrap_or(3);

    let results = web
        .search(query, max_results)
        .with_context(|| format!("search: {query}"))?;

    println!("[smoke] mode={} results={}", web.mode_label(), results.len());
    if results.is_empty() {
        bail!("no results for {query:?}");
    }

    for r in &results {
        println!("- {} | {} | {}", r.source_id, r.title, r.url);
    }

    Ok(())
}
