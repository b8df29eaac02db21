//! Реплей раздачи из JSON-файла с пейлоадом.
//!
//! Usage:
//!   hand_replay_cli <payload.json> [--config cfg.json] [--small-blind N] [--big-blind N]
//!                   [--lenient] [--allow-incomplete] [--history] [--debug]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;

use holdem_replay::api::{replay_payload, HandPayload, ServiceConfig};
use holdem_replay::domain::TableConfig;
use holdem_replay::engine::{
    HandEnd, HandHistory, IncompleteHandPolicy, PayoffsById, SettlementStatus,
    UnknownTokenPolicy,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "hand_replay_cli", version, about = "Replay a No-Limit Hold'em hand and print payoffs")]
struct Cli {
    /// Path to the hand payload (JSON)
    payload: PathBuf,

    /// Service config (JSON): default blinds and replay options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Default small blind (overrides config; smallBlindAmount in the payload wins)
    #[arg(long)]
    small_blind: Option<u64>,

    /// Default big blind (overrides config; bigBlindAmount in the payload wins)
    #[arg(long)]
    big_blind: Option<u64>,

    /// Skip unknown action tokens instead of failing
    #[arg(long, default_value_t = false)]
    lenient: bool,

    /// Settle hands that end early as tentative instead of failing
    #[arg(long, default_value_t = false)]
    allow_incomplete: bool,

    /// Print the resolved event history too
    #[arg(long, default_value_t = false)]
    history: bool,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    debug: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    id: &'a str,
    status: SettlementStatus,
    end: HandEnd,
    payoffs: &'a PayoffsById,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped_tokens: &'a Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<&'a HandHistory>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.debug {
        "debug".to_string()
    } else {
        "holdem_replay=info,warn".to_string()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(cli.debug)
        .with_writer(std::io::stderr)
        .init();

    let payload: HandPayload = read_json(&cli.payload).context("reading hand payload")?;
    let config = build_config(&cli, &payload)?;

    tracing::info!(hand = %payload.id, players = payload.players.len(), actions = payload.actions.len(), "replaying");

    let report = replay_payload(&config, &payload).with_context(|| format!("replaying hand '{}'", payload.id))?;

    let output = Output {
        id: &payload.id,
        status: report.status,
        end: report.end,
        payoffs: &report.payoffs,
        skipped_tokens: &report.skipped_tokens,
        history: cli.history.then_some(&report.history),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading '{}'", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing '{}'", path.display()))
}

/// Блайнды по умолчанию: флаги, иначе файл конфига, иначе пейлоад.
/// Суммы блайндов в самом пейлоаде применяются позже (`HandPayload::table_config`)
/// и важнее флагов и конфига.
fn build_config(cli: &Cli, payload: &HandPayload) -> anyhow::Result<ServiceConfig> {
    let file: Option<ServiceConfig> = match &cli.config {
        Some(path) => Some(read_json(path).context("reading service config")?),
        None => None,
    };

    let small_blind = cli
        .small_blind
        .or(file.map(|c| c.table.small_blind.0))
        .or(payload.small_blind_amount);
    let big_blind = cli
        .big_blind
        .or(file.map(|c| c.table.big_blind.0))
        .or(payload.big_blind_amount);

    let (Some(small_blind), Some(big_blind)) = (small_blind, big_blind) else {
        bail!("blind amounts are not set: use --config, --small-blind/--big-blind or smallBlindAmount/bigBlindAmount in the payload");
    };

    let mut options = file.map(|c| c.options).unwrap_or_default();
    if cli.lenient {
        options.unknown_tokens = UnknownTokenPolicy::SkipAndLog;
    }
    if cli.allow_incomplete {
        options.incomplete_hands = IncompleteHandPolicy::Tentative;
    }

    Ok(ServiceConfig::new(TableConfig::new(small_blind, big_blind)).with_options(options))
}
