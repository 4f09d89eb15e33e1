// SPDX-License-Identifier: GPL-3.0-or-later
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tagsim_config::{load as load_config, MatchingConfig};
use tagsim_core::{
    match_above_threshold, similarity, sort_by_similarity, word_similarity, BestMatch,
    ScoredCandidate, TrackMetadata,
};
use tokio::task;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Parser)]
#[command(name = "tagsim", version, about = "Approximate string comparison for music metadata")]
struct Cli {
    /// TOML configuration file layered over the built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the similarity of two strings.
    Compare {
        left: String,
        right: String,
        #[command(flatten)]
        options: ScoreOptions,
    },
    /// Rank candidates by similarity to a query.
    Rank {
        query: String,
        #[arg(required = true)]
        candidates: Vec<String>,
        /// Minimum score for the best candidate (defaults to the configured track threshold).
        #[arg(long)]
        threshold: Option<f32>,
        #[command(flatten)]
        options: ScoreOptions,
    },
    /// Compare two tag sets stored as JSON files using the configured weights.
    Tags { left: PathBuf, right: PathBuf },
}

#[derive(Debug, Clone, Copy, Default, Args)]
struct ScoreOptions {
    /// Compare word by word instead of as one sequence.
    #[arg(long)]
    words: bool,
    /// Apply Unicode NFC normalization before comparing.
    #[arg(long)]
    nfc: bool,
}

impl ScoreOptions {
    fn prepare(&self, value: &str) -> String {
        if self.nfc {
            value.nfc().collect()
        } else {
            value.to_string()
        }
    }

    fn score(&self, left: &str, right: &str) -> f32 {
        let left = self.prepare(left);
        let right = self.prepare(right);
        if self.words {
            word_similarity(&left, &right)
        } else {
            similarity(&left, &right)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = init_tracing();
    let config = load_config(cli.config.as_deref())?;
    apply_log_level(&filter, &config.telemetry.log_level)?;

    match cli.command {
        Command::Compare {
            left,
            right,
            options,
        } => {
            let score = compare(left, right, options).await?;
            println!("{score:.4}");
        }
        Command::Rank {
            query,
            candidates,
            threshold,
            options,
        } => {
            let ranked = rank(query, candidates, options).await?;
            for entry in &ranked {
                println!("{:.4}\t{}", entry.similarity, entry.candidate);
            }

            let best = pick_best(ranked, threshold, &config.matching)?;
            info!(
                target: "cli",
                candidate = %best.result.candidate,
                similarity = best.similarity,
                "best match"
            );
        }
        Command::Tags { left, right } => {
            let score = compare_tags(&left, &right, &config.matching).await?;
            println!("{score:.4}");
        }
    }

    Ok(())
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Install the subscriber before configuration loads so its events are kept.
fn init_tracing() -> FilterHandle {
    let initial = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(initial);
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
    handle
}

/// Switch to the configured level unless `RUST_LOG` already picked one.
fn apply_log_level(handle: &FilterHandle, log_level: &str) -> Result<()> {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return Ok(());
    }
    let filter = EnvFilter::try_new(log_level)
        .with_context(|| format!("invalid log level {log_level:?}"))?;
    handle.reload(filter).context("failed to apply log level")?;
    Ok(())
}

/// Best ranked candidate, or an error if it misses the threshold.
///
/// `threshold` falls back to the configured track matching threshold.
fn pick_best(
    ranked: Vec<ScoredCandidate<String>>,
    threshold: Option<f32>,
    matching: &MatchingConfig,
) -> Result<BestMatch<ScoredCandidate<String>>> {
    let threshold = threshold.unwrap_or(matching.track_matching_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        bail!("threshold must be within [0.0, 1.0], got {threshold}");
    }

    match match_above_threshold(ranked, threshold) {
        Some(best) => Ok(best),
        None => bail!("no candidate reached threshold {threshold:.2}"),
    }
}

fn read_metadata(path: &Path) -> Result<TrackMetadata> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid tag JSON in {}", path.display()))
}

/// Compare two tag files and fail if the score misses the file lookup threshold.
async fn compare_tags(left: &Path, right: &Path, matching: &MatchingConfig) -> Result<f32> {
    let left = read_metadata(left)?;
    let right = read_metadata(right)?;
    let weights = matching.weights.clone();
    let ignored = matching.compare_ignore_tags.clone();

    let score = task::spawn_blocking(move || left.compare(&right, &weights, &ignored))
        .await
        .context("tag comparison task failed")??;
    debug!(target: "cli", score, "compared tag sets");

    if score < matching.file_lookup_threshold {
        bail!(
            "tag similarity {score:.4} below file lookup threshold {:.2}",
            matching.file_lookup_threshold
        );
    }
    Ok(score)
}

/// Score two strings on the blocking pool so the runtime stays responsive.
async fn compare(left: String, right: String, options: ScoreOptions) -> Result<f32> {
    let score = task::spawn_blocking(move || options.score(&left, &right))
        .await
        .context("similarity task failed")?;
    debug!(target: "cli", score, "compared strings");
    Ok(score)
}

async fn rank(
    query: String,
    candidates: Vec<String>,
    options: ScoreOptions,
) -> Result<Vec<ScoredCandidate<String>>> {
    let ranked = task::spawn_blocking(move || {
        let scored = candidates.into_iter().map(|candidate| {
            let score = options.score(&query, &candidate);
            ScoredCandidate::new(candidate, score)
        });
        sort_by_similarity(scored)
    })
    .await
    .context("ranking task failed")?;

    debug!(target: "cli", candidates = ranked.len(), "ranked candidates");
    Ok(ranked)
}
