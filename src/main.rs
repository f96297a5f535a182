use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use vocalign_batch::{BatchConfig, FailurePolicy, SortOrder};
use vocalign_dtw::{Metric, SolverMode, align_sequences};
use vocalign_io::{ExperimentName, ResultWriter, SequenceReader};

#[derive(Parser)]
#[command(name = "vocalign")]
#[command(about = "Dynamic time warping alignment of speech and articulatory feature sequences")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Output location shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
    #[arg(long)]
    experiment: String,

    /// Output directory for result files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Align one candidate against a reference and write the warping path
    Align {
        /// Reference frame CSV (header row, one frame per row)
        #[arg(long)]
        reference: PathBuf,

        /// Candidate frame CSV
        #[arg(long)]
        candidate: PathBuf,

        /// Frame distance: "cosine" or "euclidean"
        #[arg(long, default_value = "cosine")]
        metric: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compare many candidates against one reference and write the cost table
    Compare {
        /// Reference frame CSV (header row, one frame per row)
        #[arg(long)]
        reference: PathBuf,

        /// Candidate frame CSV; repeat for each candidate (labelled by file stem)
        #[arg(long, required = true)]
        candidate: Vec<PathBuf>,

        /// Frame distance: "cosine" or "euclidean"
        #[arg(long, default_value = "cosine")]
        metric: String,

        /// Solver: "path" (explicit warping path) or "aggregate" (cost only)
        #[arg(long, default_value = "path")]
        mode: String,

        /// Failed candidates: "zero" (zero-cost row), "drop", or "strict" (abort)
        #[arg(long, default_value = "zero")]
        on_failure: String,

        /// Row order: "input", "label", "raw-cost", or "normalized-cost"
        #[arg(long, default_value = "input")]
        sort: String,

        /// Tag written into every row (e.g. prompt or phone)
        #[arg(long, default_value = "")]
        tag: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct AlignOutput {
    experiment: String,
    reference: String,
    candidate: String,
    metric: &'static str,
    reference_len: usize,
    candidate_len: usize,
    path_len: usize,
    raw_cost: f64,
    normalized_cost: f64,
    artifact: PathBuf,
}

#[derive(Serialize)]
struct CompareOutput {
    experiment: String,
    reference: String,
    metric: &'static str,
    mode: &'static str,
    n_candidates: usize,
    n_rows: usize,
    n_failed: usize,
    artifacts: Vec<PathBuf>,
}

fn parse_metric(s: &str) -> Result<Metric> {
    s.parse::<Metric>()
        .map_err(|_| anyhow::anyhow!("unknown metric: {s} (expected cosine or euclidean)"))
}

fn parse_mode(s: &str) -> Result<SolverMode> {
    s.parse::<SolverMode>()
        .map_err(|_| anyhow::anyhow!("unknown mode: {s} (expected path or aggregate)"))
}

fn parse_failure_policy(s: &str) -> Result<FailurePolicy> {
    match s {
        "zero" => Ok(FailurePolicy::ZeroFill),
        "drop" => Ok(FailurePolicy::Drop),
        "strict" => Ok(FailurePolicy::Strict),
        other => anyhow::bail!("unknown failure policy: {other} (expected zero, drop, or strict)"),
    }
}

fn parse_sort(s: &str) -> Result<SortOrder> {
    match s {
        "input" => Ok(SortOrder::Input),
        "label" => Ok(SortOrder::Label),
        "raw-cost" => Ok(SortOrder::RawCost),
        "normalized-cost" => Ok(SortOrder::NormalizedCost),
        other => anyhow::bail!(
            "unknown sort order: {other} (expected input, label, raw-cost, or normalized-cost)"
        ),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Align {
            reference,
            candidate,
            metric,
            output,
        } => {
            let metric = parse_metric(&metric)?;
            let experiment_name = ExperimentName::new(output.experiment.clone())?;

            let reference_reader = SequenceReader::new(&reference);
            let candidate_reader = SequenceReader::new(&candidate);
            let x = reference_reader
                .read()
                .context("failed to read reference CSV")?;
            let y = candidate_reader
                .read()
                .context("failed to read candidate CSV")?;

            let result = align_sequences(&x, &y, metric).context("alignment failed")?;

            let writer = ResultWriter::new(&output.output_dir, experiment_name)?;
            let candidate_label = candidate_reader.label();
            let artifact = writer.write_alignment(&candidate_label, &result)?;

            let summary = AlignOutput {
                experiment: output.experiment,
                reference: reference_reader.label(),
                candidate: candidate_label,
                metric: metric.as_str(),
                reference_len: result.reference_len,
                candidate_len: result.candidate_len,
                path_len: result.path.as_ref().map_or(0, |p| p.len()),
                raw_cost: result.raw_cost,
                normalized_cost: result.normalized_cost,
                artifact,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Command::Compare {
            reference,
            candidate,
            metric,
            mode,
            on_failure,
            sort,
            tag,
            output,
        } => {
            let metric = parse_metric(&metric)?;
            let mode = parse_mode(&mode)?;
            let config = BatchConfig::new(metric)
                .with_mode(mode)
                .with_failure_policy(parse_failure_policy(&on_failure)?)
                .with_sort(parse_sort(&sort)?)
                .with_tag(tag);
            let experiment_name = ExperimentName::new(output.experiment.clone())?;

            let reference_reader = SequenceReader::new(&reference);
            let x = reference_reader
                .read()
                .context("failed to read reference CSV")?;

            let candidates = candidate
                .iter()
                .map(|path| {
                    let reader = SequenceReader::new(path);
                    let seq = reader
                        .read()
                        .with_context(|| format!("failed to read candidate {}", path.display()))?;
                    Ok((reader.label(), seq))
                })
                .collect::<Result<Vec<_>>>()?;
            info!(n_candidates = candidates.len(), "candidates loaded");

            let records = config
                .compare_to_reference(&x, &candidates)
                .context("comparison failed")?;

            let writer = ResultWriter::new(&output.output_dir, experiment_name)?;
            let reference_label = reference_reader.label();
            let artifacts = vec![
                writer.write_comparison(&reference_label, &records)?,
                writer.write_comparison_csv(&records)?,
            ];

            let summary = CompareOutput {
                experiment: output.experiment,
                reference: reference_label,
                metric: metric.as_str(),
                mode: mode.as_str(),
                n_candidates: candidates.len(),
                n_rows: records.len(),
                n_failed: records.iter().filter(|r| r.is_failed()).count(),
                artifacts,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
