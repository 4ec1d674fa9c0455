//! edgerank CLI - PageRank scores for edge-list files.
//!
//! # Usage
//!
//! ```bash
//! # One score per line, in sorted node order
//! edgerank rank graph.txt 0.85
//!
//! # Keys, a trailing sum line, and the pull solver on all cores
//! edgerank rank graph.txt 0.85 --keys --sum --strategy pull --parallel
//!
//! # Generate a random 10k-node dataset
//! edgerank generate 10000 graph.txt --max-outgoing 8 --seed 42
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use edgerank::dataset::{self, DatasetConfig};
use edgerank::pipeline::spec::RunSpec;
use edgerank::{
    KeyOrder, PageRankConfig, Pipeline, RankReport, ResultFormatter, ScoreFormatter, Strategy,
};

#[derive(Parser)]
#[command(name = "edgerank")]
#[command(about = "PageRank over directed edge lists", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute PageRank scores for an edge-list file
    Rank {
        /// Input file, one `source:target1,target2,...` record per line
        input: PathBuf,

        /// Damping factor between 0 and 1
        #[arg(allow_hyphen_values = true, allow_negative_numbers = true)]
        damping: String,

        /// JSON run spec; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Iteration cap
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Convergence tolerance on the max per-node change
        #[arg(long)]
        tolerance: Option<f64>,

        /// Solver formulation (push or pull)
        #[arg(long)]
        strategy: Option<Strategy>,

        /// Node ordering (auto, numeric or lexicographic)
        #[arg(long)]
        key_order: Option<KeyOrder>,

        /// Run the pull gather in parallel on large graphs
        #[arg(long)]
        parallel: bool,

        /// Print `key<TAB>score` instead of bare scores
        #[arg(long)]
        keys: bool,

        /// Print the score sum as a final line
        #[arg(long)]
        sum: bool,

        /// Print scores even when the iteration cap was hit
        #[arg(long)]
        allow_unconverged: bool,
    },

    /// Write a random edge-list dataset
    Generate {
        /// Number of nodes
        nodes: usize,

        /// Output file
        output: PathBuf,

        /// Maximum outgoing edges per node
        #[arg(long, default_value_t = dataset::DEFAULT_MAX_OUTGOING)]
        max_outgoing: usize,

        /// Probability that a node has no outgoing edges
        #[arg(long, default_value_t = dataset::DEFAULT_DANGLING_PROBABILITY)]
        dangling_probability: f64,

        /// Random seed (omit for a fresh random graph)
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("{e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Rank {
            input,
            damping,
            config,
            max_iterations,
            tolerance,
            strategy,
            key_order,
            parallel,
            keys,
            sum,
            allow_unconverged,
        } => {
            let mut cfg = match config {
                Some(path) => load_spec(&path)?,
                None => PageRankConfig::default(),
            };
            cfg.damping = damping
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("Damping factor must be a number between 0 and 1"))?;
            if let Some(n) = max_iterations {
                cfg.max_iterations = n;
            }
            if let Some(t) = tolerance {
                cfg.tolerance = t;
            }
            if let Some(s) = strategy {
                cfg.strategy = s;
            }
            if let Some(k) = key_order {
                cfg.key_order = k;
            }
            cfg.parallel |= parallel;

            let formatter = ScoreFormatter::new().with_keys(keys).with_sum(sum);
            rank_file(&input, cfg, &formatter, allow_unconverged)
        }
        Commands::Generate {
            nodes,
            output,
            max_outgoing,
            dangling_probability,
            seed,
        } => {
            let cfg = DatasetConfig::new(nodes)
                .with_max_outgoing(max_outgoing)
                .with_dangling_probability(dangling_probability);
            generate_file(&output, &cfg, seed)
        }
    }
}

fn load_spec(path: &Path) -> Result<PageRankConfig> {
    let spec = RunSpec::from_path(path)?;
    let report = spec.unknown_field_report();
    for diag in report.warnings() {
        warn!(%diag, "run spec warning");
    }
    report.into_result()?;
    Ok(spec.apply(PageRankConfig::default()))
}

fn rank_file(
    input: &Path,
    cfg: PageRankConfig,
    formatter: &ScoreFormatter,
    allow_unconverged: bool,
) -> Result<()> {
    let pipeline = Pipeline::new(cfg)?;

    if !input.exists() {
        bail!("File not found: {}", input.display());
    }
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        bail!("Input file is empty");
    }

    let report = pipeline.run_lines(&lines)?;
    info!(
        nodes = report.keys.len(),
        iterations = report.result.iterations,
        converged = report.result.converged,
        "ranked {}",
        input.display()
    );

    let report = if allow_unconverged {
        report
    } else {
        RankReport {
            keys: report.keys,
            result: report.result.require_converged()?,
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    formatter.write_report(&report, &mut out)?;
    out.flush()?;
    Ok(())
}

fn generate_file(output: &Path, cfg: &DatasetConfig, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let records = dataset::generate(cfg, &mut rng)?;

    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut out = BufWriter::new(file);
    dataset::write_records(&records, &mut out)?;
    out.flush()?;

    info!(nodes = cfg.nodes, output = %output.display(), "wrote dataset");
    Ok(())
}
