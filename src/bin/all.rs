//! Generic CLI for running the benchmark sweeps.
//!
//! Usage:
//!   reduction-bench                          # Run every family on its default sweep
//!   reduction-bench --list                   # List available algorithms
//!   reduction-bench sum --size 4096          # One size, 1000 runs per variant
//!   reduction-bench column_dot --sizes 256,1024 --runs 20
//!   reduction-bench sum --variants two_way_sum,blocked_unrolled_sum --no-csv
//!   reduction-bench sum --cycles            # Add a cycles-per-element column

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;

use reduction_bench::registry::{build_registry, AlgorithmRunner};
use reduction_bench::tui;
use reduction_bench::utils::{run_experiment, CsvSink, ExperimentConfig, PinStrategy};
use reduction_bench::{BenchError, Result};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PinArg {
    Global,
    PerRepetition,
    Off,
}

impl From<PinArg> for PinStrategy {
    fn from(arg: PinArg) -> Self {
        match arg {
            PinArg::Global => PinStrategy::Global,
            PinArg::PerRepetition => PinStrategy::PerRepetition,
            PinArg::Off => PinStrategy::Off,
        }
    }
}

/// Summation and column dot-product micro-benchmarks across cache levels
#[derive(Parser, Debug)]
#[command(name = "reduction-bench")]
#[command(about = "Time summation and column dot-product variants across input sizes")]
#[command(version)]
struct Args {
    /// Algorithm family to run (sum, column_dot); omit for all
    algorithm: Option<String>,

    /// Run a single input size instead of the default sweep
    #[arg(long, conflicts_with = "sizes")]
    size: Option<usize>,

    /// Comma-separated input sizes (overrides the default sweep)
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,

    /// Timed repetitions per variant (default depends on family and mode)
    #[arg(short, long)]
    runs: Option<usize>,

    /// Untimed runs before measuring each variant
    #[arg(long, default_value_t = 0)]
    warmup: usize,

    /// Comma-separated variants to run; the baseline is always included
    #[arg(long, value_delimiter = ',', requires = "algorithm")]
    variants: Option<Vec<String>>,

    /// Seed for input generation
    #[arg(long, default_value_t = reduction_bench::utils::DEFAULT_SEED)]
    seed: u64,

    /// Directory for `<algorithm>_results.csv` files
    #[arg(long, default_value = ".")]
    csv_dir: PathBuf,

    /// Skip writing CSV output files
    #[arg(long)]
    no_csv: bool,

    /// Report cycles per element (console column and `<variant>_cpe` CSV columns)
    #[arg(long)]
    cycles: bool,

    /// CPU pinning during measurements
    #[arg(long, value_enum, default_value = "global")]
    pin: PinArg,

    /// List available algorithms and exit
    #[arg(short, long)]
    list: bool,
}

struct Plan<'r> {
    algo: &'r dyn AlgorithmRunner,
    config: ExperimentConfig,
    selected: Vec<&'static str>,
    sink: Option<CsvSink>,
}

fn build_config(algo: &dyn AlgorithmRunner, args: &Args) -> ExperimentConfig {
    let mut config = match (args.size, &args.sizes) {
        (Some(size), _) => ExperimentConfig::single(algo, size),
        (None, Some(sizes)) => ExperimentConfig {
            sizes: sizes.clone(),
            ..ExperimentConfig::sweep(algo)
        },
        (None, None) => ExperimentConfig::sweep(algo),
    }
    .with_seed(args.seed);

    if let Some(runs) = args.runs {
        config.timing.repetitions = runs;
    }
    config.timing.warmup_iterations = args.warmup;
    config.timing.pin_strategy = args.pin.into();
    if let Some(variants) = &args.variants {
        config = config.with_variants(variants.clone());
    }
    config
}

fn run(args: &Args) -> Result<()> {
    let registry = build_registry();

    if args.list {
        tui::print_available_algorithms(&registry);
        return Ok(());
    }

    let algos: Vec<&dyn AlgorithmRunner> = match &args.algorithm {
        Some(name) => vec![registry.find(name).ok_or_else(|| BenchError::UnknownAlgorithm {
            name: name.clone(),
            available: registry.list_names().join(", "),
        })?],
        None => registry.all().iter().map(|a| a.as_ref()).collect(),
    };

    // Validate everything and open every results file before the first
    // measurement, so a bad argument or path fails fast.
    let mut plans = Vec::with_capacity(algos.len());
    for algo in algos {
        let config = build_config(algo, args);
        let selected = config.validate(algo)?;
        let sink = if args.no_csv {
            None
        } else {
            let path = args.csv_dir.join(format!("{}_results.csv", algo.name()));
            Some(CsvSink::open(path, &selected, algo.baseline(), args.cycles)?)
        };
        plans.push(Plan {
            algo,
            config,
            selected,
            sink,
        });
    }

    tui::print_header();

    for Plan {
        algo,
        config,
        selected,
        mut sink,
    } in plans
    {
        tui::print_algo_info_box(algo, &selected, &config, args.cycles);
        let runs = config.timing.repetitions;

        let report = run_experiment(algo, &config, |outcome| {
            tui::print_size_outcome(outcome, runs, args.cycles);
            match sink.as_mut() {
                Some(sink) => sink.write_outcome(outcome),
                None => Ok(()),
            }
        })?;

        tui::print_speedup_summary(&report);
        if let Some(sink) = &sink {
            info!("{}: results appended to {}", algo.name(), sink.path().display());
        }
    }

    println!("Note: Speedup is relative to the baseline variant of each family.");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
