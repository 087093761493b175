use anyhow::Context;
use clap::{Parser, ValueEnum};
use coreperf::experiment::{Experiment, ExperimentConfig, ResultSet};
use coreperf::report::{display, Reporter};
use coreperf::Backend;
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "coreperf=info";

#[derive(Debug, Parser)]
#[command(
    name = "coreperf",
    version,
    about = "Measure how sort, dense multiply and table aggregation scale with CPU cores"
)]
struct CliArgs {
    /// Open the chart in the default image viewer when done
    #[arg(long)]
    show: bool,

    /// Seed for input generation (random each run if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the CSV and chart
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Override the detected core count
    #[arg(long)]
    total_cores: Option<usize>,

    /// Kernel for the dense multiply
    #[arg(long, value_enum, default_value_t = BackendArg::CostBased)]
    backend: BackendArg,

    /// Do not export OMP_NUM_THREADS for each configuration
    #[arg(long)]
    no_omp_hint: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    CostBased,
    Scalar,
    Simd,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::CostBased => Self::CostBased,
            BackendArg::Scalar => Self::Scalar,
            BackendArg::Simd => Self::Simd,
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing();

    let mut builder = ExperimentConfig::builder()
        .backend(args.backend.into())
        .export_hint(!args.no_omp_hint);
    if let Some(total) = args.total_cores {
        builder = builder.total_cores(total);
    }
    let config = builder.build().context("Invalid experiment configuration")?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let experiment = Experiment::new(config);
    let mut results = ResultSet::new();
    for limit in experiment.configurations().limits() {
        println!("Running tests with {} CPU cores...", limit.cores());
        let record = experiment
            .run_configuration(limit, &mut rng)
            .with_context(|| format!("Experiment aborted at {} CPU cores", limit.cores()))?;
        results.push(record);
    }
    results.finish();

    let reporter = Reporter::new(&args.output_dir);
    let paths = reporter
        .report(&results)
        .with_context(|| format!("Failed to write reports to {}", args.output_dir.display()))?;

    println!(
        "Experiment completed. Results saved to '{}'.",
        paths.csv.display()
    );

    if args.show {
        display::open(&paths.chart).context("Could not show the chart")?;
        info!(path = %paths.chart.display(), "Opened chart");
    }

    Ok(())
}
