use std::process::ExitCode;

use clap::Parser;
use rmq_bench::Config;
use tracing_subscriber::EnvFilter;

/// Benchmark static range maximum tables against each other
#[derive(clap::Parser)]
struct Args {
    /// Number of elements (default: 2^20)
    #[arg(short, long)]
    len: Option<usize>,

    /// Number of queries in a batch (default: 2^10)
    #[arg(short, long)]
    queries: Option<usize>,

    /// Seed of values and queries (default: 5489)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seed of the shuffled block boundaries (default: 42)
    #[arg(long)]
    policy_seed: Option<u64>,

    /// Divide every repeat count by 2^SHIFT
    #[arg(short, long, value_name = "SHIFT")]
    repeat_shift: Option<u32>,
}

impl Args {
    fn into_config(self) -> Config {
        let default = Config::default();
        Config {
            len: self.len.unwrap_or(default.len),
            queries: self.queries.unwrap_or(default.queries),
            seed: self.seed.unwrap_or(default.seed),
            policy_seed: self.policy_seed.unwrap_or(default.policy_seed),
            repeat_shift: self.repeat_shift.unwrap_or(default.repeat_shift),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Args::parse().into_config();
    let report = match rmq_bench::sweep(&config) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, source = ?std::error::Error::source(&e), "sweep failed");
            return ExitCode::FAILURE;
        }
    };
    print!("{report}");

    if report.has_divergence() {
        let names: Vec<_> = report.divergences().collect();
        tracing::error!(?names, "tables diverge from the reference");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
