#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Differential benchmark of the tables in `range_table`
//!
//! Every table is built from the same random `u32` sequence and answers the same batch of
//! random range maximum queries. Timings are compared against the first table of the sweep,
//! and so are the answers: a table whose average answer differs from the reference is
//! reported as diverging, the sweep still runs to the end.

mod config;
mod error;
mod measure;
mod oracle;
mod report;

pub use config::Config;
pub use error::{Error, Result};
pub use measure::{Measurement, Workload, measure};
pub use oracle::PerQuery;
pub use report::{Ratio, Report, Row, Verdict};

use rand::{SeedableRng, rngs::SmallRng};
use range_table::prelude::*;

/// Run every table once with its default repeat count and collect the results.
///
/// Returns an error if the configuration is invalid or a table fails to build. Diverging
/// answers are not an error, they are recorded in the report.
pub fn sweep(config: &Config) -> Result<Report> {
    config.validate()?;
    tracing::info!(
        len = config.len,
        queries = config.queries,
        seed = config.seed,
        "starting sweep"
    );

    let mut report = Report::new();
    run(&mut report, config, "SparseTable<u32, Max>", 1 << 15, |v| {
        SparseTable::new(v, Max)
    })?;
    run(&mut report, config, "DisjointTable<u32, Max>", 1 << 15, |v| {
        DisjointTable::new(v, Max)
    })?;
    run(&mut report, config, "ZkwTree<u32, Max>", 1 << 10, |v| {
        ZkwTree::new(v, Max)
    })?;
    run(&mut report, config, "SegmentTree<u32, Max>", 1 << 9, |v| {
        SegmentTree::new(v, Max)
    })?;
    run(&mut report, config, "MaskTable<u32, Max>", 1 << 14, |v| {
        MaskTable::new(v, Max)
    })?;
    let mut policy = Shuffled(SmallRng::seed_from_u64(config.policy_seed));
    run(&mut report, config, "SqrtTable<u32, Max, Shuffled>", 1 << 15, |v| {
        SqrtTable::with_policy(v, Max, &mut policy)
    })?;
    run(&mut report, config, "SqrtTable<u32, Max, Aligned>", 1 << 15, |v| {
        SqrtTable::new(v, Max)
    })?;

    Ok(report)
}

/// Measure one table on a freshly generated workload and record it.
fn run<R, B>(report: &mut Report, config: &Config, name: &str, repeat: u32, build: B) -> Result<()>
where
    R: RangeQuery<u32>,
    B: FnOnce(&[u32]) -> range_table::Result<R>,
{
    let workload = Workload::generate(config);
    let repeat = config.repeats(repeat);
    let measurement = measure(name, &workload, repeat, build)?;
    tracing::info!(
        table = name,
        repeat,
        build_ms = measurement.build.as_millis() as u64,
        query_ms = measurement.query.as_millis() as u64,
        "measured"
    );
    report.record(measurement);
    Ok(())
}
