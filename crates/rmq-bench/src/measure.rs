//! Workload generation and timing of a single table

use std::{
    hint::black_box,
    time::{Duration, Instant},
};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use range_table::RangeQuery;

use crate::{Config, Error, Result, oracle::PerQuery};

/// Values and query ranges a table is measured with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub values: Vec<u32>,
    pub ranges: Vec<(usize, usize)>,
}

impl Workload {
    /// Generate a workload from a fresh generator seeded with `config.seed`.
    ///
    /// Every call with the same configuration returns the same workload, so all tables of a
    /// sweep answer the same queries over the same values.
    pub fn generate(config: &Config) -> Self {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let values = (0..config.len).map(|_| rng.random()).collect();
        let ranges = (0..config.queries)
            .map(|_| {
                let a = rng.random_range(0..config.len);
                let b = rng.random_range(0..config.len);
                if a > b { (b, a) } else { (a, b) }
            })
            .collect();
        Self { values, ranges }
    }
}

/// Result of measuring one table
#[derive(Debug, Clone)]
pub struct Measurement {
    pub name: String,
    /// Sum of all answers over all repeats
    pub value: u128,
    /// Number of answered queries over all repeats
    pub queries: u64,
    pub build: Duration,
    pub query: Duration,
}

impl Measurement {
    /// Query time extrapolated to `10^10` queries.
    pub fn per_1e10_queries(&self) -> Duration {
        if self.queries == 0 {
            return Duration::ZERO;
        }
        let nanos = self.query.as_nanos() * 10_000_000_000 / u128::from(self.queries);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Average answer, comparable between measurements with different repeat counts.
    pub fn per_query(&self) -> PerQuery {
        PerQuery::new(self.value, self.queries.max(1))
    }
}

/// Build a table from the workload, then answer its queries `repeat` times.
pub fn measure<R, B>(name: &str, workload: &Workload, repeat: u32, build: B) -> Result<Measurement>
where
    R: RangeQuery<u32>,
    B: FnOnce(&[u32]) -> range_table::Result<R>,
{
    let start = Instant::now();
    let table = build(&workload.values).map_err(|source| Error::Build {
        name: name.to_owned(),
        source,
    })?;
    let build = start.elapsed();

    let start = Instant::now();
    let mut value = 0u128;
    for _ in 0..repeat {
        let mut sum = 0u64;
        for &(left, right) in &workload.ranges {
            sum += u64::from(table.query(left, right));
        }
        // Every batch goes through an opaque sink, so no query can be optimized away
        value = black_box(value + u128::from(sum));
    }
    let query = start.elapsed();

    Ok(Measurement {
        name: name.to_owned(),
        value,
        queries: u64::from(repeat) * workload.ranges.len() as u64,
        build,
        query,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use range_table::prelude::*;

    use super::*;

    fn small_config() -> Config {
        Config {
            len: 1000,
            queries: 64,
            ..Default::default()
        }
    }

    #[test]
    fn test_workload_deterministic() {
        let config = small_config();
        let a = Workload::generate(&config);
        let b = Workload::generate(&config);
        assert_eq!(a, b);
        assert_eq!(a.values.len(), 1000);
        assert_eq!(a.ranges.len(), 64);
        assert!(a.ranges.iter().all(|&(l, r)| l <= r && r < 1000));

        let other = Workload::generate(&Config {
            seed: 1,
            ..small_config()
        });
        assert_ne!(a, other);
    }

    #[test]
    fn test_measure() {
        let workload = Workload::generate(&small_config());
        let expected: u128 = workload
            .ranges
            .iter()
            .map(|&(l, r)| u128::from(fold_range(&workload.values, &Max, l, r)))
            .sum();

        let m = measure("sparse", &workload, 3, |v| SparseTable::new(v, Max)).unwrap();
        assert_eq!(m.name, "sparse");
        assert_eq!(m.queries, 3 * 64);
        assert_eq!(m.value, 3 * expected);

        let m2 = measure("mask", &workload, 5, |v| MaskTable::new(v, Max)).unwrap();
        assert_eq!(m.per_query(), m2.per_query());
    }

    #[test]
    fn test_build_error() {
        let workload = Workload {
            values: Vec::new(),
            ranges: Vec::new(),
        };
        let err = measure("sparse", &workload, 1, |v| SparseTable::new(v, Max)).unwrap_err();
        assert!(matches!(err, Error::Build { ref name, .. } if name == "sparse"));
    }

    #[test]
    fn test_per_1e10_queries() {
        let m = Measurement {
            name: "t".to_owned(),
            value: 0,
            queries: 1 << 20,
            build: Duration::ZERO,
            query: Duration::from_millis(100),
        };
        // 100ms for 2^20 queries is about 953.67s for 10^10 queries
        assert_eq!(m.per_1e10_queries().as_secs(), 953);
    }
}
