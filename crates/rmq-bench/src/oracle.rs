//! Exact comparison of benchmark results with different query counts

use std::fmt;

/// The average answer of a measurement as an exact, reduced fraction `value / queries`.
///
/// Measurements of the same computation repeated a different number of times have equal
/// averages, so two tables agree iff their `PerQuery` are equal. Unlike comparing
/// `value_a * queries_b` with `value_b * queries_a`, this never overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PerQuery {
    numer: u128,
    denom: u128,
}

impl PerQuery {
    /// # Panics
    ///
    /// If `queries` is zero.
    pub fn new(value: u128, queries: u64) -> Self {
        assert!(queries > 0, "Average of zero queries is undefined");
        let denom = u128::from(queries);
        let g = gcd(value, denom);
        Self {
            numer: value / g,
            denom: denom / g,
        }
    }

    pub fn numer(&self) -> u128 {
        self.numer
    }

    pub fn denom(&self) -> u128 {
        self.denom
    }
}

impl fmt::Display for PerQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer, self.denom)
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
