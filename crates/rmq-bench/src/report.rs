//! Comparison of measurements against the first one recorded

use std::fmt;

use crate::measure::Measurement;

/// Outcome of checking a measurement against the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The first measurement, which all others are checked against
    Reference,
    /// Same average answer as the reference
    Agrees,
    /// Different average answer than the reference
    Diverges,
}

#[derive(Debug, Clone)]
pub struct Row {
    pub measurement: Measurement,
    pub verdict: Verdict,
}

/// Table of measurements, the first one being the reference.
#[derive(Debug, Clone, Default)]
pub struct Report {
    rows: Vec<Row>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `measurement` against the reference and append it to the report.
    ///
    /// A divergence is logged and recorded, it never stops the caller from recording more.
    pub fn record(&mut self, measurement: Measurement) -> Verdict {
        let verdict = match self.reference() {
            None => Verdict::Reference,
            Some(reference) if reference.per_query() == measurement.per_query() => Verdict::Agrees,
            Some(reference) => {
                tracing::warn!(
                    name = %measurement.name,
                    reference = %reference.name,
                    expected = %reference.per_query(),
                    actual = %measurement.per_query(),
                    value = measurement.value,
                    queries = measurement.queries,
                    "answers diverge from the reference"
                );
                Verdict::Diverges
            }
        };
        self.rows.push(Row {
            measurement,
            verdict,
        });
        verdict
    }

    pub fn reference(&self) -> Option<&Measurement> {
        self.rows.first().map(|row| &row.measurement)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Names of all measurements which diverge from the reference.
    pub fn divergences(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter(|row| row.verdict == Verdict::Diverges)
            .map(|row| row.measurement.name.as_str())
    }

    pub fn has_divergence(&self) -> bool {
        self.divergences().next().is_some()
    }
}

/// A time relative to the reference time, rendered as a rounded percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    pub reference: u128,
    pub value: u128,
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.reference, self.value) {
            (0, 0) => f.write_str("  100 %"),
            (0, _) => f.write_str("    inf"),
            (reference, value) => {
                // Rounds half up
                let percent = (value * 200 + reference) / (reference * 2);
                write!(f, "{percent:>5} %")
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "build time\t\tquery time\t\ttime for 1e10 query")?;
        let Some(reference) = self.reference() else {
            return Ok(());
        };
        for Row { measurement, .. } in &self.rows {
            let build = Ratio {
                reference: reference.build.as_millis(),
                value: measurement.build.as_millis(),
            };
            let normalized = Ratio {
                reference: reference.per_1e10_queries().as_millis(),
                value: measurement.per_1e10_queries().as_millis(),
            };
            let query = format!("{}({})", measurement.query.as_millis(), measurement.queries);
            writeln!(
                f,
                "{:<8}{build}\t\t{query:<16}\t{:<8}{normalized}\t\t{}\t{}",
                build.value, normalized.value, measurement.name, measurement.value,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::time::Duration;

    use super::*;

    fn measurement(name: &str, value: u128, queries: u64, millis: u64) -> Measurement {
        Measurement {
            name: name.to_owned(),
            value,
            queries,
            build: Duration::from_millis(millis),
            query: Duration::from_millis(millis),
        }
    }

    #[test]
    fn test_ratio() {
        let ratio = |reference, value| Ratio { reference, value }.to_string();
        assert_eq!(ratio(50, 50), "  100 %");
        assert_eq!(ratio(50, 60), "  120 %");
        assert_eq!(ratio(50, 4), "    8 %");
        assert_eq!(ratio(2086, 115394), " 5532 %");
        assert_eq!(ratio(2086, 328063), "15727 %");
        assert_eq!(ratio(0, 0), "  100 %");
        assert_eq!(ratio(0, 5), "    inf");
        assert_eq!(ratio(5, 0), "    0 %");
    }

    #[test]
    fn test_record_continues_after_divergence() {
        let mut report = Report::new();
        assert_eq!(report.record(measurement("a", 300, 3, 10)), Verdict::Reference);
        assert_eq!(report.record(measurement("b", 301, 3, 20)), Verdict::Diverges);
        // Scaled by repeats, same average as the reference
        assert_eq!(report.record(measurement("c", 1200, 12, 30)), Verdict::Agrees);

        assert_eq!(report.rows().len(), 3);
        assert_eq!(report.reference().unwrap().name, "a");
        assert_eq!(report.divergences().collect::<Vec<_>>(), ["b"]);
        assert!(report.has_divergence());
    }

    #[test]
    fn test_exact_comparison() {
        // Cross multiplication of these would overflow u128
        let big = u128::MAX / 3;
        let mut report = Report::new();
        report.record(measurement("a", big, u64::MAX, 1));
        assert_eq!(report.record(measurement("b", big, u64::MAX, 1)), Verdict::Agrees);
        assert_eq!(report.record(measurement("c", big - 1, u64::MAX, 1)), Verdict::Diverges);
    }

    #[test]
    fn test_display() {
        let mut report = Report::new();
        report.record(measurement("a", 10, 1 << 20, 100));
        report.record(measurement("b", 10, 1 << 20, 200));
        let text = report.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "build time\t\tquery time\t\ttime for 1e10 query");
        assert!(lines[1].starts_with("100       100 %\t\t100(1048576)    \t953674    100 %"));
        assert!(lines[2].starts_with("200       200 %\t\t200(1048576)    \t1907348   200 %"));
        assert!(lines[2].ends_with("\t\tb\t10"));
        assert_eq!(Report::new().to_string().lines().count(), 1);
    }
}
