use crate::ingest::TpsAccumulator;
use itertools::{iproduct, Itertools};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("No samples were ingested, nothing to plot")]
    Empty,
    #[error("Data is sparse: no samples for (load, len) {}", format_missing(.missing))]
    Sparse { missing: Vec<(i64, i64)> },
}

/// diagnostic list of unmeasured (load, len) combinations
fn format_missing(missing: &[(i64, i64)]) -> String {
    missing
        .iter()
        .map(|(load, len)| format!("({load}, {len})"))
        .join(", ")
}

#[derive(Debug, Clone, PartialEq)]
/// dense matrix of mean throughput in thousands/sec;
/// rows follow `lens`, columns follow `loads`
pub struct TpsGrid {
    pub loads: Vec<i64>,
    pub lens: Vec<i64>,
    pub cells: Vec<Vec<f64>>,
}

impl TpsGrid {
    /// build the dense matrix, failing up front if any (load, len)
    /// combination referenced by the axes was never measured
    pub fn build(accumulator: &TpsAccumulator) -> Result<Self, GridError> {
        if accumulator.is_empty() {
            return Err(GridError::Empty);
        }

        let loads = accumulator.loads();
        let lens = accumulator.lens();

        // an unmeasured cell must fail, not render as zero throughput
        let missing = iproduct!(lens.iter(), loads.iter())
            .filter(|(&len, &load)| accumulator.mean(load, len).is_none())
            .map(|(&len, &load)| (load, len))
            .collect_vec();

        if !missing.is_empty() {
            return Err(GridError::Sparse { missing });
        }

        // lookups cannot fail past this point
        let cells = lens
            .iter()
            .map(|&len| {
                loads
                    .iter()
                    .map(|&load| accumulator.mean(load, len).unwrap_or_default())
                    .collect_vec()
            })
            .collect_vec();

        debug!(
            rows = lens.len(),
            columns = loads.len(),
            "Built throughput grid"
        );

        Ok(Self { loads, lens, cells })
    }

    /// smallest and largest cell value, for the color scale
    pub fn value_range(&self) -> (f64, f64) {
        self.cells
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &value| {
                (min.min(value), max.max(value))
            })
    }
}
