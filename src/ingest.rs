use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

/// line layout emitted by the rw_tps benchmark; only fields 0, 1 and 3 are
/// consumed, `txs=` and everything after `tps=` is carried but never read
const FIELD_NAMES: [&str; 4] = ["load", "len", "txs", "tps"];
const TPS_FIELD: usize = 3;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to open data file {path:?}: {source}")]
    OpenData { path: PathBuf, source: io::Error },
    #[error("Failed to read from data file")]
    ReadData(#[from] io::Error),
    #[error("Line {line}: expected at least {} fields, found {found}", FIELD_NAMES.len())]
    MissingFields { line: usize, found: usize },
    #[error("Line {line}: field `{field}` is not of the form name=value")]
    MalformedField { line: usize, field: String },
    #[error("Line {line}: failed to parse `{value}` as the {name} value")]
    InvalidNumber {
        line: usize,
        name: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// one parsed measurement line
pub struct Sample {
    pub load: i64,
    pub len: i64,
    pub tps: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct Aggregate {
    /// running sum of tps values, already scaled to thousands/sec
    sum: f64,
    count: u64,
}

#[derive(Debug, Default)]
/// running per-(load, len) mean throughput plus the two sorted key projections
pub struct TpsAccumulator {
    cells: BTreeMap<(i64, i64), Aggregate>,
    loads: BTreeSet<i64>,
    lens: BTreeSet<i64>,
}

impl TpsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// fold one measurement into the running mean for its (load, len) cell;
    /// tps is scaled to thousands of transactions per second on the way in
    pub fn record(&mut self, sample: Sample) {
        self.loads.insert(sample.load);
        self.lens.insert(sample.len);

        let aggregate = self.cells.entry((sample.load, sample.len)).or_default();
        aggregate.sum += sample.tps / 1000.0;
        aggregate.count += 1;
    }

    /// distinct load levels, ascending
    pub fn loads(&self) -> Vec<i64> {
        self.loads.iter().copied().collect()
    }

    /// distinct message lengths, ascending
    pub fn lens(&self) -> Vec<i64> {
        self.lens.iter().copied().collect()
    }

    /// mean throughput in thousands/sec, None if the pair was never measured
    pub fn mean(&self, load: i64, len: i64) -> Option<f64> {
        self.cells
            .get(&(load, len))
            .map(|aggregate| aggregate.sum / aggregate.count as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// split a `name=value` field and parse the value
fn field_value<'a>(
    fields: &[&'a str],
    index: usize,
    line: usize,
) -> Result<&'a str, IngestError> {
    let field = fields[index];

    match field.split_once('=') {
        Some((_, value)) => Ok(value),
        None => Err(IngestError::MalformedField {
            line,
            field: field.to_string(),
        }),
    }
}

/// parse one measurement line, `line` is 1-based and only used for diagnostics
pub fn parse_line(input: &str, line: usize) -> Result<Sample, IngestError> {
    let fields: Vec<&str> = input.split_whitespace().collect();

    if fields.len() <= TPS_FIELD {
        return Err(IngestError::MissingFields {
            line,
            found: fields.len(),
        });
    }

    let load = field_value(&fields, 0, line)?;
    let load: i64 = load.parse().map_err(|_| IngestError::InvalidNumber {
        line,
        name: FIELD_NAMES[0],
        value: load.to_string(),
    })?;

    let len = field_value(&fields, 1, line)?;
    let len: i64 = len.parse().map_err(|_| IngestError::InvalidNumber {
        line,
        name: FIELD_NAMES[1],
        value: len.to_string(),
    })?;

    let tps = field_value(&fields, TPS_FIELD, line)?;
    let tps: f64 = tps.parse().map_err(|_| IngestError::InvalidNumber {
        line,
        name: FIELD_NAMES[TPS_FIELD],
        value: tps.to_string(),
    })?;

    Ok(Sample { load, len, tps })
}

/// single pass over the data file, accumulating per-cell means
pub fn ingest_file(path: &Path) -> Result<TpsAccumulator, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::OpenData {
        path: path.to_path_buf(),
        source,
    })?;

    let mut accumulator = TpsAccumulator::new();
    let mut samples = 0usize;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        accumulator.record(parse_line(&line?, index + 1)?);
        samples += 1;
    }

    debug!(
        samples,
        loads = accumulator.loads.len(),
        lens = accumulator.lens.len(),
        "Ingested data file"
    );

    Ok(accumulator)
}
