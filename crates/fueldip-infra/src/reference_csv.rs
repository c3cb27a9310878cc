//! CSV loaders for the calibration and stick recommendation tables
//!
//! Both files may be comma or semicolon separated; the delimiter is detected
//! from the header line. Cells are trimmed. Numeric cells that do not parse
//! are treated as missing and the row is skipped, not rejected.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use fueldip_domain::model::{FuelTableRow, RecommendationRow};
use fueldip_types::{DataLoadError, TankScope, WingSide};

pub const FUEL_TABLE_COLUMNS: [&str; 6] = [
    "Stick",
    "Pitch",
    "Wing_Side",
    "Roll_Input",
    "Reading",
    "Fuel_Qty",
];

pub const RECOMMENDATION_COLUMNS: [&str; 4] =
    ["Tank_Scope", "Min_Kg", "Max_Kg", "Recommended_Stick"];

const DELIMITERS: [u8; 2] = [b',', b';'];

#[derive(Error, Debug)]
pub enum ReferenceCsvError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("File has no header line")]
    EmptyFile,
}

impl ReferenceCsvError {
    /// Attach the file name for the session-level error
    pub fn into_load_error(self, path: &Path) -> DataLoadError {
        let file = path.display().to_string();
        match self {
            ReferenceCsvError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                DataLoadError::FileNotFound(file)
            }
            ReferenceCsvError::MissingColumn(column) => {
                DataLoadError::MissingColumn { file, column }
            }
            other => DataLoadError::Parse {
                file,
                message: other.to_string(),
            },
        }
    }
}

/// Rows kept from one file plus how many were skipped
#[derive(Debug, Clone)]
pub struct ParsedTable<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
    pub delimiter: u8,
}

/// Load the calibration table (`App_Ready_Fuel_Database.csv`)
pub fn load_fuel_table<P: AsRef<Path>>(
    path: P,
) -> Result<ParsedTable<FuelTableRow>, ReferenceCsvError> {
    let content = fs::read_to_string(path.as_ref())?;
    let table = parse_fuel_table(&content)?;
    log_table("calibration", path.as_ref(), &table);
    Ok(table)
}

/// Load the stick recommendation table (`Master_Stick_Recommendations.csv`)
pub fn load_recommendations<P: AsRef<Path>>(
    path: P,
) -> Result<ParsedTable<RecommendationRow>, ReferenceCsvError> {
    let content = fs::read_to_string(path.as_ref())?;
    let table = parse_recommendations(&content)?;
    log_table("recommendation", path.as_ref(), &table);
    Ok(table)
}

fn log_table<T>(kind: &str, path: &Path, table: &ParsedTable<T>) {
    info!(
        file = %path.display(),
        rows = table.rows.len(),
        delimiter = %(table.delimiter as char),
        "loaded {} table",
        kind
    );
    if table.skipped > 0 {
        warn!(
            file = %path.display(),
            skipped = table.skipped,
            "rows with missing or unparseable values excluded from matching"
        );
    }
}

pub fn parse_fuel_table(content: &str) -> Result<ParsedTable<FuelTableRow>, ReferenceCsvError> {
    let (mut reader, delimiter) = open_reader(content, &FUEL_TABLE_COLUMNS)?;
    let columns = column_indices(reader.headers()?, &FUEL_TABLE_COLUMNS)?;

    let mut rows = Vec::new();
    let mut skipped = 0;
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        match parse_fuel_record(&record, &columns) {
            Some(row) => rows.push(row),
            None => {
                // +2: 0-based index, header is line 1
                debug!(line = row_idx + 2, "skipping calibration row");
                skipped += 1;
            }
        }
    }

    Ok(ParsedTable {
        rows,
        skipped,
        delimiter,
    })
}

pub fn parse_recommendations(
    content: &str,
) -> Result<ParsedTable<RecommendationRow>, ReferenceCsvError> {
    let (mut reader, delimiter) = open_reader(content, &RECOMMENDATION_COLUMNS)?;
    let columns = column_indices(reader.headers()?, &RECOMMENDATION_COLUMNS)?;

    let mut rows = Vec::new();
    let mut skipped = 0;
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        match parse_recommendation_record(&record, &columns) {
            Some(row) => rows.push(row),
            None => {
                debug!(line = row_idx + 2, "skipping recommendation row");
                skipped += 1;
            }
        }
    }

    Ok(ParsedTable {
        rows,
        skipped,
        delimiter,
    })
}

fn parse_fuel_record(record: &csv::StringRecord, columns: &[usize]) -> Option<FuelTableRow> {
    let stick = parse_text(record.get(columns[0]))?;
    let pitch = parse_text(record.get(columns[1]))?;
    let wing_side: WingSide = record.get(columns[2])?.parse().ok()?;
    let roll_input = parse_number(record.get(columns[3]))?;
    let reading = parse_number(record.get(columns[4]))?;
    let fuel_qty = parse_quantity(record.get(columns[5]))?;

    Some(FuelTableRow {
        stick,
        pitch,
        wing_side,
        roll_input,
        reading,
        fuel_qty,
    })
}

fn parse_recommendation_record(
    record: &csv::StringRecord,
    columns: &[usize],
) -> Option<RecommendationRow> {
    let tank_scope: TankScope = record.get(columns[0])?.parse().ok()?;
    let min_kg = parse_number(record.get(columns[1]))?;
    let max_kg = parse_number(record.get(columns[2]))?;
    let recommended_stick = parse_text(record.get(columns[3]))?;

    Some(RecommendationRow {
        tank_scope,
        min_kg,
        max_kg,
        recommended_stick,
    })
}

/// Pick the delimiter whose header row names the most required columns.
fn open_reader<'a>(
    content: &'a str,
    required: &[&str],
) -> Result<(csv::Reader<&'a [u8]>, u8), ReferenceCsvError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let header_line = content
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or(ReferenceCsvError::EmptyFile)?;

    let delimiter = detect_delimiter(header_line, required);
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());
    Ok((reader, delimiter))
}

fn detect_delimiter(header_line: &str, required: &[&str]) -> u8 {
    let found = |delim: u8| {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .delimiter(delim)
            .from_reader(header_line.as_bytes());
        match reader.records().next() {
            Some(Ok(headers)) => required
                .iter()
                .filter(|c| headers.iter().any(|h| h == **c))
                .count(),
            _ => 0,
        }
    };
    // Comma wins ties, so a file naming no required column reports against comma.
    DELIMITERS
        .iter()
        .copied()
        .fold((DELIMITERS[0], 0), |best, delim| {
            let n = found(delim);
            if n > best.1 {
                (delim, n)
            } else {
                best
            }
        })
        .0
}

fn column_indices(
    headers: &csv::StringRecord,
    required: &[&str],
) -> Result<Vec<usize>, ReferenceCsvError> {
    required
        .iter()
        .map(|col| {
            headers
                .iter()
                .position(|h| h == *col)
                .ok_or_else(|| ReferenceCsvError::MissingColumn(col.to_string()))
        })
        .collect()
}

fn parse_text(s: Option<&str>) -> Option<String> {
    let s = s?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Coerce a numeric cell; anything unparseable is missing
fn parse_number(s: Option<&str>) -> Option<f64> {
    s?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_quantity(s: Option<&str>) -> Option<u32> {
    let value = parse_number(s)?.round();
    if (0.0..=f64::from(u32::MAX)).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}
