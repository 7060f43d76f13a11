// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::ReaderBuilder;
use log::{debug, info};

use crate::errors::JobError;

pub const TARGET_FIELD: &str = "full_target_sequence";
pub const GUIDE_FIELD: &str = "guide_seq";
pub const ID_FIELD: &str = "guide_id";

pub const REQUIRED_FIELDS: [&str; 3] = [TARGET_FIELD, GUIDE_FIELD, ID_FIELD];

/// Cell values read as "no value", same as an empty cell.
pub const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// Tried in this order; the first one that yields more than one column wins.
const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b'\t', b';'];

/// A row-oriented table: one header line, then records padded to the header's width.
#[derive(Debug)]
pub struct Table {
    pub delimiter: u8,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Column positions of the three fields every guide table must have.
#[derive(Debug, Clone, Copy)]
pub struct GuideColumns {
    target: usize,
    guide: usize,
    id: usize,
}

/// One data row, borrowed from its table. `number` is 1-based.
#[derive(Debug, PartialEq)]
pub struct GuideRow<'a> {
    pub number: usize,
    pub target: &'a str,
    pub guide: &'a str,
    pub id: &'a str,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Checks that all of REQUIRED_FIELDS are among the headers. On failure, the error lists
    /// both the missing fields and the ones actually present.
    pub fn require_fields(&self) -> Result<GuideColumns, JobError> {
        match (
            self.column(TARGET_FIELD),
            self.column(GUIDE_FIELD),
            self.column(ID_FIELD),
        ) {
            (Some(target), Some(guide), Some(id)) => Ok(GuideColumns { target, guide, id }),
            _ => Err(JobError::MissingFields {
                missing: REQUIRED_FIELDS
                    .iter()
                    .filter(|f| self.column(f).is_none())
                    .map(|f| f.to_string())
                    .collect(),
                available: self.headers.clone(),
            }),
        }
    }

    /// Rows in file order. NA markers come through as empty cells.
    pub fn guide_rows(&self, cols: GuideColumns) -> impl Iterator<Item = GuideRow<'_>> {
        self.rows.iter().enumerate().map(move |(i, row)| GuideRow {
            number: i + 1,
            target: non_na(&row[cols.target]),
            guide: non_na(&row[cols.guide]),
            id: non_na(&row[cols.id]),
        })
    }
}

impl GuideRow<'_> {
    /// A row needs both a target and a guide sequence; the identifier may be empty. Cells
    /// holding one of NA_MARKERS count as empty.
    pub fn is_valid(&self) -> bool {
        !self.target.is_empty() && !self.guide.is_empty()
    }
}

fn non_na(cell: &str) -> &str {
    if NA_MARKERS.contains(&cell) {
        ""
    } else {
        cell
    }
}

pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table, JobError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(JobError::MissingSource(path.to_path_buf()));
    }

    for &delimiter in CANDIDATE_DELIMITERS.iter() {
        match parse_table(path, delimiter) {
            Ok(table) if table.headers.len() > 1 => {
                info!(
                    "using delimiter {:?}: {} rows, {} columns",
                    delimiter as char,
                    table.len(),
                    table.headers.len()
                );
                return Ok(table);
            }
            Ok(_) => debug!("delimiter {:?} yields a single column", delimiter as char),
            Err(e) => debug!("delimiter {:?} failed: {}", delimiter as char, e),
        }
    }

    let delimiter = sniff_delimiter(path)?;
    info!("falling back to sniffed delimiter {:?}", delimiter as char);
    parse_table(path, delimiter)
}

/// Looks at the first line only: comma if it has one, else tab, else comma anyway.
pub fn sniff_delimiter<P: AsRef<Path>>(path: P) -> Result<u8, JobError> {
    let mut first_line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut first_line)?;
    if first_line.contains(',') {
        Ok(b',')
    } else if first_line.contains('\t') {
        Ok(b'\t')
    } else {
        Ok(b',')
    }
}

fn parse_table(path: &Path, delimiter: u8) -> Result<Table, JobError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(String::from).collect();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(JobError::Format(format!(
                "line {}: expected {} fields, saw {}",
                line,
                headers.len(),
                record.len()
            )));
        }
        let mut row: Vec<String> = record.iter().map(String::from).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }
    Ok(Table {
        delimiter,
        headers,
        rows,
    })
}
