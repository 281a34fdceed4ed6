use chrono::Utc;
use csv::{ReaderBuilder, StringRecord};
use std::collections::BTreeMap;
use std::io::BufRead;

use crate::barcode::{is_barcode, patient_key_from_barcode};
use crate::model::{IngestCounts, PatientProfiles, Source};

/// Columns checked for the patient barcode before falling back to a scan of the whole row.
pub const PREFERRED_BARCODE_COLUMNS: [&str; 2] = ["bcr_patient_barcode", "additional_studies"];

pub const MISSING_VALUE: &str = "NA";

pub fn sniff_delimiter(header: &str) -> u8 {
    if header.contains('\t') { b'\t' } else { b',' }
}

// Quoting is off: a stray `"` in a free-text field must not swallow the
// rest of the file. Surrounding quotes are stripped per field instead.
fn unquote(field: &str) -> &str {
    field.trim_matches('"')
}

fn parse_header(line: &str, delimiter: u8) -> Vec<String> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .delimiter(delimiter)
        .from_reader(line.as_bytes());

    match rdr.records().next() {
        Some(Ok(record)) => record
            .iter()
            .map(|column| unquote(column.trim()).to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// One data row paired with the header, in column order.
pub struct ClinicalRow<'a> {
    fields: Vec<(&'a str, &'a str)>,
}

impl<'a> ClinicalRow<'a> {
    pub fn new(headers: &'a [String], record: &'a StringRecord) -> Self {
        // Files written from R carry an unnamed leading row-name field.
        let skip = if record.len() > headers.len() { 1 } else { 0 };
        let fields = headers
            .iter()
            .map(String::as_str)
            .zip(record.iter().skip(skip).map(unquote))
            .collect();
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| *value)
    }

    /// First barcode found in a preferred column, else the first barcode-looking
    /// value anywhere in the row.
    pub fn barcode(&self) -> Option<&'a str> {
        PREFERRED_BARCODE_COLUMNS
            .iter()
            .find_map(|column| self.get(column).filter(|value| is_barcode(value)))
            .or_else(|| {
                self.fields
                    .iter()
                    .map(|(_, value)| *value)
                    .find(|value| is_barcode(value))
            })
    }
}

/// Accumulates requested attributes per patient across any number of clinical files.
pub struct ClinicalSource {
    pub required: Vec<String>,
    pub patients: PatientProfiles,
    pub counts: IngestCounts,
    pub files: usize,
    format: &'static str,
}

impl ClinicalSource {
    pub fn new(required: Vec<String>) -> Self {
        Self {
            required,
            patients: BTreeMap::new(),
            counts: IngestCounts::default(),
            files: 0,
            format: "none",
        }
    }

    pub fn ingest_row(&mut self, row: &ClinicalRow) {
        let Some(key) = row.barcode().and_then(patient_key_from_barcode) else {
            self.counts.skipped_no_barcode += 1;
            return;
        };

        for attribute in &self.required {
            let Some(value) = row.get(attribute).map(str::trim) else {
                continue;
            };
            if value.is_empty() || value == MISSING_VALUE {
                continue;
            }
            self.patients
                .entry(key.to_string())
                .or_default()
                .insert(attribute.clone(), value.to_string());
        }
    }
}

impl Source for ClinicalSource {
    fn get_metadata(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("sourceProvider".to_string(), "clinical".to_string()),
            ("sourceFormat".to_string(), self.format.to_string()),
            ("ingestedAt".to_string(), Utc::now().to_rfc3339()),
            ("version".to_string(), "1.0".to_string()),
            ("files".to_string(), self.files.to_string()),
            ("rows".to_string(), self.counts.rows.to_string()),
            ("skippedNoBarcode".to_string(), self.counts.skipped_no_barcode.to_string()),
            ("skippedMalformed".to_string(), self.counts.skipped_malformed.to_string()),
            ("patients".to_string(), self.patients.len().to_string()),
        ])
    }

    fn parse(&mut self, reader: &mut dyn BufRead) -> std::io::Result<()> {
        self.files += 1;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.strip_prefix('\u{feff}').unwrap_or(&line);
        let line = line.trim_end_matches(['\r', '\n']);

        let delimiter = sniff_delimiter(line);
        self.format = if delimiter == b'\t' { "tsv" } else { "csv" };
        let headers = parse_header(line, delimiter);
        tracing::debug!(columns = headers.len(), format = self.format, "clinical header");

        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .delimiter(delimiter)
            .from_reader(reader);

        for result in rdr.records() {
            match result {
                Ok(record) => {
                    self.counts.rows += 1;
                    let row = ClinicalRow::new(&headers, &record);
                    self.ingest_row(&row);
                }
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => {
                    self.counts.skipped_malformed += 1;
                    tracing::debug!(error = %err, "skipping malformed clinical row");
                }
            }
        }

        Ok(())
    }
}
