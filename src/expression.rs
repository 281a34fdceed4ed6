use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

use crate::barcode::patient_key_from_sample;
use crate::model::Source;

/// Patients present in the RNA-seq matrix, taken from its sample header.
#[derive(Default)]
pub struct ExpressionSource {
    pub patients: BTreeSet<String>,
    pub samples: usize,
    pub unmatched: usize,
}

impl ExpressionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_header(&mut self, line: &str) {
        let line = line.strip_prefix('\u{feff}').unwrap_or(line).trim();
        if line.is_empty() {
            return;
        }
        for sample in line.split('\t') {
            self.samples += 1;
            match patient_key_from_sample(sample) {
                Some(key) => {
                    self.patients.insert(key);
                }
                None => self.unmatched += 1,
            }
        }
    }
}

impl Source for ExpressionSource {
    fn get_metadata(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("sourceProvider".to_string(), "rna_seq".to_string()),
            ("sourceFormat".to_string(), "tsv_header".to_string()),
            ("ingestedAt".to_string(), Utc::now().to_rfc3339()),
            ("version".to_string(), "1.0".to_string()),
            ("samples".to_string(), self.samples.to_string()),
            ("unmatchedSamples".to_string(), self.unmatched.to_string()),
            ("patients".to_string(), self.patients.len().to_string()),
        ])
    }

    // Only the first line is read; the expression matrix itself is never loaded.
    fn parse(&mut self, reader: &mut dyn BufRead) -> std::io::Result<()> {
        let mut header = String::new();
        reader.read_line(&mut header)?;
        self.read_header(&header);
        Ok(())
    }
}
