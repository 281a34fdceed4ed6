use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::{PatientProfiles, SelectionError};

pub const NO_PATIENTS_MESSAGE: &str = "No patients found with all required features.";

/// Attribute-by-patient matrix: a `patient ID` header row of sorted patient keys,
/// then one quoted attribute row per required attribute, in caller order.
pub fn write_report<W: Write>(
    out: &mut W,
    patients: &PatientProfiles,
    required: &[String],
) -> std::io::Result<()> {
    if patients.is_empty() {
        writeln!(out, "{NO_PATIENTS_MESSAGE}")?;
        return Ok(());
    }

    // BTreeMap keys are already in ascending order.
    write!(out, "patient ID")?;
    for key in patients.keys() {
        write!(out, "\t{key}")?;
    }
    writeln!(out)?;

    for attribute in required {
        write!(out, "\"{attribute}\"")?;
        for profile in patients.values() {
            let value = profile.get(attribute).map(String::as_str).unwrap_or("");
            write!(out, "\t{value}")?;
        }
        writeln!(out)?;
    }

    Ok(())
}

pub fn write_report_file(
    path: &Path,
    patients: &PatientProfiles,
    required: &[String],
) -> Result<(), SelectionError> {
    let report_error = |source: std::io::Error| SelectionError::Report {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(report_error)?;
    let mut out = BufWriter::new(file);
    write_report(&mut out, patients, required).map_err(report_error)?;
    out.flush().map_err(report_error)
}
