mod barcode;
mod clinical;
mod config;
mod expression;
mod features;
mod filter;
mod logging;
mod model;
mod report;

use anyhow::Context;
use serde::Serialize;
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::clinical::ClinicalSource;
use crate::config::DataFiles;
use crate::expression::ExpressionSource;
use crate::model::{IngestCounts, SelectionError, Source};

#[derive(Serialize, Debug)]
pub struct RunSummary {
    pub features: Vec<String>,
    pub expression_patients: usize,
    pub clinical_patients: usize,
    pub qualifying_patients: usize,
    pub clinical_counts: IngestCounts,
    pub output: PathBuf,
}

/// Opens `path` and feeds it to `source`. The file is closed when this returns.
pub fn run_source(path: &Path, source: &mut dyn Source) -> Result<(), SelectionError> {
    let file = File::open(path).map_err(|err| SelectionError::file_access(path, err))?;
    let mut reader = BufReader::new(file);
    source
        .parse(&mut reader)
        .map_err(|err| SelectionError::file_access(path, err))?;

    tracing::debug!(
        path = %path.display(),
        metadata = %serde_json::json!(source.get_metadata()),
        "source ingested"
    );
    Ok(())
}

pub fn input_path(args: &[String]) -> Result<PathBuf, SelectionError> {
    match args {
        [_, path] => Ok(PathBuf::from(path)),
        _ => Err(SelectionError::Usage {
            program: args
                .first()
                .cloned()
                .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string()),
        }),
    }
}

pub fn run(features_path: &Path, files: &DataFiles) -> anyhow::Result<RunSummary> {
    let required = features::read_required_attributes(features_path)
        .context("reading required features")?;
    println!("Looking for patients with features: {:?}", required);

    let mut expression = ExpressionSource::new();
    run_source(&files.expression, &mut expression).context("reading RNA-seq data")?;
    println!("Found {} patients in RNA-seq data", expression.patients.len());

    let mut clinical = ClinicalSource::new(required.clone());
    for path in &files.clinical {
        run_source(path, &mut clinical).context("reading clinical data")?;
    }
    println!("Found clinical data for {} patients", clinical.patients.len());

    let qualifying =
        filter::find_qualifying_patients(&expression.patients, &clinical.patients, &required);
    println!(
        "Found {} patients with all required features",
        qualifying.len()
    );

    report::write_report_file(&files.output, &qualifying, &required)?;
    println!("Results written to {}", files.output.display());

    Ok(RunSummary {
        features: required,
        expression_patients: expression.patients.len(),
        clinical_patients: clinical.patients.len(),
        qualifying_patients: qualifying.len(),
        clinical_counts: clinical.counts,
        output: files.output.clone(),
    })
}

fn describe_failure(err: &anyhow::Error) -> String {
    match err.downcast_ref::<SelectionError>() {
        Some(selection) if selection.is_not_found() => {
            format!("Error: File not found - {err:#}")
        }
        _ => format!("Error: {err:#}"),
    }
}

fn main() {
    logging::init_logging();

    let args: Vec<String> = std::env::args().collect();
    let features_path = match input_path(&args) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(&features_path, &DataFiles::default()) {
        Ok(summary) => {
            tracing::debug!(summary = %serde_json::json!(summary), "run complete");
        }
        Err(err) => {
            eprintln!("{}", describe_failure(&err));
            std::process::exit(1);
        }
    }
}
