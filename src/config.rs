use std::path::{Path, PathBuf};

pub const EXPRESSION_FILE: &str = "GBM_RNAseqdata_HTSEQ_FKPM.harmonized.txt";
pub const CLINICAL_FILES: [&str; 3] = [
    "clinical_patient_GBM.txt",
    "clinical_followup_GBM.txt",
    "clinical_drug_GBM.txt",
];
pub const OUTPUT_FILE: &str = "patient_analysis_results.txt";

/// Locations of the inputs and the report, relative to the working directory
/// unless re-rooted with [`DataFiles::in_dir`].
#[derive(Clone, Debug)]
pub struct DataFiles {
    pub expression: PathBuf,
    pub clinical: Vec<PathBuf>,
    pub output: PathBuf,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            expression: PathBuf::from(EXPRESSION_FILE),
            clinical: CLINICAL_FILES.into_iter().map(PathBuf::from).collect(),
            output: PathBuf::from(OUTPUT_FILE),
        }
    }
}

impl DataFiles {
    pub fn in_dir(dir: &Path) -> Self {
        let defaults = Self::default();
        Self {
            expression: dir.join(defaults.expression),
            clinical: defaults.clinical.iter().map(|path| dir.join(path)).collect(),
            output: dir.join(defaults.output),
        }
    }
}
