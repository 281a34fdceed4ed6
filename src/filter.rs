use std::collections::BTreeSet;

use crate::model::PatientProfiles;

/// Patients present in the expression data whose profile holds every required
/// attribute. A single missing attribute excludes the patient entirely.
pub fn find_qualifying_patients(
    expression: &BTreeSet<String>,
    clinical: &PatientProfiles,
    required: &[String],
) -> PatientProfiles {
    expression
        .iter()
        .filter_map(|key| clinical.get_key_value(key))
        .filter(|(_, profile)| required.iter().all(|attribute| profile.contains_key(attribute)))
        .map(|(key, profile)| (key.clone(), profile.clone()))
        .collect()
}
