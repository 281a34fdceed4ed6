use std::path::Path;

use crate::model::SelectionError;

/// One attribute name per line. Surrounding whitespace and double quotes are
/// dropped and blank lines skipped; order and duplicates are kept.
pub fn parse_required_attributes(data: &str) -> Vec<String> {
    data.lines()
        .map(|line| line.trim().trim_matches('"'))
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

pub fn read_required_attributes(path: &Path) -> Result<Vec<String>, SelectionError> {
    let data = std::fs::read_to_string(path)
        .map_err(|err| SelectionError::file_access(path, err))?;
    Ok(parse_required_attributes(&data))
}
