use regex::Regex;
use std::sync::LazyLock;

pub const BARCODE_PREFIX: &str = "TCGA-";

// Anchored: only the site and participant groups matter, the rest of the
// sample barcode (sample, portion, plate, center) is ignored.
static SAMPLE_BARCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TCGA-([0-9]+)-([0-9]+)").expect("valid sample barcode pattern"));

/// Patient key from a long-form sample barcode such as
/// `TCGA-28-2513-01A-01R-1850-01`. Returns `None` for anything else.
pub fn patient_key_from_sample(sample: &str) -> Option<String> {
    let captures = SAMPLE_BARCODE.captures(sample)?;
    Some(format!("{}-{}", &captures[1], &captures[2]))
}

/// Patient key from a short-form clinical barcode (`TCGA-02-0001`).
/// The remainder after the prefix is taken verbatim.
pub fn patient_key_from_barcode(barcode: &str) -> Option<&str> {
    barcode.strip_prefix(BARCODE_PREFIX)
}

pub fn is_barcode(value: &str) -> bool {
    value.starts_with(BARCODE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_barcode_long_form() {
        assert_eq!(
            patient_key_from_sample("TCGA-28-2513-01A-01R-1850-01"),
            Some("28-2513".to_string())
        );
        assert_eq!(
            patient_key_from_sample("TCGA-15-1444-01A"),
            Some("15-1444".to_string())
        );
        assert_eq!(
            patient_key_from_sample("TCGA-06-0125"),
            Some("06-0125".to_string())
        );
    }

    #[test]
    fn sample_barcode_no_match() {
        assert_eq!(patient_key_from_sample("gene_id"), None);
        assert_eq!(patient_key_from_sample("TCGA-AB-1234"), None);
        assert_eq!(patient_key_from_sample("TCGA-28"), None);
        assert_eq!(patient_key_from_sample("xTCGA-28-2513"), None);
        assert_eq!(patient_key_from_sample(""), None);
        assert_eq!(patient_key_from_sample("TCGA-\u{662}\u{668}-2513-01A"), None);
        assert_eq!(patient_key_from_sample("TCGA-28-\u{ff12}513"), None);
    }

    #[test]
    fn clinical_barcode_short_form_is_verbatim() {
        assert_eq!(patient_key_from_barcode("TCGA-02-0001"), Some("02-0001"));
        assert_eq!(patient_key_from_barcode("TCGA-XY-abc"), Some("XY-abc"));
        assert_eq!(patient_key_from_barcode("TCGA-TCGA-1"), Some("TCGA-1"));
        assert_eq!(patient_key_from_barcode("02-0001"), None);
    }

    #[test]
    fn barcode_prefix_detection() {
        assert!(is_barcode("TCGA-02-0001"));
        assert!(!is_barcode("TCGA"));
        assert!(!is_barcode("tcga-02-0001"));
    }
}
