/// Canonical spelling of a configuration key: lowercase, dashes become
/// underscores. `report-level` and `Report_Level` both map to `report_level`.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_replaces_dashes() {
        assert_eq!(normalize_key("Report-Level"), "report_level");
        assert_eq!(normalize_key("REPORT_LEVEL"), "report_level");
        assert_eq!(normalize_key("--halt"), "__halt");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn is_idempotent() {
        for key in ["Report-Level", "output-ENCODING", "a-b_c-D", "ÄÖ-ü", "x"] {
            let once = normalize_key(key);
            assert_eq!(normalize_key(&once), once);
        }
    }
}
