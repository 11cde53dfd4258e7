//! Severity thresholds for the `report_level` and `halt_level` settings.

use crate::entry::Value;
use crate::error::{OptionsError, OptionsResult};

/// Raw strings the command line accepts for `--report` and `--halt`.
pub const THRESHOLD_CHOICES: [&str; 10] = [
    "info", "1", "warning", "2", "error", "3", "severe", "4", "none", "5",
];

/// Named thresholds and their ordinal levels.
pub const THRESHOLDS: [(&str, i64); 5] = [
    ("info", 1),
    ("warning", 2),
    ("error", 3),
    ("severe", 4),
    ("none", 5),
];

/// Converts a threshold given by number or by name into its level.
///
/// Integers are returned as written, without checking them against the named
/// range; configuration files can carry values the command line would have
/// refused. Names are matched case-insensitively.
pub fn resolve(raw: &str) -> OptionsResult<i64> {
    if let Ok(level) = raw.trim().parse::<i64>() {
        return Ok(level);
    }
    let name = raw.to_lowercase();
    THRESHOLDS
        .iter()
        .find(|(label, _)| *label == name)
        .map(|(_, level)| *level)
        .ok_or_else(|| OptionsError::UnknownThreshold(raw.to_owned()))
}

/// Resolves a stored setting value; anything but an integer or a string is
/// unknown.
pub fn resolve_value(value: &Value) -> OptionsResult<i64> {
    match value {
        Value::Int(level) => Ok(*level),
        Value::Str(raw) => resolve(raw),
        other => Err(OptionsError::UnknownThreshold(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_not_clamped() {
        assert_eq!(resolve("3"), Ok(3));
        assert_eq!(resolve("0"), Ok(0));
        assert_eq!(resolve("99"), Ok(99));
        assert_eq!(resolve("-1"), Ok(-1));
        assert_eq!(resolve(" 4 "), Ok(4));
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(resolve("WARNING"), Ok(2));
        assert_eq!(resolve("warning"), Ok(2));
        assert_eq!(resolve("Info"), Ok(1));
        assert_eq!(resolve("none"), Ok(5));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = resolve("bogus").unwrap_err();
        assert_eq!(err, OptionsError::UnknownThreshold("bogus".into()));
        assert_eq!(err.to_string(), "Unknown threshold: bogus");
        assert!(resolve("").is_err());
        assert!(resolve("99999999999999999999").is_err());
    }

    #[test]
    fn every_choice_resolves() {
        for choice in THRESHOLD_CHOICES {
            let level = resolve(choice).expect("choice resolves");
            assert!((1..=5).contains(&level), "{choice} -> {level}");
        }
    }

    #[test]
    fn stored_values_resolve() {
        assert_eq!(resolve_value(&Value::Int(2)), Ok(2));
        assert_eq!(resolve_value(&Value::from("severe")), Ok(4));
        assert_eq!(
            resolve_value(&Value::None),
            Err(OptionsError::UnknownThreshold("None".into()))
        );
    }
}
