use std::collections::BTreeMap;

use serde::Serialize;

use crate::entry::Value;

pub const REPORT_LEVEL: &str = "report_level";
pub const HALT_LEVEL: &str = "halt_level";

/// Destination name to resolved value, shared by command-line flags and
/// configuration files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, Value>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dest: &str) -> Option<&Value> {
        self.values.get(dest)
    }

    pub fn set(&mut self, dest: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(dest.into(), value.into());
    }

    pub fn remove(&mut self, dest: &str) -> Option<Value> {
        self.values.remove(dest)
    }

    pub fn contains(&self, dest: &str) -> bool {
        self.values.contains_key(dest)
    }

    /// Overlays `other` on top of `self`; values from `other` win.
    pub fn update(&mut self, other: Settings) {
        self.values.extend(other.values);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(dest, value)| (dest.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get_str(&self, dest: &str) -> Option<&str> {
        match self.values.get(dest) {
            Some(Value::Str(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_bool(&self, dest: &str) -> Option<bool> {
        match self.values.get(dest) {
            Some(Value::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_int(&self, dest: &str) -> Option<i64> {
        match self.values.get(dest) {
            Some(Value::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Resolved reporting threshold; `None` until the settings are finalized.
    pub fn report_level(&self) -> Option<i64> {
        self.get_int(REPORT_LEVEL)
    }

    pub fn halt_level(&self) -> Option<i64> {
        self.get_int(HALT_LEVEL)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Settings {
            values: iter
                .into_iter()
                .map(|(dest, value)| (dest.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_prefers_incoming_values() {
        let mut base: Settings = [("report_level", "2"), ("language_code", "en")]
            .into_iter()
            .collect();
        let mut incoming = Settings::new();
        incoming.set("report_level", "info");
        incoming.set("debug", true);

        base.update(incoming);
        assert_eq!(base.get_str("report_level"), Some("info"));
        assert_eq!(base.get_str("language_code"), Some("en"));
        assert_eq!(base.get_bool("debug"), Some(true));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn typed_getters_ignore_other_variants() {
        let mut settings = Settings::new();
        settings.set(REPORT_LEVEL, "warning");
        assert_eq!(settings.report_level(), None);
        settings.set(REPORT_LEVEL, 2_i64);
        assert_eq!(settings.report_level(), Some(2));
        assert_eq!(settings.get_str(REPORT_LEVEL), None);
    }
}
