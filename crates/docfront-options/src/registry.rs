//! Merges the option tables of independent components into one option set.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::component::Component;
use crate::entry::{parse_flag, Action, FlagName, OptionEntry, Value};
use crate::error::{OptionsError, OptionsResult};
use crate::normalize::normalize_key;
use crate::settings::Settings;

/// Named help section opened by a titled group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub description: Option<String>,
    pub component: String,
}

/// An entry after registration, with its flag strings split by kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisteredOption {
    entry: OptionEntry,
    component: String,
    section: Option<usize>,
    dest: Option<String>,
    longs: Vec<String>,
    shorts: Vec<char>,
}

impl RegisteredOption {
    pub fn entry(&self) -> &OptionEntry {
        &self.entry
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Index into [`OptionSet::sections`], or `None` for the top-level bucket.
    pub fn section(&self) -> Option<usize> {
        self.section
    }

    pub fn dest(&self) -> Option<&str> {
        self.dest.as_deref()
    }

    /// Identifier of the option: its first flag string.
    pub fn id(&self) -> &str {
        &self.entry.flags()[0]
    }

    pub fn longs(&self) -> &[String] {
        &self.longs
    }

    pub fn shorts(&self) -> &[char] {
        &self.shorts
    }
}

/// Merged option definitions: the shared top-level bucket plus named
/// sections, in registration order.
#[derive(Clone, Debug, Default)]
pub struct OptionSet {
    options: Vec<RegisteredOption>,
    sections: Vec<Section>,
    owners: HashMap<String, String>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Every registered option in registration order.
    pub fn options(&self) -> &[RegisteredOption] {
        &self.options
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn top_level(&self) -> impl Iterator<Item = &RegisteredOption> {
        self.options.iter().filter(|option| option.section.is_none())
    }

    pub fn section_options(&self, index: usize) -> impl Iterator<Item = &RegisteredOption> {
        self.options
            .iter()
            .filter(move |option| option.section == Some(index))
    }

    /// Looks up the option owning `flag` (e.g. `--report` or `-r`).
    pub fn find(&self, flag: &str) -> Option<&RegisteredOption> {
        self.options
            .iter()
            .find(|option| option.entry.flags().iter().any(|f| f == flag))
    }

    /// Opens a new section. Repeated titles are kept as distinct sections.
    pub fn add_section(
        &mut self,
        title: &str,
        description: Option<String>,
        component: &str,
    ) -> usize {
        debug!(component, title, "opening option section");
        self.sections.push(Section {
            title: title.to_owned(),
            description,
            component: component.to_owned(),
        });
        self.sections.len() - 1
    }

    /// Validates and registers one entry. Nothing is inserted on error.
    pub fn add_option(
        &mut self,
        component: &str,
        section: Option<usize>,
        entry: OptionEntry,
    ) -> OptionsResult<()> {
        if entry.flags().is_empty() {
            return Err(OptionsError::Configuration(format!(
                "{component}: option has no flag strings"
            )));
        }
        check_attributes(component, &entry)?;

        let mut longs = Vec::new();
        let mut shorts = Vec::new();
        let mut seen = HashSet::new();
        for flag in entry.flags() {
            match parse_flag(flag) {
                Some(FlagName::Long(long)) => longs.push(long),
                Some(FlagName::Short(short)) => shorts.push(short),
                None => {
                    return Err(OptionsError::Configuration(format!(
                        "{component}: invalid option string {flag:?}: must be --name or -x"
                    )))
                }
            }
            if let Some(first) = self.owners.get(flag) {
                return Err(OptionsError::DuplicateOption {
                    flag: flag.clone(),
                    first: first.clone(),
                    second: component.to_owned(),
                });
            }
            if !seen.insert(flag.as_str()) {
                return Err(OptionsError::DuplicateOption {
                    flag: flag.clone(),
                    first: component.to_owned(),
                    second: component.to_owned(),
                });
            }
        }

        for flag in entry.flags() {
            self.owners.insert(flag.clone(), component.to_owned());
        }
        trace!(component, flags = ?entry.flags(), action = entry.action().label(), "registered option");
        self.options.push(RegisteredOption {
            dest: entry.destination(),
            entry,
            component: component.to_owned(),
            section,
            longs,
            shorts,
        });
        Ok(())
    }

    /// Default settings: explicit defaults win, every other destination is
    /// present with [`Value::None`].
    pub fn defaults(&self) -> Settings {
        let mut settings = Settings::new();
        for option in &self.options {
            let Some(dest) = option.dest() else {
                continue;
            };
            match option.entry.default_value() {
                Some(value) => settings.set(dest, value.clone()),
                None if !settings.contains(dest) => settings.set(dest, Value::None),
                None => {}
            }
        }
        settings
    }

    /// Converts configuration-file pairs into settings.
    ///
    /// Keys are normalized. Destinations written only by boolean flags take
    /// boolean spellings; every other value is kept as its raw string.
    pub fn config_settings<I, K, V>(&self, pairs: I) -> OptionsResult<Settings>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut settings = Settings::new();
        for (key, raw) in pairs {
            let dest = normalize_key(key.as_ref());
            let raw = raw.into();
            let value = if self.is_boolean_dest(&dest) {
                Value::Bool(parse_bool(&raw).ok_or_else(|| OptionsError::InvalidValue {
                    dest: dest.clone(),
                    value: raw.clone(),
                    expected: "a boolean (true/false, yes/no, on/off, 1/0)",
                })?)
            } else {
                Value::Str(raw)
            };
            settings.set(dest, value);
        }
        Ok(settings)
    }

    fn is_boolean_dest(&self, dest: &str) -> bool {
        let mut writers = self
            .options
            .iter()
            .filter(|option| option.dest() == Some(dest))
            .peekable();
        writers.peek().is_some() && writers.all(|option| option.entry.action().is_boolean())
    }
}

fn check_attributes(component: &str, entry: &OptionEntry) -> OptionsResult<()> {
    let flags = entry.flags().join("/");
    let action = entry.action();
    if !action.stores() && (entry.explicit_dest().is_some() || entry.default_value().is_some()) {
        return Err(OptionsError::Configuration(format!(
            "{component}: {flags}: {} options take no dest or default",
            action.label()
        )));
    }
    if let Action::Store(spec) = action {
        if let Some(choices) = &spec.choices {
            if choices.is_empty() {
                return Err(OptionsError::Configuration(format!(
                    "{component}: {flags}: choices must not be empty"
                )));
            }
            if let Some(raw) = entry.default_value().and_then(Value::as_raw) {
                if !choices.contains(&raw) {
                    return Err(OptionsError::Configuration(format!(
                        "{component}: {flags}: default {raw:?} is not one of the choices"
                    )));
                }
            }
        }
    }
    Ok(())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Registers every component's groups into `target`, in order.
///
/// `None` components are skipped. A titled group always opens a new section,
/// even when an earlier section carries the same title; an untitled group
/// adds its entries to the top-level bucket and drops its description.
pub fn populate<'a, I>(components: I, target: &mut OptionSet) -> OptionsResult<()>
where
    I: IntoIterator<Item = Option<&'a dyn Component>>,
{
    for component in components.into_iter().flatten() {
        let name = component.name();
        debug!(component = name, "merging component options");
        for group in component.cmdline_options() {
            let description = group.description.clone().filter(|text| !text.is_empty());
            let section = match group.title() {
                Some(title) => Some(target.add_section(title, description, name)),
                None => {
                    if description.is_some() {
                        debug!(component = name, "untitled group description ignored");
                    }
                    None
                }
            };
            for entry in group.entries {
                target.add_option(name, section, entry)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ValueSpec;

    #[test]
    fn rejects_malformed_flag_strings() {
        let mut set = OptionSet::new();
        let err = set
            .add_option("test", None, OptionEntry::store_true("", ["verbose"]))
            .unwrap_err();
        assert!(matches!(err, OptionsError::Configuration(_)));
        assert!(set.is_empty());
    }

    #[test]
    fn rejects_entry_without_flags() {
        let mut set = OptionSet::new();
        let entry = OptionEntry::store_true("", Vec::<String>::new());
        assert!(matches!(
            set.add_option("test", None, entry),
            Err(OptionsError::Configuration(_))
        ));
    }

    #[test]
    fn rejects_default_outside_choices() {
        let mut set = OptionSet::new();
        let entry = OptionEntry::store(
            "",
            ["--mode"],
            ValueSpec::new().choices(["fast", "slow"]),
        )
        .with_default("medium");
        assert!(matches!(
            set.add_option("test", None, entry),
            Err(OptionsError::Configuration(_))
        ));

        let numeric = OptionEntry::store("", ["--level"], ValueSpec::new().choices(["1", "2"]))
            .with_default(2_i64);
        set.add_option("test", None, numeric).expect("numeric default");
    }

    #[test]
    fn rejects_dest_on_help() {
        let mut set = OptionSet::new();
        let entry = OptionEntry::new("", ["--help"], Action::Help).with_dest("help");
        assert!(matches!(
            set.add_option("test", None, entry),
            Err(OptionsError::Configuration(_))
        ));
    }

    #[test]
    fn rejects_repeated_flag_within_entry() {
        let mut set = OptionSet::new();
        let entry = OptionEntry::store_true("", ["--quiet", "--quiet"]);
        assert!(matches!(
            set.add_option("test", None, entry),
            Err(OptionsError::DuplicateOption { .. })
        ));
        assert!(set.find("--quiet").is_none());
    }

    #[test]
    fn defaults_keep_explicit_values() {
        let mut set = OptionSet::new();
        set.add_option("test", None, OptionEntry::store_true("", ["--debug"]))
            .unwrap();
        set.add_option(
            "test",
            None,
            OptionEntry::store_false("", ["--no-debug"]).with_dest("debug"),
        )
        .unwrap();
        set.add_option(
            "test",
            None,
            OptionEntry::store("", ["--output-encoding"], ValueSpec::new()).with_default("utf-8"),
        )
        .unwrap();

        let defaults = set.defaults();
        assert_eq!(defaults.get("debug"), Some(&Value::None));
        assert_eq!(defaults.get_str("output_encoding"), Some("utf-8"));
        assert_eq!(defaults.len(), 2);
    }

    #[test]
    fn parses_boolean_spellings() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("OFF"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
