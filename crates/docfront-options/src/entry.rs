//! Data shape describing one command-line flag and what it stores.

use std::fmt;

use serde::Serialize;

/// Resolved setting value stored under a destination name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Value {
    /// Raw string spelling used when checking a default against `choices`.
    pub fn as_raw(&self) -> Option<String> {
        match self {
            Value::Str(value) => Some(value.clone()),
            Value::Int(value) => Some(value.to_string()),
            Value::Bool(_) | Value::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Str(value) => f.write_str(value),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::None)
    }
}

/// Placeholder and allowed raw values for an option that takes an argument.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueSpec {
    pub metavar: Option<String>,
    pub choices: Option<Vec<String>>,
}

impl ValueSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = Some(metavar.into());
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }
}

/// What happens when a flag appears on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    StoreTrue,
    StoreFalse,
    StoreConst(Value),
    Store(ValueSpec),
    Version,
    Help,
    /// Development switch: stores `true` and never shows up in help output.
    Hidden,
}

impl Action {
    /// Whether the action writes into the settings namespace.
    pub fn stores(&self) -> bool {
        !matches!(self, Action::Version | Action::Help)
    }

    pub fn takes_value(&self) -> bool {
        matches!(self, Action::Store(_))
    }

    /// Flag-only actions whose stored value is always a boolean.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Action::StoreTrue | Action::StoreFalse | Action::Hidden)
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Action::StoreTrue => "store-true",
            Action::StoreFalse => "store-false",
            Action::StoreConst(_) => "store-const",
            Action::Store(_) => "store-value",
            Action::Version => "show-version",
            Action::Help => "show-help",
            Action::Hidden => "hidden-dev-flag",
        }
    }
}

/// One flag definition contributed by a component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionEntry {
    help: String,
    flags: Vec<String>,
    dest: Option<String>,
    default: Option<Value>,
    action: Action,
}

impl OptionEntry {
    pub fn new<I, S>(help: impl Into<String>, flags: I, action: Action) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            help: help.into(),
            flags: flags.into_iter().map(Into::into).collect(),
            dest: None,
            default: None,
            action,
        }
    }

    pub fn store_true<I, S>(help: impl Into<String>, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(help, flags, Action::StoreTrue)
    }

    pub fn store_false<I, S>(help: impl Into<String>, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(help, flags, Action::StoreFalse)
    }

    pub fn store_const<I, S>(help: impl Into<String>, flags: I, value: impl Into<Value>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(help, flags, Action::StoreConst(value.into()))
    }

    pub fn store<I, S>(help: impl Into<String>, flags: I, spec: ValueSpec) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(help, flags, Action::Store(spec))
    }

    pub fn hidden<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(String::new(), flags, Action::Hidden)
    }

    pub fn with_dest(mut self, dest: impl Into<String>) -> Self {
        self.dest = Some(dest.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn explicit_dest(&self) -> Option<&str> {
        self.dest.as_deref()
    }

    /// Destination name in the settings namespace.
    ///
    /// Falls back to the first long flag (dashes become underscores), then to
    /// the first short flag's letter. Help and version entries have none.
    pub fn destination(&self) -> Option<String> {
        if !self.action.stores() {
            return None;
        }
        if let Some(dest) = &self.dest {
            return Some(dest.clone());
        }
        let names: Vec<FlagName> = self.flags.iter().filter_map(|f| parse_flag(f)).collect();
        names
            .iter()
            .find_map(|name| match name {
                FlagName::Long(long) => Some(long.replace('-', "_")),
                FlagName::Short(_) => None,
            })
            .or_else(|| {
                names.iter().find_map(|name| match name {
                    FlagName::Short(short) => Some(short.to_string()),
                    FlagName::Long(_) => None,
                })
            })
    }
}

/// A single parsed flag string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlagName {
    Long(String),
    Short(char),
}

/// Parses `--name` or `-x`; anything else is not a flag string.
pub fn parse_flag(raw: &str) -> Option<FlagName> {
    if let Some(long) = raw.strip_prefix("--") {
        let valid = !long.is_empty()
            && !long.starts_with('-')
            && !long.contains('=')
            && !long.chars().any(char::is_whitespace);
        return valid.then(|| FlagName::Long(long.to_owned()));
    }
    let short = raw.strip_prefix('-')?;
    let mut chars = short.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter != '-' && !letter.is_whitespace() => {
            Some(FlagName::Short(letter))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_prefers_explicit_then_long_then_short() {
        let explicit = OptionEntry::store_false("", ["--no-generator"]).with_dest("generator");
        assert_eq!(explicit.destination().as_deref(), Some("generator"));

        let long = OptionEntry::store_true("", ["-s", "--source-link"]);
        assert_eq!(long.destination().as_deref(), Some("source_link"));

        let short = OptionEntry::store_true("", ["-q"]);
        assert_eq!(short.destination().as_deref(), Some("q"));
    }

    #[test]
    fn help_and_version_have_no_destination() {
        let help = OptionEntry::new("", ["--help", "-h"], Action::Help);
        assert_eq!(help.destination(), None);
        let version = OptionEntry::new("", ["--version"], Action::Version);
        assert_eq!(version.destination(), None);
    }

    #[test]
    fn parses_flag_strings() {
        assert_eq!(parse_flag("--halt"), Some(FlagName::Long("halt".into())));
        assert_eq!(parse_flag("-r"), Some(FlagName::Short('r')));
        assert_eq!(parse_flag("halt"), None);
        assert_eq!(parse_flag("-rv"), None);
        assert_eq!(parse_flag("--"), None);
        assert_eq!(parse_flag("---x"), None);
        assert_eq!(parse_flag("--a=b"), None);
    }

    #[test]
    fn value_display_matches_raw_spelling() {
        assert_eq!(Value::None.to_string(), "None");
        assert_eq!(Value::from("info").to_string(), "info");
        assert_eq!(Value::from(3_i64).to_string(), "3");
        assert_eq!(Value::from(None::<&str>), Value::None);
    }
}
