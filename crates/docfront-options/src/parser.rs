//! The front-end parser: merges component options and validates a parsed
//! invocation.

use std::ffi::OsString;

use clap::Command;
use tracing::debug;

use crate::args::{self, Positionals};
use crate::component::Component;
use crate::entry::Value;
use crate::error::OptionsResult;
use crate::general::GeneralOptions;
use crate::registry::{populate, OptionSet};
use crate::settings::{Settings, HALT_LEVEL, REPORT_LEVEL};
use crate::threshold;

/// Version of the hosting toolchain.
pub const TOOLCHAIN_VERSION: &str = env!("CARGO_PKG_VERSION");

static GENERAL_OPTIONS: GeneralOptions = GeneralOptions;

/// Default version line. clap prints it after the program name, giving
/// `<prog> (docfront <version>)`.
pub fn default_version() -> String {
    format!("(docfront {TOOLCHAIN_VERSION})")
}

/// Result of [`OptionParser::finalize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finalized {
    pub settings: Settings,
    pub source: Option<String>,
    pub destination: Option<String>,
}

/// Merged command-line surface of a set of components plus the general
/// options, built once and read-only afterwards.
#[derive(Clone, Debug)]
pub struct OptionParser {
    options: OptionSet,
    version: String,
    config_sections: Vec<String>,
}

impl OptionParser {
    /// Merges `components` in order, followed by the general options.
    /// `None` entries are skipped.
    pub fn new<'a, I>(components: I) -> OptionsResult<Self>
    where
        I: IntoIterator<Item = Option<&'a dyn Component>>,
    {
        Self::build(components, None)
    }

    /// Like [`OptionParser::new`] with an explicit version string. An empty
    /// string falls back to the default.
    pub fn with_version<'a, I>(components: I, version: impl Into<String>) -> OptionsResult<Self>
    where
        I: IntoIterator<Item = Option<&'a dyn Component>>,
    {
        Self::build(components, Some(version.into()))
    }

    fn build<'a, I>(components: I, version: Option<String>) -> OptionsResult<Self>
    where
        I: IntoIterator<Item = Option<&'a dyn Component>>,
    {
        let version = version
            .filter(|version| !version.is_empty())
            .unwrap_or_else(default_version);

        let mut merged: Vec<Option<&'a dyn Component>> = components.into_iter().collect();
        // `general` is read first so component sections can refine it.
        let config_sections = GENERAL_OPTIONS
            .config_section()
            .into_iter()
            .chain(merged.iter().flatten().filter_map(|component| component.config_section()))
            .map(str::to_owned)
            .collect();
        merged.push(Some(&GENERAL_OPTIONS as &dyn Component));

        let mut options = OptionSet::new();
        populate(merged.iter().copied(), &mut options)?;

        debug!(
            options = options.len(),
            sections = options.sections().len(),
            "option parser ready"
        );
        Ok(Self {
            options,
            version,
            config_sections,
        })
    }

    pub fn option_set(&self) -> &OptionSet {
        &self.options
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Configuration file sections to read: `general`, then each component's
    /// section in merge order.
    pub fn config_sections(&self) -> &[String] {
        &self.config_sections
    }

    pub fn defaults(&self) -> Settings {
        self.options.defaults()
    }

    pub fn command(&self, prog: &str) -> Command {
        self.options.command(prog, &self.version)
    }

    /// Tokenizes `argv` (program name first) into settings and positional
    /// arguments, on top of the defaults.
    pub fn parse_from<I, T>(&self, argv: I) -> Result<(Settings, Vec<String>), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.parse_layered(argv, Settings::new())
    }

    /// Like [`OptionParser::parse_from`], with `base` (typically configuration
    /// file values) applied between the defaults and the command line.
    pub fn parse_layered<I, T>(
        &self,
        argv: I,
        base: Settings,
    ) -> Result<(Settings, Vec<String>), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut argv = argv
            .into_iter()
            .map(|arg| -> OsString { arg.into() })
            .peekable();
        let prog = argv
            .peek()
            .and_then(|arg0| {
                std::path::Path::new(arg0)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "docfront".to_owned());

        let matches = self.command(&prog).try_get_matches_from(argv)?;
        let (explicit, args) = self.options.command_line_settings(&matches);

        let mut settings = self.defaults();
        settings.update(base);
        settings.update(explicit);
        Ok((settings, args))
    }

    /// Resolves the report and halt thresholds in `values` and splits `args`
    /// into source and destination.
    pub fn finalize(&self, mut values: Settings, mut args: Vec<String>) -> OptionsResult<Finalized> {
        for dest in [REPORT_LEVEL, HALT_LEVEL] {
            let raw = values.get(dest).cloned().unwrap_or(Value::None);
            let level = threshold::resolve_value(&raw)?;
            values.set(dest, level);
        }
        let Positionals {
            source,
            destination,
        } = args::validate(&mut args)?;
        Ok(Finalized {
            settings: values,
            source,
            destination,
        })
    }
}
