//! Binding between the merged option set and clap's builder API.

use clap::builder::PossibleValuesParser;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::entry::{Action, Value};
use crate::registry::{OptionSet, RegisteredOption};
use crate::settings::Settings;

/// Argument id collecting the positional arguments.
const POSITIONAL: &str = "args";

impl OptionSet {
    /// Builds the clap command for this option set.
    ///
    /// clap's own help and version flags are disabled; the option set carries
    /// its own. Values are not given clap defaults so that a match always
    /// means the option appeared on the command line.
    pub fn command(&self, prog: &str, version: &str) -> Command {
        let mut command = Command::new(prog.to_owned())
            .version(version.to_owned())
            .disable_help_flag(true)
            .disable_version_flag(true);

        for option in self.options() {
            let heading = option
                .section()
                .and_then(|index| self.sections().get(index))
                .map(|section| section.title.as_str());
            command = command.arg(build_arg(option, heading));
        }

        command.arg(
            Arg::new(POSITIONAL)
                .value_name("SOURCE [DESTINATION]")
                .num_args(1..)
                .action(ArgAction::Append),
        )
    }

    /// Settings explicitly given on the command line, plus the positional
    /// arguments.
    ///
    /// Occurrences are applied in command-line order, so when several options
    /// share a destination the last one given wins.
    pub fn command_line_settings(&self, matches: &ArgMatches) -> (Settings, Vec<String>) {
        let mut occurrences: Vec<(usize, &str, Value)> = Vec::new();
        for option in self.options() {
            let Some(dest) = option.dest() else {
                continue;
            };
            if matches.value_source(option.id()) != Some(ValueSource::CommandLine) {
                continue;
            }
            let Some(indices) = matches.indices_of(option.id()) else {
                continue;
            };
            match option.entry().action() {
                Action::Store(_) => {
                    let values = matches
                        .get_many::<String>(option.id())
                        .into_iter()
                        .flatten();
                    for (index, value) in indices.zip(values) {
                        occurrences.push((index, dest, Value::Str(value.clone())));
                    }
                }
                action => {
                    let value = flag_value(action);
                    occurrences.extend(indices.map(|index| (index, dest, value.clone())));
                }
            }
        }
        occurrences.sort_by_key(|(index, _, _)| *index);

        let mut settings = Settings::new();
        for (_, dest, value) in occurrences {
            settings.set(dest, value);
        }
        let args: Vec<String> = matches
            .get_many::<String>(POSITIONAL)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        (settings, args)
    }
}

fn build_arg(option: &RegisteredOption, heading: Option<&str>) -> Arg {
    let entry = option.entry();
    let mut arg = Arg::new(option.id().to_owned()).help(entry.help().to_owned());

    if let Some((long, aliases)) = option.longs().split_first() {
        arg = arg.long(long.clone());
        if !aliases.is_empty() {
            arg = arg.visible_aliases(aliases.to_vec());
        }
    }
    if let Some((short, aliases)) = option.shorts().split_first() {
        arg = arg.short(*short);
        if !aliases.is_empty() {
            arg = arg.visible_short_aliases(aliases.to_vec());
        }
    }
    if let Some(heading) = heading {
        arg = arg.help_heading(heading.to_owned());
    }

    match entry.action() {
        Action::Store(spec) => {
            arg = arg.action(ArgAction::Append).num_args(1);
            if let Some(metavar) = &spec.metavar {
                // clap adds its own angle brackets
                let name = metavar.trim_start_matches('<').trim_end_matches('>');
                arg = arg.value_name(name.to_owned());
            }
            if let Some(choices) = &spec.choices {
                arg = arg.value_parser(PossibleValuesParser::new(choices.clone()));
            }
            arg
        }
        Action::Version => arg.action(ArgAction::Version),
        Action::Help => arg.action(ArgAction::Help),
        Action::Hidden => arg.action(ArgAction::Count).hide(true),
        Action::StoreTrue | Action::StoreFalse | Action::StoreConst(_) => {
            arg.action(ArgAction::Count)
        }
    }
}

fn flag_value(action: &Action) -> Value {
    match action {
        Action::StoreTrue | Action::Hidden => Value::Bool(true),
        Action::StoreFalse => Value::Bool(false),
        Action::StoreConst(value) => value.clone(),
        Action::Store(_) | Action::Version | Action::Help => Value::None,
    }
}
