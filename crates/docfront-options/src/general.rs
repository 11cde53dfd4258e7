//! Options common to every docfront front end.

use crate::component::{Component, GroupSpec};
use crate::entry::{Action, OptionEntry, Value, ValueSpec};
use crate::settings::{HALT_LEVEL, REPORT_LEVEL};
use crate::threshold::THRESHOLD_CHOICES;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// The facade's own component, merged after every pipeline component.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeneralOptions;

impl Component for GeneralOptions {
    fn name(&self) -> &str {
        "general"
    }

    fn config_section(&self) -> Option<&str> {
        Some("general")
    }

    fn cmdline_options(&self) -> Vec<GroupSpec> {
        vec![GroupSpec::titled(
            "General Options",
            None,
            vec![
                OptionEntry::store_true(
                    "Include a \"Generated by docfront\" credit with a link at the end of the document.",
                    ["--generator", "-g"],
                ),
                OptionEntry::store_false("Do not include a generator credit.", ["--no-generator"])
                    .with_dest("generator"),
                OptionEntry::store_const(
                    "Include the date at the end of the document (UTC).",
                    ["--date", "-d"],
                    DATE_FORMAT,
                )
                .with_dest("datestamp"),
                OptionEntry::store_const(
                    "Include the time and date at the end of the document (UTC).",
                    ["--time", "-t"],
                    DATE_TIME_FORMAT,
                )
                .with_dest("datestamp"),
                OptionEntry::store_const(
                    "Do not include a datestamp of any kind.",
                    ["--no-datestamp"],
                    Value::None,
                )
                .with_dest("datestamp"),
                OptionEntry::store_true(
                    "Include a \"View document source\" link.",
                    ["--source-link", "-s"],
                ),
                OptionEntry::store_false(
                    "Do not include a \"View document source\" link.",
                    ["--no-source-link"],
                )
                .with_dest("source_link"),
                OptionEntry::store(
                    "Report system messages at or above <level> (by name or number: \
                     info/1, warning/2, error/3, severe/4, none/5). Default is 2 (warning).",
                    ["--report", "-r"],
                    threshold_spec(),
                )
                .with_dest(REPORT_LEVEL)
                .with_default(2_i64),
                OptionEntry::store_const(
                    "Report all system messages, info-level and higher (same as --report=info).",
                    ["--verbose", "-v"],
                    "info",
                )
                .with_dest(REPORT_LEVEL),
                OptionEntry::store(
                    "Halt processing at system messages of <level> or above. Levels as in \
                     --report. Default is 4 (severe).",
                    ["--halt"],
                    threshold_spec(),
                )
                .with_dest(HALT_LEVEL)
                .with_default(4_i64),
                OptionEntry::store_const(
                    "Halt at the slightest problem (same as --halt=info).",
                    ["--strict"],
                    "info",
                )
                .with_dest(HALT_LEVEL),
                OptionEntry::store_true("Report debug-level system messages.", ["--debug"]),
                OptionEntry::store_false("Do not report debug-level system messages.", ["--no-debug"])
                    .with_dest("debug"),
                OptionEntry::store(
                    "Send the output of system messages (warnings) to <file>.",
                    ["--warnings"],
                    ValueSpec::new().metavar("<file>"),
                )
                .with_dest("warning_stream"),
                OptionEntry::store(
                    "Encoding of input text. Default is locale-dependent.",
                    ["--input-encoding", "-i"],
                    ValueSpec::new().metavar("<name>"),
                ),
                OptionEntry::store(
                    "Encoding for output. Default is UTF-8.",
                    ["--output-encoding", "-o"],
                    ValueSpec::new().metavar("<name>"),
                )
                .with_default("utf-8"),
                OptionEntry::store(
                    "Language of input text (ISO 639 2-letter identifier). Default is \"en\".",
                    ["--language", "-l"],
                    ValueSpec::new().metavar("<name>"),
                )
                .with_dest("language_code")
                .with_default("en"),
                OptionEntry::new(
                    "Show this program's version number and exit.",
                    ["--version"],
                    Action::Version,
                ),
                OptionEntry::new("Show this help message and exit.", ["--help", "-h"], Action::Help),
                OptionEntry::hidden(["--dump-internal-document-attributes"]),
            ],
        )]
    }
}

fn threshold_spec() -> ValueSpec {
    ValueSpec::new()
        .metavar("<level>")
        .choices(THRESHOLD_CHOICES)
}
