//! Option tables of the pipeline stages wired into the `docfront` binary.

use docfront_options::{Component, GroupSpec, OptionEntry, ValueSpec};

pub struct StandaloneReader;

impl Component for StandaloneReader {
    fn name(&self) -> &str {
        "standalone reader"
    }

    fn config_section(&self) -> Option<&str> {
        Some("standalone_reader")
    }

    fn cmdline_options(&self) -> Vec<GroupSpec> {
        vec![GroupSpec::ungrouped(vec![
            OptionEntry::store_false(
                "Do not promote a lone top-level section title to document title.",
                ["--no-doc-title"],
            )
            .with_dest("doctitle_xform"),
            OptionEntry::store_false(
                "Do not process a leading field list as bibliographic data.",
                ["--no-doc-info"],
            )
            .with_dest("docinfo_xform"),
        ])]
    }
}

pub struct RstParser;

impl Component for RstParser {
    fn name(&self) -> &str {
        "restructuredtext parser"
    }

    fn config_section(&self) -> Option<&str> {
        Some("restructuredtext_parser")
    }

    fn cmdline_options(&self) -> Vec<GroupSpec> {
        vec![GroupSpec::titled(
            "reStructuredText Parser Options",
            None,
            vec![
                OptionEntry::store_true("Recognize and link to PEP references.", ["--pep-references"]),
                OptionEntry::store_true("Recognize and link to RFC references.", ["--rfc-references"]),
                OptionEntry::store(
                    "Tab width for expanding tabs in literal blocks. Default is 8.",
                    ["--tab-width"],
                    ValueSpec::new().metavar("<width>"),
                )
                .with_default(8_i64),
                OptionEntry::store(
                    "Class names used for syntax highlighting of code: long, short or none. \
                     Default is long.",
                    ["--syntax-highlight"],
                    ValueSpec::new()
                        .metavar("<format>")
                        .choices(["long", "short", "none"]),
                )
                .with_default("long"),
            ],
        )]
    }
}

pub struct HtmlWriter;

impl Component for HtmlWriter {
    fn name(&self) -> &str {
        "html4css1 writer"
    }

    fn config_section(&self) -> Option<&str> {
        Some("html4css1_writer")
    }

    fn cmdline_options(&self) -> Vec<GroupSpec> {
        vec![GroupSpec::titled(
            "HTML-Specific Options",
            Some("Options controlling the HTML output."),
            vec![
                OptionEntry::store(
                    "Specify a stylesheet URL. Default is \"default.css\".",
                    ["--stylesheet"],
                    ValueSpec::new().metavar("<URL>"),
                )
                .with_default("default.css"),
                OptionEntry::store_true(
                    "Embed the stylesheet in the output HTML file.",
                    ["--embed-stylesheet"],
                ),
                OptionEntry::store_false(
                    "Link to the stylesheet in the output HTML file (default).",
                    ["--link-stylesheet"],
                )
                .with_dest("embed_stylesheet"),
                OptionEntry::store(
                    "Specify the initial header level. Default is 1 for <h1>.",
                    ["--initial-header-level"],
                    ValueSpec::new()
                        .metavar("<level>")
                        .choices(["1", "2", "3", "4", "5", "6"]),
                )
                .with_default("1"),
            ],
        )]
    }
}
