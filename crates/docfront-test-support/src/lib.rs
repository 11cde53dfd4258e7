//! Shared test harness utilities for docfront crates.

use docfront_options::{Component, GroupSpec, OptionEntry, OptionParser, ValueSpec};

/// Component backed by a fixed option table.
#[derive(Clone, Debug)]
pub struct FixtureComponent {
    pub name: String,
    pub config_section: Option<String>,
    pub groups: Vec<GroupSpec>,
}

impl FixtureComponent {
    pub fn new(name: &str, groups: Vec<GroupSpec>) -> Self {
        Self {
            name: name.to_owned(),
            config_section: None,
            groups,
        }
    }

    pub fn with_config_section(mut self, section: &str) -> Self {
        self.config_section = Some(section.to_owned());
        self
    }
}

impl Component for FixtureComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn cmdline_options(&self) -> Vec<GroupSpec> {
        self.groups.clone()
    }

    fn config_section(&self) -> Option<&str> {
        self.config_section.as_deref()
    }
}

/// A `--<name>` boolean switch.
pub fn switch(name: &str) -> OptionEntry {
    OptionEntry::store_true(format!("Enable {name}."), [format!("--{name}")])
}

/// A `--<name> <value>` option.
pub fn value_option(name: &str) -> OptionEntry {
    OptionEntry::store(
        format!("Set {name}."),
        [format!("--{name}")],
        ValueSpec::new().metavar("<value>"),
    )
}

/// Writer-like component with one titled section and one untitled group.
pub fn writer_fixture() -> FixtureComponent {
    FixtureComponent::new(
        "writer",
        vec![
            GroupSpec::titled(
                "Writer Options",
                Some("Options specific to the fixture writer."),
                vec![
                    value_option("stylesheet"),
                    switch("embed-stylesheet"),
                    OptionEntry::store_false("Link the stylesheet.", ["--link-stylesheet"])
                        .with_dest("embed_stylesheet"),
                ],
            ),
            GroupSpec::ungrouped(vec![switch("compact-lists")]),
        ],
    )
    .with_config_section("fixture_writer")
}

/// Parser over the writer fixture plus the general options.
pub fn test_parser() -> OptionParser {
    let writer = writer_fixture();
    OptionParser::new([Some(&writer as &dyn Component)]).expect("fixture options merge")
}
