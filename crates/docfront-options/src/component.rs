use crate::entry::OptionEntry;

/// One `(title, description, entries)` triple of a component's option table.
///
/// An untitled group places its entries in the shared top-level bucket; a
/// titled one always opens a new help section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSpec {
    pub title: Option<String>,
    pub description: Option<String>,
    pub entries: Vec<OptionEntry>,
}

impl GroupSpec {
    pub fn new(
        title: Option<&str>,
        description: Option<&str>,
        entries: Vec<OptionEntry>,
    ) -> Self {
        Self {
            title: title.map(str::to_owned),
            description: description.map(str::to_owned),
            entries,
        }
    }

    pub fn titled(title: &str, description: Option<&str>, entries: Vec<OptionEntry>) -> Self {
        Self::new(Some(title), description, entries)
    }

    pub fn ungrouped(entries: Vec<OptionEntry>) -> Self {
        Self::new(None, None, entries)
    }

    /// Section title, treating an empty string as no title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.is_empty())
    }
}

/// A pipeline subsystem that contributes options to the shared command line.
pub trait Component {
    /// Name used in diagnostics about this component's options.
    fn name(&self) -> &str;

    /// Ordered option table of the component.
    fn cmdline_options(&self) -> Vec<GroupSpec>;

    /// Configuration file section read for this component, if any.
    fn config_section(&self) -> Option<&str> {
        None
    }
}
