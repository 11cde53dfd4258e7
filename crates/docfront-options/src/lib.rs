//! Option aggregation and validation for docfront front ends.
//!
//! Pipeline components each contribute a table of option groups. The
//! [`OptionParser`] merges them, followed by its own general options, into a
//! single command line and settings namespace. After tokenizing,
//! [`OptionParser::finalize`] resolves severity thresholds and checks the
//! positional arguments.

pub mod args;
mod command;
pub mod component;
pub mod entry;
pub mod error;
pub mod general;
pub mod normalize;
pub mod parser;
pub mod registry;
pub mod settings;
pub mod threshold;

pub use args::{validate as validate_args, Positionals};
pub use component::{Component, GroupSpec};
pub use entry::{Action, OptionEntry, Value, ValueSpec};
pub use error::{ExitCode, OptionsError, OptionsResult};
pub use general::GeneralOptions;
pub use normalize::normalize_key;
pub use parser::{default_version, Finalized, OptionParser, TOOLCHAIN_VERSION};
pub use registry::{populate, OptionSet, RegisteredOption, Section};
pub use settings::{Settings, HALT_LEVEL, REPORT_LEVEL};
pub use threshold::{resolve as resolve_threshold, THRESHOLDS, THRESHOLD_CHOICES};
