use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    Configuration = 1,
    Usage = 2,
}

/// Classified failures raised while merging component option tables or
/// validating a parsed invocation. Each one is terminal; callers report the
/// message and exit with [`OptionsError::exit_code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("invalid option specification: {0}")]
    Configuration(String),

    #[error("conflicting option string: {flag} (registered by {first}, again by {second})")]
    DuplicateOption {
        flag: String,
        first: String,
        second: String,
    },

    #[error("Unknown threshold: {0}")]
    UnknownThreshold(String),

    #[error("Maximum 2 arguments allowed.")]
    TooManyArguments,

    #[error("invalid value {value:?} for {dest}: expected {expected}")]
    InvalidValue {
        dest: String,
        value: String,
        expected: &'static str,
    },
}

impl OptionsError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Configuration(_) | Self::DuplicateOption { .. } => ExitCode::Configuration,
            Self::UnknownThreshold(_) | Self::TooManyArguments | Self::InvalidValue { .. } => {
                ExitCode::Usage
            }
        }
    }
}

pub type OptionsResult<T> = Result<T, OptionsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specification_errors_and_usage_errors_exit_differently() {
        let duplicate = OptionsError::DuplicateOption {
            flag: "--quiet".into(),
            first: "reader".into(),
            second: "writer".into(),
        };
        assert_eq!(duplicate.exit_code() as u8, 1);
        assert_eq!(OptionsError::TooManyArguments.exit_code() as u8, 2);
        assert_eq!(ExitCode::Success as u8, 0);
    }
}
