//! Positional argument validation.

use crate::error::{OptionsError, OptionsResult};

/// Positional arguments split into their two roles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Positionals {
    pub source: Option<String>,
    pub destination: Option<String>,
}

/// Takes `source` and `destination` from the front of `args`.
///
/// Consumes the popped elements; a third element is an error and stays in
/// `args`.
pub fn validate(args: &mut Vec<String>) -> OptionsResult<Positionals> {
    let mut remaining = std::mem::take(args).into_iter();
    let source = remaining.next();
    let destination = remaining.next();
    *args = remaining.collect();
    if !args.is_empty() {
        return Err(OptionsError::TooManyArguments);
    }
    Ok(Positionals {
        source,
        destination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn empty_yields_nothing() {
        let mut args = Vec::new();
        assert_eq!(validate(&mut args), Ok(Positionals::default()));
    }

    #[test]
    fn one_and_two_arguments() {
        let mut args = owned(&["a"]);
        let parsed = validate(&mut args).unwrap();
        assert_eq!(parsed.source.as_deref(), Some("a"));
        assert_eq!(parsed.destination, None);
        assert!(args.is_empty());

        let mut args = owned(&["a", "b"]);
        let parsed = validate(&mut args).unwrap();
        assert_eq!(parsed.source.as_deref(), Some("a"));
        assert_eq!(parsed.destination.as_deref(), Some("b"));
    }

    #[test]
    fn third_argument_is_rejected() {
        let mut args = owned(&["a", "b", "c"]);
        let err = validate(&mut args).unwrap_err();
        assert_eq!(err, OptionsError::TooManyArguments);
        assert_eq!(err.to_string(), "Maximum 2 arguments allowed.");
        assert_eq!(args, owned(&["c"]));
    }
}
