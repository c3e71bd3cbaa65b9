//! Error and warning types shared by registration and parsing.

use std::fmt;

use thiserror::Error;

use crate::flag::FlagKind;

/// Fatal failures raised while declaring flags, parsing tokens or reading values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    /// A flag name or alias is already used by another flag.
    #[error("the flag `{token}` is already in use by `{existing}`; choose another name or alias")]
    DuplicateFlag { token: String, existing: String },

    /// A token matched no registered flag or alias.
    #[error("couldn't understand token `{token}`: it is not a valid flag in this program")]
    UnknownToken {
        token: String,
        suggestions: Vec<String>,
    },

    /// A value-taking flag was the last token.
    #[error("expected a value after flag `{flag}`")]
    MissingValue { flag: String },

    /// A token could not be coerced to the flag's kind.
    #[error("`{value}` is not a valid {kind} value for flag `{flag}`")]
    InvalidValue {
        flag: String,
        value: String,
        kind: FlagKind,
    },

    /// Required flags that were never supplied.
    #[error("you need to pass the following obligatory flags: {}", .flags.join(", "))]
    MissingRequiredFlags { flags: Vec<String> },

    /// A flag's value was read before anything assigned it.
    #[error("tried to read flag `{flag}` before a value was assigned; parse the arguments first")]
    Unset { flag: String },

    /// A value of one kind was read from or assigned to a flag of another kind.
    #[error("flag `{flag}` holds {expected} values, not {found}")]
    WrongKind {
        flag: String,
        expected: FlagKind,
        found: FlagKind,
    },

    /// A name that is not a key of the parse result.
    #[error("no value for flag `{name}`")]
    UnknownFlag { name: String },

    /// The registry still holds values from an earlier parse.
    #[error("flags were already parsed; call `reset` before parsing again")]
    AlreadyParsed,

    /// The token sequence did not even contain the program path.
    #[error("argument list is empty; expected the program name as the first token")]
    MissingProgramName,
}

/// Convenience alias for results with [`FlagError`].
pub type Result<T> = std::result::Result<T, FlagError>;

/// Non-fatal conditions noticed during a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The same flag was passed more than once; the later value was kept.
    DuplicateAssignment { flag: String, token: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateAssignment { flag, token } if flag == token => {
                write!(f, "flag `{flag}` was passed more than once; using the last value")
            }
            Self::DuplicateAssignment { flag, token } => write!(
                f,
                "flag `{flag}` was passed more than once (last as `{token}`); using the last value"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_lists_every_flag() {
        let err = FlagError::MissingRequiredFlags {
            flags: vec!["-n".to_string(), "--out".to_string()],
        };
        assert!(err.to_string().ends_with("-n, --out"));
    }

    #[test]
    fn invalid_value_names_the_kind() {
        let err = FlagError::InvalidValue {
            flag: "-c".to_string(),
            value: "3.5".to_string(),
            kind: FlagKind::Int,
        };
        assert_eq!(
            err.to_string(),
            "`3.5` is not a valid int value for flag `-c`"
        );
    }

    #[test]
    fn duplicate_warning_mentions_alias_when_different() {
        let w = Warning::DuplicateAssignment {
            flag: "-c".to_string(),
            token: "--count".to_string(),
        };
        assert!(w.to_string().contains("--count"));
    }
}
