use parver_parser::{OwnedError, PreTag};
use thiserror::Error;

/// Reasons a combination of version fields is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// No release numbers were given.
    #[error("'release' is required")]
    MissingRelease,
    /// The release numbers are an empty sequence.
    #[error("'release' cannot be empty")]
    EmptyRelease,
    /// The local label is not alphanumeric parts separated by `.`, `-` or `_`.
    #[error("invalid local version label {0:?}")]
    InvalidLocal(String),
    /// A field was given without the field it depends on.
    #[error("'{field}' is required by '{required_by}'")]
    MissingField {
        /// The missing field.
        field: &'static str,
        /// The field or operation that needs it.
        required_by: &'static str,
    },
    /// Fields were given that cannot be combined.
    #[error("{0}")]
    Conflict(&'static str),
    /// An unset field was bumped by a negative amount.
    #[error("cannot bump unset '{field}' by a negative amount")]
    NegativeBump {
        /// The bumped field.
        field: &'static str,
    },
    /// A bump would move a field below zero.
    #[error("'{field}' cannot be negative")]
    Negative {
        /// The bumped field.
        field: &'static str,
    },
    /// A number or a release length is too large.
    #[error("'{field}' is too large")]
    Overflow {
        /// The field or argument.
        field: &'static str,
    },
    /// `truncate` was called with a minimum length of zero.
    #[error("min_length must be positive")]
    InvalidMinLength,
    /// `bump_pre` was asked for a different tag than the current one.
    #[error("cannot bump pre-release '{current}' as '{requested}', use replace to change the tag")]
    InvalidTag {
        /// The tag of the version.
        current: PreTag,
        /// The tag passed to `bump_pre`.
        requested: PreTag,
    },
}

/// Error returned when a string cannot be turned into a [`Version`](crate::Version).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The string does not match the grammar.
    #[error(transparent)]
    Parse(#[from] OwnedError),
    /// The string matches the grammar, but its fields are invalid.
    #[error(transparent)]
    Invalid(#[from] VersionError),
}
