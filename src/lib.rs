//! Parse and manipulate PEP 440 version numbers.
//!
//! ## Motivation
//!
//! Python packaging tools accept many spellings of the same version.
//! `1.0-ALPHA.2`, `v1.0a2` and `1.0a2` all name the same release.
//! This crate parses such versions with either a strict grammar, which
//! accepts only the canonical form, or a permissive grammar, which accepts
//! everything PEP 440 can normalize.
//!
//! A parsed [`Version`] keeps the spelling it was written with and renders
//! back to it. Equality, ordering and hashing follow PEP 440, so differently
//! written versions of the same release compare equal.
//!
//! ## Examples
//!
//! ```rust
//! use parver::Version;
//!
//! let version = parver::parse("1.0-ALPHA.2", false).unwrap();
//! assert_eq!(version.to_string(), "1.0-alpha.2");
//! assert_eq!(version, parver::parse("1.0a2", true).unwrap());
//!
//! // the canonical spelling
//! assert_eq!(version.normalize().to_string(), "1.0a2");
//!
//! // versions are immutable, transformations return new versions
//! let next = version.bump_pre(None, 1).unwrap();
//! assert_eq!(next.to_string(), "1.0-alpha.3");
//! assert!(next > version);
//! assert!(Version::new([1, 0]).unwrap() > next);
//!
//! // the strict grammar only accepts the canonical form
//! assert!(parver::parse("1.0-ALPHA.2", true).is_err());
//! ```
//!
//! ## Errors
//!
//! Parse errors point at the offending input:
//!
//! ```rust
//! let error = parver::parse("1.0-", false).unwrap_err();
//! assert_eq!(error.to_string(), "Unexpected end of input at position 4");
//! ```
//!
//! ## Features
//!
//! - `serde`: (de)serialize [`Version`] as a string, parsed permissively
//! - `tracing`: emit `tracing` events when grammars are compiled and parses fail

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    no_mangle_generic_items,
    non_shorthand_field_patterns,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused_allocation,
    unused_comparisons,
    unused_extern_crates,
    unused_import_braces,
    unused_parens,
    unused_qualifications,
    unused_results,
    unused,
    while_true
)]

pub use parver_parser::{
    Error as ParseError, ErrorKind, Grammar, Number, OwnedError, PostTag, PreTag, Segment,
    Separator, UnknownTag,
};
pub use parver_version::{Builder, Error, Field, IntoRelease, LocalPart, Version, VersionError};

/// Parse a string slice into a [`Version`].
///
/// With `strict`, only the canonical PEP 440 form is accepted.
/// Otherwise every spelling PEP 440 can normalize is accepted:
///
/// - Case is ignored (e.g. "1.0RC1" parses as "1.0rc1")
/// - A leading `v` is allowed (e.g. "v1.0")
/// - Pre-, post- and development releases may be separated by `.`, `-` or `_` (e.g. "1.0-a_1")
/// - Their numbers may be left out and default to 0 (e.g. "1.0.dev" parses as "1.0.dev0")
/// - Tag synonyms are accepted (e.g. "1.0alpha1" parses as "1.0a1", "1.0-r1" as "1.0.post1")
/// - A post release may be written as `-N` (e.g. "1.0-1" parses as "1.0.post1")
/// - Numbers may have leading zeros (e.g. "01.02" parses as "1.2")
///
/// ## Examples
///
/// ```rust
/// use parver::{Version, Grammar};
///
/// let version = parver::parse("1!2.0rc1.post2.dev3+local.7", true).unwrap();
/// assert_eq!(version.epoch(), 1);
/// assert_eq!(version.release(), &[2, 0]);
/// assert_eq!(version.local(), Some("local.7"));
///
/// assert_eq!(
///     parver::parse("V1.0-C.dev", false).unwrap(),
///     Version::parse("1.0rc0.dev0", Grammar::Strict).unwrap()
/// );
///
/// assert!(parver::parse("not-a-version", false).is_err());
/// ```
pub fn parse(input: &str, strict: bool) -> Result<Version, Error> {
    Version::parse(input, Grammar::from_strict(strict))
}
