//! Grammar-driven parser for PEP 440 version numbers.
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

use std::{fmt::Display, ops::Range};

mod grammar;
mod parser;
mod segment;

pub use grammar::Grammar;
pub use segment::{Number, PostTag, PreTag, Segment, Separator, UnknownTag};

use parser::{ErrorSpan, Parser};

/// Parse a string slice into the segments of a PEP 440 version.
///
/// Surrounding whitespace is ignored. The segments come back in the order
/// they appear in the input and carry everything needed to reproduce the
/// input as written: tag spellings, separators, and whether a number was
/// left out. Numbers with leading zeros are only accepted by
/// [`Grammar::Permissive`] and lose their zeros.
///
/// The permissive grammar accepts any spelling PEP 440 can normalize:
///
/// - Case is ignored (e.g. "1.0RC1" or "V1.0")
/// - A leading `v` is allowed (e.g. "v1.0")
/// - `.`, `-` and `_` separate the pre-release, post-release and development parts (e.g. "1.0-a_1")
/// - Numbers of pre-, post- and development releases may be left out (e.g. "1.0a", "1.0.dev")
/// - The synonyms `alpha`, `beta`, `c`, `pre`, `preview`, `rev` and `r` are accepted
/// - A post release may be written as just `-N` (e.g. "1.0-1")
///
/// ## Examples
///
/// ```rust
/// use parver_parser::{parse, Grammar, Number, PreTag, Segment, Separator};
///
/// let segments = parse("1.2rc1.dev0", Grammar::Strict).unwrap();
/// assert_eq!(
///     segments,
///     vec![
///         Segment::Release(vec![1, 2]),
///         Segment::Pre { tag: PreTag::Rc, value: Number::Explicit(1), sep1: None, sep2: None },
///         Segment::Dev { value: Number::Explicit(0), sep: Some(Separator::Dot) },
///     ]
/// );
///
/// // spellings only the permissive grammar accepts
/// assert!(parse("v1.2-RC", Grammar::Strict).is_err());
/// assert_eq!(
///     parse("v1.2-RC", Grammar::Permissive).unwrap(),
///     vec![
///         Segment::V,
///         Segment::Release(vec![1, 2]),
///         Segment::Pre { tag: PreTag::Rc, value: Number::Implicit, sep1: Some(Separator::Hyphen), sep2: None },
///     ]
/// );
/// ```
pub fn parse(input: &str, grammar: Grammar) -> Result<Vec<Segment>, Error<'_>> {
    Parser::new(input, grammar.rules())
        .parse()
        .map_err(|ErrorSpan { kind, span }| {
            let error = Error { input, span, kind };
            #[cfg(feature = "tracing")]
            tracing::trace!(input, ?grammar, %error, "rejected version string");
            error
        })
}

/// Possible errors that happen during parsing
/// and the location of the token where the error occurred.
///
/// # Example
///
/// ```rust
/// use parver_parser::{parse, Grammar};
///
/// let error = parse("1.0+", Grammar::Permissive).unwrap_err();
/// assert_eq!(error.to_string(), "Could not parse the local version label at position 4: No input");
///
/// let error = parse("1.0!", Grammar::Permissive).unwrap_err();
/// assert_eq!(error.to_string(), "Unexpected `!` at position 3");
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Error<'input> {
    input: &'input str,
    span: Span,
    kind: ErrorKind,
}

impl<'input> Error<'input> {
    /// Creates a new [`OwnedError`] out of this [`Error`].
    ///
    /// This is specialized version of [`Clone`] which returns a different type.
    #[inline]
    pub fn owned(&self) -> OwnedError {
        OwnedError {
            input: self.input.into(),
            span: self.span,
            kind: self.kind,
        }
    }

    /// Returns the original input line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use parver_parser::{parse, Grammar};
    /// let error = parse("1+", Grammar::Permissive).unwrap_err();
    /// assert_eq!(error.input(), "1+");
    /// ```
    #[inline]
    pub fn input(&self) -> &'input str {
        self.input
    }

    /// Returns range into the input string that points to the erroneous input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use parver_parser::{parse, Grammar};
    /// let error = parse("1.0.post", Grammar::Strict).unwrap_err();
    /// assert_eq!(error.error_span(), 8..8);
    /// ```
    #[inline]
    pub fn error_span(&self) -> Range<usize> {
        self.span.into()
    }

    /// Returns the kind of error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use parver_parser::{parse, ErrorKind, Grammar};
    /// assert_eq!(
    ///     parse("", Grammar::Permissive).unwrap_err().error_kind(),
    ///     ErrorKind::MissingRelease
    /// );
    /// assert_eq!(
    ///     parse("1.dev", Grammar::Strict).unwrap_err().error_kind(),
    ///     ErrorKind::MissingNumber
    /// );
    /// assert_eq!(
    ///     parse("1+", Grammar::Permissive).unwrap_err().error_kind(),
    ///     ErrorKind::MissingLocal
    /// );
    /// assert_eq!(
    ///     parse("1.99999999999999999999", Grammar::Permissive).unwrap_err().error_kind(),
    ///     ErrorKind::NumberTooLarge
    /// );
    /// assert_eq!(
    ///     parse("1!", Grammar::Permissive).unwrap_err().error_kind(),
    ///     ErrorKind::MissingRelease
    /// );
    /// assert_eq!(
    ///     parse("1.0?", Grammar::Permissive).unwrap_err().error_kind(),
    ///     ErrorKind::UnexpectedInput
    /// );
    /// ```
    #[inline]
    pub fn error_kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns a slice from the original input line that triggered the error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use parver_parser::{parse, Grammar};
    /// let error = parse("1.0-foo", Grammar::Permissive).unwrap_err();
    /// assert_eq!(error.erroneous_input(), "foo");
    /// ```
    #[inline]
    pub fn erroneous_input(&self) -> &'input str {
        self.span.at(self.input)
    }

    /// Returns a text representation of the error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use parver_parser::{parse, Grammar};
    /// let error = parse("1.0a", Grammar::Strict).unwrap_err();
    /// assert_eq!(error.error_line(), String::from("Could not parse the number at position 4: No input"));
    /// ```
    ///
    /// This is equivalent to the [`Display`] implementation, which can be further customized with format specifiers.
    ///
    /// ```rust
    /// # use parver_parser::{parse, Grammar};
    /// let error = parse("1?", Grammar::Permissive).unwrap_err();
    /// assert_eq!(format!("{:!^36}", error), String::from("!!!!Unexpected `?` at position 1!!!!"));
    /// ```
    pub fn error_line(&self) -> String {
        let at = self.span.start;
        let found = self.erroneous_input();
        match self.kind {
            ErrorKind::MissingRelease if found.is_empty() => {
                format!("Could not parse the release segment at position {}: No input", at)
            }
            ErrorKind::MissingRelease => format!(
                "Could not parse the release segment at position {}: `{}` is not a number",
                at, found
            ),
            ErrorKind::MissingNumber if found.is_empty() => {
                format!("Could not parse the number at position {}: No input", at)
            }
            ErrorKind::MissingNumber => format!(
                "Could not parse the number at position {}: `{}` is not a number",
                at, found
            ),
            ErrorKind::MissingLocal if found.is_empty() => format!(
                "Could not parse the local version label at position {}: No input",
                at
            ),
            ErrorKind::MissingLocal => format!(
                "Could not parse the local version label at position {}: `{}` is not alphanumeric",
                at, found
            ),
            ErrorKind::NumberTooLarge => format!(
                "Could not parse the number at position {}: `{}` is too large",
                at, found
            ),
            ErrorKind::UnexpectedInput if found.is_empty() => {
                format!("Unexpected end of input at position {}", at)
            }
            ErrorKind::UnexpectedInput => format!("Unexpected `{}` at position {}", found, at),
        }
    }

    /// Returns a caret line indication the erroneous input if it was written under the original input line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use parver_parser::{parse, Grammar};
    /// let error = parse("foo", Grammar::Permissive).unwrap_err();
    /// assert_eq!(error.indicate_erroneous_input(), "^^^");
    ///
    /// let error = parse("1.2.3-xyz", Grammar::Permissive).unwrap_err();
    /// assert_eq!(error.indicate_erroneous_input(), "~~~~~~^^^");
    /// ```
    pub fn indicate_erroneous_input(&self) -> String {
        let width = self.input[self.error_span()].chars().count();
        format!(
            "{0:~<start$}{0:^<width$}",
            "",
            start = self.input[..self.span.start].chars().count(),
            width = width
        )
    }
}

/// Owned version of [`Error`] which clones the input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedError {
    input: String,
    span: Span,
    kind: ErrorKind,
}

impl OwnedError {
    /// Return a borrowed version of this error.
    pub fn borrowed(&self) -> Error<'_> {
        Error {
            input: &self.input,
            span: self.span,
            kind: self.kind,
        }
    }

    /// See [`Error::input`].
    #[inline]
    pub fn input(&self) -> &str {
        self.borrowed().input()
    }

    /// See [`Error::error_span`].
    #[inline]
    pub fn error_span(&self) -> Range<usize> {
        self.borrowed().error_span()
    }

    /// See [`Error::error_kind`].
    #[inline]
    pub fn error_kind(&self) -> ErrorKind {
        self.kind
    }

    /// See [`Error::erroneous_input`].
    #[inline]
    pub fn erroneous_input(&self) -> &str {
        self.borrowed().erroneous_input()
    }

    /// See [`Error::error_line`].
    #[inline]
    pub fn error_line(&self) -> String {
        self.borrowed().error_line()
    }

    /// See [`Error::indicate_erroneous_input`].
    #[inline]
    pub fn indicate_erroneous_input(&self) -> String {
        self.borrowed().indicate_erroneous_input()
    }
}

/// Possible errors that can happen.
/// These don't include an information as those are covered by various
/// error methods like [`Error::erroneous_input`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Expected the release segment, but no number was found
    MissingRelease,
    /// Expected the number of a release part, but nothing was found
    MissingNumber,
    /// Expected a local version label after `+`, but nothing was found
    MissingLocal,
    /// A number does not fit into 64 bits
    NumberTooLarge,
    /// Found an unexpected input
    UnexpectedInput,
}

impl Display for Error<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.error_line())?;
        if f.alternate() {
            writeln!(f)?;
            writeln!(f, "|    {}", self.input)?;
            writeln!(f, "|    {}", self.indicate_erroneous_input())?;
        }
        Ok(())
    }
}

impl Display for OwnedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.borrowed().fmt(f)
    }
}

impl std::error::Error for Error<'_> {}

impl std::error::Error for OwnedError {}

impl From<Error<'_>> for OwnedError {
    fn from(error: Error<'_>) -> Self {
        error.owned()
    }
}

/// Byte offsets into the untrimmed input.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    fn at<'input>(&self, input: &'input str) -> &'input str {
        &input[self.start..self.end]
    }
}

impl From<Span> for Range<usize> {
    fn from(s: Span) -> Self {
        s.start..s.end
    }
}
