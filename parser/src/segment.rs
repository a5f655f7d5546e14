use std::{
    error::Error,
    fmt::{self, Display},
    str::FromStr,
};

/// One of the separator characters PEP 440 permits between version parts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Separator {
    /// `.`
    Dot,
    /// `-`
    Hyphen,
    /// `_`
    Underscore,
}

impl Separator {
    /// The separator as a character.
    pub const fn as_char(self) -> char {
        match self {
            Separator::Dot => '.',
            Separator::Hyphen => '-',
            Separator::Underscore => '_',
        }
    }

    /// The separator as a string slice.
    pub const fn as_str(self) -> &'static str {
        match self {
            Separator::Dot => ".",
            Separator::Hyphen => "-",
            Separator::Underscore => "_",
        }
    }

    pub(crate) fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'.' => Some(Separator::Dot),
            b'-' => Some(Separator::Hyphen),
            b'_' => Some(Separator::Underscore),
            _ => None,
        }
    }
}

impl Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Pre-release identifier, in any of the spellings PEP 440 accepts.
///
/// Only [`PreTag::A`], [`PreTag::B`] and [`PreTag::Rc`] are normal forms,
/// the remaining variants are synonyms, see [`PreTag::normalize`].
/// The declaration order of the normal forms is their sort order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreTag {
    /// `a`
    A,
    /// `b`
    B,
    /// `rc`
    Rc,
    /// `c`, a synonym for `rc`
    C,
    /// `alpha`, a synonym for `a`
    Alpha,
    /// `beta`, a synonym for `b`
    Beta,
    /// `preview`, a synonym for `rc`
    Preview,
    /// `pre`, a synonym for `rc`
    Pre,
}

impl PreTag {
    /// The tag as written in a version string.
    pub const fn as_str(self) -> &'static str {
        match self {
            PreTag::A => "a",
            PreTag::B => "b",
            PreTag::Rc => "rc",
            PreTag::C => "c",
            PreTag::Alpha => "alpha",
            PreTag::Beta => "beta",
            PreTag::Preview => "preview",
            PreTag::Pre => "pre",
        }
    }

    /// Maps synonyms onto the normal form `a`, `b` or `rc`.
    ///
    /// ```rust
    /// # use parver_parser::PreTag;
    /// assert_eq!(PreTag::Alpha.normalize(), PreTag::A);
    /// assert_eq!(PreTag::Preview.normalize(), PreTag::Rc);
    /// assert_eq!(PreTag::Rc.normalize(), PreTag::Rc);
    /// ```
    pub const fn normalize(self) -> Self {
        match self {
            PreTag::A | PreTag::Alpha => PreTag::A,
            PreTag::B | PreTag::Beta => PreTag::B,
            PreTag::Rc | PreTag::C | PreTag::Preview | PreTag::Pre => PreTag::Rc,
        }
    }

    const ALL: [PreTag; 8] = [
        PreTag::A,
        PreTag::B,
        PreTag::Rc,
        PreTag::C,
        PreTag::Alpha,
        PreTag::Beta,
        PreTag::Preview,
        PreTag::Pre,
    ];
}

impl Display for PreTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PreTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PreTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTag::new(TagKind::Pre, s))
    }
}

/// Post-release identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PostTag {
    /// `post`
    Post,
    /// `rev`
    Rev,
    /// `r`
    R,
}

impl PostTag {
    /// The tag as written in a version string.
    pub const fn as_str(self) -> &'static str {
        match self {
            PostTag::Post => "post",
            PostTag::Rev => "rev",
            PostTag::R => "r",
        }
    }
}

impl Display for PostTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PostTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [PostTag::Post, PostTag::Rev, PostTag::R]
            .iter()
            .copied()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTag::new(TagKind::Post, s))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum TagKind {
    Pre,
    Post,
}

/// Returned when a string is not a known pre- or post-release tag.
///
/// ```rust
/// # use parver_parser::PreTag;
/// let error = "gamma".parse::<PreTag>().unwrap_err();
/// assert_eq!(error.to_string(), "`gamma` is not a valid pre-release tag");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag {
    kind: TagKind,
    tag: String,
}

impl UnknownTag {
    fn new(kind: TagKind, tag: &str) -> Self {
        Self {
            kind,
            tag: tag.into(),
        }
    }

    /// The rejected input.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            TagKind::Pre => "pre-release",
            TagKind::Post => "post-release",
        };
        write!(f, "`{}` is not a valid {} tag", self.tag, kind)
    }
}

impl Error for UnknownTag {}

/// The number of a pre-, post- or development release.
///
/// PEP 440 allows the number to be left out (`1.0a`, `1.0.post`, `1.0.dev`),
/// in which case it is an implicit zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Number {
    /// The marker was given without a number.
    Implicit,
    /// An explicit number.
    Explicit(u64),
}

impl Number {
    /// The numeric value, which is `0` for [`Number::Implicit`].
    pub const fn value(self) -> u64 {
        match self {
            Number::Implicit => 0,
            Number::Explicit(n) => n,
        }
    }

    /// Returns true for [`Number::Implicit`].
    pub const fn is_implicit(self) -> bool {
        matches!(self, Number::Implicit)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::Explicit(n)
    }
}

/// A typed part of a version string, in the order it appeared in the input.
///
/// A well formed version yields each kind at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A leading `v`.
    V,
    /// `N!`
    Epoch(u64),
    /// The dotted release numbers.
    Release(Vec<u64>),
    /// A pre-release such as `a1`, `.rc-2` or `-beta`.
    Pre {
        /// The identifier as written.
        tag: PreTag,
        /// The pre-release number.
        value: Number,
        /// Separator before the tag.
        sep1: Option<Separator>,
        /// Separator between the tag and the number.
        sep2: Option<Separator>,
    },
    /// A post-release such as `.post1`, `_rev` or the implicit form `-1`.
    Post {
        /// The identifier as written, `None` for the implicit form.
        tag: Option<PostTag>,
        /// The post-release number.
        value: Number,
        /// Separator before the tag, always `None` for the implicit form.
        sep1: Option<Separator>,
        /// Separator between the tag and the number, always `None` for the implicit form.
        sep2: Option<Separator>,
    },
    /// A development release such as `.dev3`.
    Dev {
        /// The development release number.
        value: Number,
        /// Separator before `dev`.
        sep: Option<Separator>,
    },
    /// The label after `+`, numeric parts without leading zeros.
    Local(String),
}
