//! PEP 440 version.
//!
//! Companion version type for the parver_parser grammar.
//! A [`Version`] remembers how it was written (separators, tag spellings,
//! implicit numbers, a leading `v`) and renders back to that form, while
//! equality, ordering and hashing follow the PEP 440 rules.
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

use std::{
    cmp::Ordering,
    fmt::{self, Display, Write},
    hash,
    str::FromStr,
};

mod builder;
mod bump;
mod error;
mod key;

pub use builder::{Builder, Field, IntoRelease};
pub use error::{Error, VersionError};
pub use key::LocalPart;
pub use parver_parser::{Grammar, Number, PostTag, PreTag, Segment, Separator};

use key::CmpKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PreRelease {
    pub(crate) tag: PreTag,
    pub(crate) number: u64,
    pub(crate) implicit: bool,
    pub(crate) sep1: Option<Separator>,
    pub(crate) sep2: Option<Separator>,
}

/// `tag: None` is the implicit `-N` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PostRelease {
    pub(crate) tag: Option<PostTag>,
    pub(crate) number: u64,
    pub(crate) implicit: bool,
    pub(crate) sep1: Option<Separator>,
    pub(crate) sep2: Option<Separator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DevRelease {
    pub(crate) number: u64,
    pub(crate) implicit: bool,
    pub(crate) sep: Option<Separator>,
}

/// Represents a PEP 440 version number.
///
/// Versions are immutable, every transformation returns a new version.
/// Two versions are equal when PEP 440 considers them equal, regardless
/// of how they are written:
///
/// ```rust
/// # use parver_version::Version;
/// let a: Version = "v1.0-ALPHA.2".parse().unwrap();
/// let b: Version = "1.0a2".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "v1.0-alpha.2");
/// assert_eq!(a.normalize().to_string(), "1.0a2");
/// ```
#[derive(Clone)]
pub struct Version {
    release: Vec<u64>,
    v: bool,
    epoch: u64,
    epoch_implicit: bool,
    pre: Option<PreRelease>,
    post: Option<PostRelease>,
    dev: Option<DevRelease>,
    local: Option<String>,
    key: CmpKey,
}

impl Version {
    /// Constructs a new version out of release numbers only.
    ///
    /// ## Examples
    ///
    /// ```
    /// # use parver_version::{Version, VersionError};
    /// let version = Version::new([1, 2, 3]).unwrap();
    /// assert_eq!(version.to_string(), "1.2.3");
    ///
    /// assert_eq!(Version::new(Vec::<u64>::new()).unwrap_err(), VersionError::EmptyRelease);
    /// ```
    pub fn new(release: impl IntoRelease) -> Result<Self, VersionError> {
        Self::builder().release(release).build()
    }

    /// Starts a [`Builder`] to construct a version field by field.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Parse a string slice into a Version.
    ///
    /// For the accepted spellings, see [`parver_parser::parse`].
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use parver_version::{Grammar, Version};
    /// let version = Version::parse("1!2.0.post1+local", Grammar::Strict);
    /// assert!(version.is_ok());
    ///
    /// assert!(Version::parse("v2.0", Grammar::Strict).is_err());
    /// assert!(Version::parse("v2.0", Grammar::Permissive).is_ok());
    /// ```
    pub fn parse(input: &str, grammar: Grammar) -> Result<Self, Error> {
        let segments = parver_parser::parse(input, grammar).map_err(|e| e.owned())?;
        Ok(Self::from_segments(segments)?)
    }

    /// Builds a version out of parsed segments.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Segment>,
    ) -> Result<Self, VersionError> {
        let mut builder = Builder::default();
        for segment in segments {
            match segment {
                Segment::V => builder.v = Some(true),
                Segment::Epoch(epoch) => builder.epoch = Some(Number::Explicit(epoch)),
                Segment::Release(release) => builder.release = Some(release),
                Segment::Pre {
                    tag,
                    value,
                    sep1,
                    sep2,
                } => {
                    builder.pre_tag = Field::Value(tag);
                    builder.pre = Field::Value(value);
                    builder.pre_sep1 = sep1.into();
                    builder.pre_sep2 = sep2.into();
                }
                Segment::Post {
                    tag: Some(tag),
                    value,
                    sep1,
                    sep2,
                } => {
                    builder.post = Field::Value(value);
                    builder.post_tag = Field::Value(tag);
                    builder.post_sep1 = sep1.into();
                    builder.post_sep2 = sep2.into();
                }
                Segment::Post {
                    tag: None, value, ..
                } => {
                    builder.post = Field::Value(value);
                    builder.post_tag = Field::Absent;
                }
                Segment::Dev { value, sep } => {
                    builder.dev = Field::Value(value);
                    builder.dev_sep = sep.into();
                }
                Segment::Local(local) => builder.local = Field::Value(local),
            }
        }
        builder.build()
    }

    /// The release numbers, never empty.
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// Whether the version is written with a leading `v`.
    pub fn v(&self) -> bool {
        self.v
    }

    /// The epoch, `0` unless given.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether the epoch was left out, in which case it is not rendered.
    pub fn epoch_implicit(&self) -> bool {
        self.epoch_implicit
    }

    /// The pre-release tag as written.
    pub fn pre_tag(&self) -> Option<PreTag> {
        self.pre.map(|pre| pre.tag)
    }

    /// The pre-release number.
    pub fn pre(&self) -> Option<u64> {
        self.pre.map(|pre| pre.number)
    }

    /// Whether the pre-release number was left out, as in `1.0a`.
    pub fn pre_implicit(&self) -> bool {
        self.pre.map_or(false, |pre| pre.implicit)
    }

    /// The separator before the pre-release tag.
    pub fn pre_sep1(&self) -> Option<Separator> {
        self.pre.and_then(|pre| pre.sep1)
    }

    /// The separator between the pre-release tag and number.
    pub fn pre_sep2(&self) -> Option<Separator> {
        self.pre.and_then(|pre| pre.sep2)
    }

    /// The post-release number.
    pub fn post(&self) -> Option<u64> {
        self.post.map(|post| post.number)
    }

    /// The post-release tag as written, `None` for the implicit form `1.0-1`.
    pub fn post_tag(&self) -> Option<PostTag> {
        self.post.and_then(|post| post.tag)
    }

    /// Whether the post-release number was left out, as in `1.0.post`.
    pub fn post_implicit(&self) -> bool {
        self.post.map_or(false, |post| post.implicit)
    }

    /// The separator before the post-release tag, `-` for the implicit form.
    pub fn post_sep1(&self) -> Option<Separator> {
        self.post.and_then(|post| post.sep1)
    }

    /// The separator between the post-release tag and number.
    pub fn post_sep2(&self) -> Option<Separator> {
        self.post.and_then(|post| post.sep2)
    }

    /// The development release number.
    pub fn dev(&self) -> Option<u64> {
        self.dev.map(|dev| dev.number)
    }

    /// Whether the development release number was left out, as in `1.0.dev`.
    pub fn dev_implicit(&self) -> bool {
        self.dev.map_or(false, |dev| dev.implicit)
    }

    /// The separator before `dev`.
    pub fn dev_sep(&self) -> Option<Separator> {
        self.dev.and_then(|dev| dev.sep)
    }

    /// The local version label, lowercased.
    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    /// The local version label split into its parts.
    ///
    /// ```rust
    /// # use parver_version::{LocalPart, Version};
    /// let version: Version = "1.0+ubuntu-007.b".parse().unwrap();
    /// assert_eq!(
    ///     version.local_parts(),
    ///     Some(vec![
    ///         LocalPart::Alpha("ubuntu".into()),
    ///         LocalPart::Numeric("7".into()),
    ///         LocalPart::Alpha("b".into()),
    ///     ])
    /// );
    /// ```
    pub fn local_parts(&self) -> Option<Vec<LocalPart>> {
        self.local.as_deref().map(LocalPart::split)
    }

    /// The rendered version without the local label.
    ///
    /// ```rust
    /// # use parver_version::Version;
    /// let version: Version = "v1.0+abc.5".parse().unwrap();
    /// assert_eq!(version.public(), "v1.0");
    /// ```
    pub fn public(&self) -> String {
        let mut rendered = self.to_string();
        if let Some(plus) = rendered.find('+') {
            rendered.truncate(plus);
        }
        rendered
    }

    /// Returns true if this is a pre-release or a development release.
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    /// Returns true if this is an alpha pre-release.
    pub fn is_alpha(&self) -> bool {
        self.normalized_pre_tag() == Some(PreTag::A)
    }

    /// Returns true if this is a beta pre-release.
    pub fn is_beta(&self) -> bool {
        self.normalized_pre_tag() == Some(PreTag::B)
    }

    /// Returns true if this is a release candidate.
    ///
    /// ```rust
    /// # use parver_version::Version;
    /// assert!("1.0c1".parse::<Version>().unwrap().is_release_candidate());
    /// assert!("1.0-preview".parse::<Version>().unwrap().is_release_candidate());
    /// assert!(!"1.0b1".parse::<Version>().unwrap().is_release_candidate());
    /// ```
    pub fn is_release_candidate(&self) -> bool {
        self.normalized_pre_tag() == Some(PreTag::Rc)
    }

    /// Returns true if this is a post-release.
    pub fn is_postrelease(&self) -> bool {
        self.post.is_some()
    }

    /// Returns true if this is a development release.
    pub fn is_devrelease(&self) -> bool {
        self.dev.is_some()
    }

    fn normalized_pre_tag(&self) -> Option<PreTag> {
        self.pre_tag().map(PreTag::normalize)
    }
}

impl FromStr for Version {
    type Err = Error;

    /// Parses with the permissive grammar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Grammar::Permissive)
    }
}

impl TryFrom<&str> for Version {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = String::with_capacity(16);
        if self.v {
            result.push('v');
        }
        if !self.epoch_implicit {
            write!(result, "{}!", self.epoch)?;
        }

        let mut release = self.release.iter();
        if let Some(first) = release.next() {
            write!(result, "{}", first)?;
        }
        for number in release {
            write!(result, ".{}", number)?;
        }

        if let Some(pre) = self.pre {
            push_sep(&mut result, pre.sep1);
            result.push_str(pre.tag.as_str());
            push_sep(&mut result, pre.sep2);
            if !pre.implicit {
                write!(result, "{}", pre.number)?;
            }
        }

        if let Some(post) = self.post {
            match post.tag {
                None => write!(result, "-{}", post.number)?,
                Some(tag) => {
                    push_sep(&mut result, post.sep1);
                    result.push_str(tag.as_str());
                    push_sep(&mut result, post.sep2);
                    if !post.implicit {
                        write!(result, "{}", post.number)?;
                    }
                }
            }
        }

        if let Some(dev) = self.dev {
            push_sep(&mut result, dev.sep);
            result.push_str("dev");
            if !dev.implicit {
                write!(result, "{}", dev.number)?;
            }
        }

        if let Some(local) = &self.local {
            result.push('+');
            result.push_str(local);
        }

        f.pad(result.as_ref())
    }
}

fn push_sep(result: &mut String, sep: Option<Separator>) {
    if let Some(sep) = sep {
        result.push(sep.as_char());
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Version").field(&self.to_string()).finish()
    }
}

impl PartialEq for Version {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl hash::Hash for Version {
    fn hash<H: hash::Hasher>(&self, into: &mut H) {
        self.key.hash(into);
    }
}

#[cfg(feature = "serde")]
use serde::{
    de::{self, Deserialize, Deserializer, Visitor},
    ser::{Serialize, Serializer},
};
#[cfg(feature = "serde")]
impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VersionVisitor;

        impl<'de> Visitor<'de> for VersionVisitor {
            type Value = Version;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a PEP 440 version string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(VersionVisitor)
    }
}
