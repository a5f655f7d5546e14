use crate::{key::CmpKey, DevRelease, PostRelease, PreRelease, Version, VersionError};
use parver_parser::{Number, PostTag, PreTag, Separator};

/// A constructor argument that tells "not given" apart from "given as none".
///
/// PEP 440 versions have several fields whose defaults depend on other
/// fields. `Unset` lets those rules apply, `Absent` explicitly asks for
/// no value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// The argument was not given.
    Unset,
    /// The argument was given as none.
    Absent,
    /// The argument was given.
    Value(T),
}

impl<T> Field<T> {
    /// Returns true for [`Field::Unset`].
    pub const fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    /// The value, treating `Unset` and `Absent` alike.
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Value(value) => Some(value),
            Field::Unset | Field::Absent => None,
        }
    }

    /// `self`, unless it is unset.
    pub fn or(self, other: Self) -> Self {
        match self {
            Field::Unset => other,
            given => given,
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unset
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Value(value),
            None => Field::Absent,
        }
    }
}

/// Types that can be used as the release numbers of a version.
///
/// A single number is a one-element release.
///
/// ```rust
/// # use parver_version::Version;
/// assert_eq!(Version::new(2).unwrap().to_string(), "2");
/// assert_eq!(Version::new([1, 4]).unwrap().to_string(), "1.4");
/// assert_eq!(Version::new(vec![1, 4, 2]).unwrap().to_string(), "1.4.2");
///
/// let version = Version::new([1, 4, 2]).unwrap();
/// assert_eq!(Version::new(&version.release()[..2]).unwrap().to_string(), "1.4");
/// ```
pub trait IntoRelease {
    /// Converts into release numbers.
    fn into_release(self) -> Vec<u64>;
}

impl IntoRelease for u64 {
    fn into_release(self) -> Vec<u64> {
        vec![self]
    }
}

impl<const N: usize> IntoRelease for [u64; N] {
    fn into_release(self) -> Vec<u64> {
        self.to_vec()
    }
}

impl IntoRelease for &[u64] {
    fn into_release(self) -> Vec<u64> {
        self.to_vec()
    }
}

impl IntoRelease for Vec<u64> {
    fn into_release(self) -> Vec<u64> {
        self
    }
}

/// Builds a [`Version`] field by field.
///
/// Fields that are not set follow the PEP 440 defaults: the epoch is an
/// implicit zero, `post_tag` becomes `post` when a post-release number is
/// given, and the separators before `post` and `dev` become `.`.
/// [`Builder::build`] validates the combination.
///
/// ```rust
/// # use parver_version::{Version, PreTag, Separator};
/// let version = Version::builder()
///     .release([1, 0])
///     .pre_tag(PreTag::Rc)
///     .pre(1)
///     .pre_sep1(Some(Separator::Hyphen))
///     .dev(2)
///     .build()
///     .unwrap();
/// assert_eq!(version.to_string(), "1.0-rc1.dev2");
///
/// assert!(Version::builder().release([1, 0]).pre(1).build().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Builder {
    pub(crate) release: Option<Vec<u64>>,
    pub(crate) v: Option<bool>,
    pub(crate) epoch: Option<Number>,
    pub(crate) pre_tag: Field<PreTag>,
    pub(crate) pre: Field<Number>,
    pub(crate) pre_sep1: Field<Separator>,
    pub(crate) pre_sep2: Field<Separator>,
    pub(crate) post: Field<Number>,
    pub(crate) post_tag: Field<PostTag>,
    pub(crate) post_sep1: Field<Separator>,
    pub(crate) post_sep2: Field<Separator>,
    pub(crate) dev: Field<Number>,
    pub(crate) dev_sep: Field<Separator>,
    pub(crate) local: Field<String>,
}

impl Builder {
    /// Sets the release numbers.
    pub fn release(mut self, release: impl IntoRelease) -> Self {
        self.release = Some(release.into_release());
        self
    }

    /// Whether the version is rendered with a leading `v`.
    pub fn v(mut self, v: bool) -> Self {
        self.v = Some(v);
        self
    }

    /// Sets an explicit epoch, which is rendered even when it is `0`.
    pub fn epoch(mut self, epoch: u64) -> Self {
        self.epoch = Some(Number::Explicit(epoch));
        self
    }

    /// Resets the epoch to the implicit `0`.
    pub fn implicit_epoch(mut self) -> Self {
        self.epoch = Some(Number::Implicit);
        self
    }

    /// Sets the pre-release tag. Requires a pre-release number.
    pub fn pre_tag(mut self, tag: PreTag) -> Self {
        self.pre_tag = Field::Value(tag);
        self
    }

    /// Sets the pre-release number. Requires a pre-release tag.
    pub fn pre(mut self, pre: u64) -> Self {
        self.pre = Field::Value(Number::Explicit(pre));
        self
    }

    /// Sets a pre-release without a number, as in `1.0a`.
    pub fn implicit_pre(mut self) -> Self {
        self.pre = Field::Value(Number::Implicit);
        self
    }

    /// Removes the pre-release.
    pub fn clear_pre(mut self) -> Self {
        self.pre = Field::Absent;
        self
    }

    /// Sets the separator before the pre-release tag.
    pub fn pre_sep1(mut self, sep: Option<Separator>) -> Self {
        self.pre_sep1 = sep.into();
        self
    }

    /// Sets the separator between the pre-release tag and number.
    /// Requires an explicit pre-release number.
    pub fn pre_sep2(mut self, sep: Option<Separator>) -> Self {
        self.pre_sep2 = sep.into();
        self
    }

    /// Sets the post-release number.
    pub fn post(mut self, post: u64) -> Self {
        self.post = Field::Value(Number::Explicit(post));
        self
    }

    /// Sets a post-release without a number, as in `1.0.post`.
    pub fn implicit_post(mut self) -> Self {
        self.post = Field::Value(Number::Implicit);
        self
    }

    /// Removes the post-release.
    pub fn clear_post(mut self) -> Self {
        self.post = Field::Absent;
        self
    }

    /// Sets the post-release tag. `None` selects the implicit form `1.0-1`.
    pub fn post_tag(mut self, tag: Option<PostTag>) -> Self {
        self.post_tag = tag.into();
        self
    }

    /// Sets the separator before the post-release tag.
    pub fn post_sep1(mut self, sep: Option<Separator>) -> Self {
        self.post_sep1 = sep.into();
        self
    }

    /// Sets the separator between the post-release tag and number.
    /// Requires an explicit post-release number.
    pub fn post_sep2(mut self, sep: Option<Separator>) -> Self {
        self.post_sep2 = sep.into();
        self
    }

    /// Sets the development release number.
    pub fn dev(mut self, dev: u64) -> Self {
        self.dev = Field::Value(Number::Explicit(dev));
        self
    }

    /// Sets a development release without a number, as in `1.0.dev`.
    pub fn implicit_dev(mut self) -> Self {
        self.dev = Field::Value(Number::Implicit);
        self
    }

    /// Removes the development release.
    pub fn clear_dev(mut self) -> Self {
        self.dev = Field::Absent;
        self
    }

    /// Sets the separator before `dev`.
    pub fn dev_sep(mut self, sep: Option<Separator>) -> Self {
        self.dev_sep = sep.into();
        self
    }

    /// Sets the local version label.
    pub fn local(mut self, local: impl Into<String>) -> Self {
        self.local = Field::Value(local.into());
        self
    }

    /// Removes the local version label.
    pub fn clear_local(mut self) -> Self {
        self.local = Field::Absent;
        self
    }

    /// Fields given here win, unset ones are taken from `base`.
    pub(crate) fn over(self, base: Builder) -> Builder {
        Builder {
            release: self.release.or(base.release),
            v: self.v.or(base.v),
            epoch: self.epoch.or(base.epoch),
            pre_tag: self.pre_tag.or(base.pre_tag),
            pre: self.pre.or(base.pre),
            pre_sep1: self.pre_sep1.or(base.pre_sep1),
            pre_sep2: self.pre_sep2.or(base.pre_sep2),
            post: self.post.or(base.post),
            post_tag: self.post_tag.or(base.post_tag),
            post_sep1: self.post_sep1.or(base.post_sep1),
            post_sep2: self.post_sep2.or(base.post_sep2),
            dev: self.dev.or(base.dev),
            dev_sep: self.dev_sep.or(base.dev_sep),
            local: self.local.or(base.local),
        }
    }

    /// Validates the fields and builds the version.
    pub fn build(self) -> Result<Version, VersionError> {
        let release = self.release.ok_or(VersionError::MissingRelease)?;
        if release.is_empty() {
            return Err(VersionError::EmptyRelease);
        }
        let (epoch, epoch_implicit) = match self.epoch {
            Some(Number::Explicit(epoch)) => (epoch, false),
            Some(Number::Implicit) | None => (0, true),
        };
        let local = self.local.into_option().map(validate_local).transpose()?;
        let pre = validate_pre(self.pre_tag, self.pre, self.pre_sep1, self.pre_sep2)?;
        let post = validate_post(
            self.post,
            self.post_tag,
            self.post_sep1,
            self.post_sep2,
            pre.map_or(false, |pre| pre.implicit),
        )?;
        let dev = validate_dev(self.dev, self.dev_sep)?;

        Ok(Version::assemble(
            release,
            self.v.unwrap_or(false),
            epoch,
            epoch_implicit,
            pre,
            post,
            dev,
            local,
        ))
    }
}

fn explicit(number: Number) -> (u64, bool) {
    (number.value(), number.is_implicit())
}

fn validate_local(local: String) -> Result<String, VersionError> {
    let valid = local
        .split(|c: char| matches!(c, '.' | '-' | '_'))
        .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_alphanumeric()));
    if valid {
        Ok(local.to_ascii_lowercase())
    } else {
        Err(VersionError::InvalidLocal(local))
    }
}

fn validate_pre(
    tag: Field<PreTag>,
    pre: Field<Number>,
    sep1: Field<Separator>,
    sep2: Field<Separator>,
) -> Result<Option<PreRelease>, VersionError> {
    let tag = match tag.into_option() {
        Some(tag) => tag,
        None => {
            if pre.into_option().is_some() {
                return Err(VersionError::MissingField {
                    field: "pre_tag",
                    required_by: "pre",
                });
            }
            if sep1.into_option().is_some() || sep2.into_option().is_some() {
                return Err(VersionError::Conflict(
                    "cannot set pre_sep1 or pre_sep2 without pre_tag",
                ));
            }
            return Ok(None);
        }
    };
    let (number, implicit) = match pre.into_option() {
        Some(pre) => explicit(pre),
        None => {
            return Err(VersionError::MissingField {
                field: "pre",
                required_by: "pre_tag",
            })
        }
    };
    if implicit && sep2.into_option().is_some() {
        return Err(VersionError::Conflict(
            "pre_sep2 cannot be set for an implicit pre-release number",
        ));
    }
    Ok(Some(PreRelease {
        tag,
        number,
        implicit,
        sep1: sep1.into_option(),
        sep2: sep2.into_option(),
    }))
}

fn validate_post(
    post: Field<Number>,
    tag: Field<PostTag>,
    sep1: Field<Separator>,
    sep2: Field<Separator>,
    pre_implicit: bool,
) -> Result<Option<PostRelease>, VersionError> {
    let got_sep = !sep1.is_unset() || !sep2.is_unset();
    let (number, implicit) = match post.into_option() {
        Some(post) => explicit(post),
        None => {
            if !tag.is_unset() {
                return Err(VersionError::MissingField {
                    field: "post",
                    required_by: "post_tag",
                });
            }
            if got_sep {
                return Err(VersionError::Conflict(
                    "cannot set post_sep1 or post_sep2 without post_tag",
                ));
            }
            return Ok(None);
        }
    };

    if implicit && sep2.into_option().is_some() {
        return Err(VersionError::Conflict(
            "post_sep2 cannot be set for an implicit post-release number",
        ));
    }

    let tag = match tag {
        Field::Absent => {
            if implicit {
                return Err(VersionError::Conflict(
                    "implicit post releases (post_tag=None) require a numerical value for 'post'",
                ));
            }
            if got_sep {
                return Err(VersionError::Conflict(
                    "post_sep1 and post_sep2 cannot be set for implicit post releases (post_tag=None)",
                ));
            }
            if pre_implicit {
                return Err(VersionError::Conflict(
                    "post_tag cannot be None with an implicit pre-release number",
                ));
            }
            return Ok(Some(PostRelease {
                tag: None,
                number,
                implicit,
                sep1: Some(Separator::Hyphen),
                sep2: None,
            }));
        }
        Field::Value(tag) => tag,
        Field::Unset => PostTag::Post,
    };
    let sep1 = match sep1 {
        Field::Unset => Some(Separator::Dot),
        given => given.into_option(),
    };
    Ok(Some(PostRelease {
        tag: Some(tag),
        number,
        implicit,
        sep1,
        sep2: sep2.into_option(),
    }))
}

fn validate_dev(dev: Field<Number>, sep: Field<Separator>) -> Result<Option<DevRelease>, VersionError> {
    let (number, implicit) = match dev.into_option() {
        Some(dev) => explicit(dev),
        None if sep.is_unset() => return Ok(None),
        None => return Err(VersionError::Conflict("cannot set dev_sep without dev")),
    };
    let sep = match sep {
        Field::Unset => Some(Separator::Dot),
        given => given.into_option(),
    };
    Ok(Some(DevRelease {
        number,
        implicit,
        sep,
    }))
}

impl Version {
    /// Puts validated parts together and derives the comparison key.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        release: Vec<u64>,
        v: bool,
        epoch: u64,
        epoch_implicit: bool,
        pre: Option<PreRelease>,
        post: Option<PostRelease>,
        dev: Option<DevRelease>,
        local: Option<String>,
    ) -> Self {
        let key = CmpKey::new(
            epoch,
            &release,
            pre.map(|pre| (pre.tag.normalize(), pre.number)),
            post.map(|post| post.number),
            dev.map(|dev| dev.number),
            local.as_deref(),
        );
        Version {
            release,
            v,
            epoch,
            epoch_implicit,
            pre,
            post,
            dev,
            local,
            key,
        }
    }

    /// The fields this version was constructed from.
    ///
    /// Implicit numbers stay implicit and the separators of the implicit
    /// post-release form are left unset.
    pub(crate) fn to_builder(&self) -> Builder {
        let mut builder = Builder {
            release: Some(self.release.clone()),
            v: Some(self.v),
            epoch: Some(if self.epoch_implicit {
                Number::Implicit
            } else {
                Number::Explicit(self.epoch)
            }),
            local: self.local.clone().into(),
            ..Builder::default()
        };
        if let Some(pre) = self.pre {
            builder.pre_tag = Field::Value(pre.tag);
            builder.pre = Field::Value(number(pre.number, pre.implicit));
            builder.pre_sep1 = pre.sep1.into();
            builder.pre_sep2 = pre.sep2.into();
        }
        if let Some(post) = self.post {
            builder.post = Field::Value(number(post.number, post.implicit));
            builder.post_tag = post.tag.into();
            if post.tag.is_some() {
                builder.post_sep1 = post.sep1.into();
                builder.post_sep2 = post.sep2.into();
            }
        }
        if let Some(dev) = self.dev {
            builder.dev = Field::Value(number(dev.number, dev.implicit));
            builder.dev_sep = dev.sep.into();
        }
        builder
    }
}

fn number(value: u64, implicit: bool) -> Number {
    if implicit {
        Number::Implicit
    } else {
        Number::Explicit(value)
    }
}
