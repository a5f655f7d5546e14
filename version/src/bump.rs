use crate::{
    Builder, DevRelease, Field, PostRelease, PostTag, PreRelease, PreTag, Separator, Version,
    VersionError,
};

/// Zero-extends `release` to `len` numbers.
fn pad(release: &mut Vec<u64>, len: usize, field: &'static str) -> Result<(), VersionError> {
    if let Some(additional) = len.checked_sub(release.len()) {
        release
            .try_reserve_exact(additional)
            .map_err(|_| VersionError::Overflow { field })?;
        release.resize(len, 0);
    }
    Ok(())
}

/// `by - 1` for an unset field so that bumping starts at zero.
fn bumped(field: &'static str, current: Option<u64>, by: i64) -> Result<u64, VersionError> {
    let next = match current {
        None if by < 0 => return Err(VersionError::NegativeBump { field }),
        None => i128::from(by) - 1,
        Some(current) => i128::from(current) + i128::from(by),
    };
    if next < 0 {
        Err(VersionError::Negative { field })
    } else {
        u64::try_from(next).map_err(|_| VersionError::Overflow { field })
    }
}

impl Version {
    /// Returns a copy with the given fields replaced.
    ///
    /// Fields left unset in `changes` keep their values, implicit numbers
    /// stay implicit. Clearing the pre-release also clears its tag and
    /// separators, clearing the post-release clears its tag and separators,
    /// and a post-release tag of `None` switches to the implicit form `1.0-1`.
    ///
    /// ```rust
    /// # use parver_version::{Version, PreTag};
    /// let version: Version = "1.0-a_1.post2".parse().unwrap();
    ///
    /// let changed = version.replace(Version::builder().pre_tag(PreTag::B)).unwrap();
    /// assert_eq!(changed.to_string(), "1.0-b_1.post2");
    ///
    /// let changed = version.replace(Version::builder().clear_pre().post_tag(None)).unwrap();
    /// assert_eq!(changed.to_string(), "1.0-2");
    /// ```
    pub fn replace(&self, changes: Builder) -> Result<Version, VersionError> {
        let mut base = self.to_builder();
        let clear_pre = matches!(changes.pre, Field::Absent);
        let clear_post = matches!(changes.post, Field::Absent);

        if clear_post || matches!(changes.post_tag, Field::Absent) {
            base.post_sep1 = Field::Unset;
            base.post_sep2 = Field::Unset;
        }
        if clear_pre {
            base.pre_sep1 = Field::Unset;
            base.pre_sep2 = Field::Unset;
        }
        if matches!(changes.dev, Field::Absent) {
            base.dev_sep = Field::Unset;
        }

        let mut merged = changes.over(base);
        if clear_post {
            merged.post_tag = Field::Unset;
        }
        if clear_pre {
            merged.pre_tag = Field::Absent;
        }
        merged.build()
    }

    fn with_release_at(
        &self,
        index: usize,
        value: Option<u64>,
        zero_following: bool,
    ) -> Result<Version, VersionError> {
        let len = index
            .checked_add(1)
            .ok_or(VersionError::Overflow { field: "index" })?;
        let mut release = self.release.clone();
        pad(&mut release, len, "index")?;
        release[index] = match value {
            Some(value) => value,
            None => release[index]
                .checked_add(1)
                .ok_or(VersionError::Overflow { field: "release" })?,
        };
        if zero_following {
            release[len..].iter_mut().for_each(|n| *n = 0);
        }
        self.replace(Builder::default().release(release))
    }

    /// Increments the release number at `index` and zeroes the following ones.
    ///
    /// The release is extended with zeros when `index` is beyond its end.
    ///
    /// ```rust
    /// # use parver_version::Version;
    /// let version = Version::new([1, 4, 9]).unwrap();
    /// assert_eq!(version.bump_release(1).unwrap().to_string(), "1.5.0");
    /// assert_eq!(version.bump_release(4).unwrap().to_string(), "1.4.9.0.1");
    /// ```
    pub fn bump_release(&self, index: usize) -> Result<Version, VersionError> {
        self.with_release_at(index, None, true)
    }

    /// Sets the release number at `index` and zeroes the following ones.
    ///
    /// ```rust
    /// # use parver_version::Version;
    /// let version = Version::new([1, 4, 9]).unwrap();
    /// assert_eq!(version.bump_release_to(0, 3).unwrap().to_string(), "3.0.0");
    /// ```
    pub fn bump_release_to(&self, index: usize, value: u64) -> Result<Version, VersionError> {
        self.with_release_at(index, Some(value), true)
    }

    /// Sets the release number at `index`, keeping the following ones.
    ///
    /// ```rust
    /// # use parver_version::Version;
    /// let version = Version::new([1, 4, 9]).unwrap();
    /// assert_eq!(version.set_release(1, 5).unwrap().to_string(), "1.5.9");
    /// assert_eq!(version.set_release(4, 5).unwrap().to_string(), "1.4.9.0.5");
    /// ```
    pub fn set_release(&self, index: usize, value: u64) -> Result<Version, VersionError> {
        self.with_release_at(index, Some(value), false)
    }

    /// Adds `by` to the epoch, which makes the epoch explicit.
    pub fn bump_epoch(&self, by: i64) -> Result<Version, VersionError> {
        let epoch = bumped("epoch", Some(self.epoch), by)?;
        self.replace(Builder::default().epoch(epoch))
    }

    /// Adds `by` to the pre-release number, or starts a pre-release at
    /// `by - 1` when there is none.
    ///
    /// Starting a pre-release needs a `tag`. For an existing pre-release,
    /// `tag` may be omitted or must match the current tag.
    ///
    /// ```rust
    /// # use parver_version::{PreTag, Version};
    /// let version = Version::new([1, 4]).unwrap();
    /// let alpha = version.bump_pre(Some(PreTag::A), 1).unwrap();
    /// assert_eq!(alpha.to_string(), "1.4a0");
    /// assert_eq!(alpha.bump_pre(None, 1).unwrap().to_string(), "1.4a1");
    ///
    /// assert!(version.bump_pre(None, 1).is_err());
    /// assert!(alpha.bump_pre(Some(PreTag::B), 1).is_err());
    /// ```
    pub fn bump_pre(&self, tag: Option<PreTag>, by: i64) -> Result<Version, VersionError> {
        let pre = bumped("pre", self.pre(), by)?;
        let tag = match (self.pre_tag(), tag) {
            (None, None) => {
                return Err(VersionError::MissingField {
                    field: "pre_tag",
                    required_by: "bump_pre",
                })
            }
            (None, Some(tag)) => tag,
            (Some(current), Some(requested)) if current != requested => {
                return Err(VersionError::InvalidTag { current, requested })
            }
            (Some(current), _) => current,
        };
        self.replace(Builder::default().pre_tag(tag).pre(pre))
    }

    /// Adds `by` to the post-release number, or starts a post-release at
    /// `by - 1` when there is none.
    ///
    /// An unset `tag` keeps the current tag (or `post` for a new
    /// post-release), [`Field::Absent`] selects the implicit form.
    ///
    /// ```rust
    /// # use parver_version::{Field, PostTag, Version};
    /// let version: Version = "1.4.post0".parse().unwrap();
    /// assert_eq!(version.bump_post(Field::Absent, 1).unwrap().to_string(), "1.4-1");
    /// assert_eq!(version.bump_post(Field::Unset, 1).unwrap().to_string(), "1.4.post1");
    /// assert_eq!(
    ///     version.bump_post(Field::Value(PostTag::Rev), 1).unwrap().to_string(),
    ///     "1.4.rev1"
    /// );
    /// ```
    pub fn bump_post(&self, tag: Field<PostTag>, by: i64) -> Result<Version, VersionError> {
        let post = bumped("post", self.post(), by)?;
        let tag = match tag {
            Field::Unset if self.post.is_some() => self.post_tag().into(),
            tag => tag,
        };
        let mut changes = Builder::default().post(post);
        changes.post_tag = tag;
        self.replace(changes)
    }

    /// Adds `by` to the development release number, or starts a
    /// development release at `by - 1` when there is none.
    pub fn bump_dev(&self, by: i64) -> Result<Version, VersionError> {
        let dev = bumped("dev", self.dev(), by)?;
        self.replace(Builder::default().dev(dev))
    }

    /// Removes trailing zeros from the release, keeping at least
    /// `min_length` numbers and padding with zeros to reach it.
    ///
    /// ```rust
    /// # use parver_version::{Version, VersionError};
    /// let version = Version::new([1, 0, 0]).unwrap();
    /// assert_eq!(version.truncate(1).unwrap().to_string(), "1");
    /// assert_eq!(version.truncate(2).unwrap().to_string(), "1.0");
    /// assert_eq!(Version::new(1).unwrap().truncate(3).unwrap().to_string(), "1.0.0");
    /// assert_eq!(version.truncate(0).unwrap_err(), VersionError::InvalidMinLength);
    /// ```
    pub fn truncate(&self, min_length: usize) -> Result<Version, VersionError> {
        if min_length < 1 {
            return Err(VersionError::InvalidMinLength);
        }
        let mut release = self.release.clone();
        pad(&mut release, min_length, "min_length")?;
        let keep = release
            .iter()
            .rposition(|&n| n != 0)
            .unwrap_or(0)
            .max(min_length - 1);
        release.truncate(keep + 1);
        self.replace(Builder::default().release(release))
    }

    /// The epoch and release only.
    ///
    /// ```rust
    /// # use parver_version::Version;
    /// let version: Version = "v1!2.3rc4.post5.dev6+local".parse().unwrap();
    /// assert_eq!(version.base_version().to_string(), "v1!2.3");
    /// ```
    pub fn base_version(&self) -> Version {
        Version::assemble(
            self.release.clone(),
            self.v,
            self.epoch,
            self.epoch_implicit,
            None,
            None,
            None,
            None,
        )
    }

    /// The canonical PEP 440 form of this version.
    ///
    /// Drops a leading `v` and a zero epoch, replaces tag synonyms, makes
    /// implicit numbers explicit, uses the default separators and the
    /// `post` tag, and joins local parts with `.`.
    ///
    /// ```rust
    /// # use parver_version::Version;
    /// let version: Version = "V0!1.0-Preview_1-2.dev+Ubuntu-007".parse().unwrap();
    /// assert_eq!(version.normalize().to_string(), "1.0rc1.post2.dev0+ubuntu.7");
    /// assert_eq!(version.normalize(), version);
    /// ```
    pub fn normalize(&self) -> Version {
        let pre = self.pre.map(|pre| PreRelease {
            tag: pre.tag.normalize(),
            number: pre.number,
            implicit: false,
            sep1: None,
            sep2: None,
        });
        let post = self.post.map(|post| PostRelease {
            tag: Some(PostTag::Post),
            number: post.number,
            implicit: false,
            sep1: Some(Separator::Dot),
            sep2: None,
        });
        let dev = self.dev.map(|dev| DevRelease {
            number: dev.number,
            implicit: false,
            sep: Some(Separator::Dot),
        });
        let local = self.local_parts().map(|parts| {
            parts
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(".")
        });
        Version::assemble(
            self.release.clone(),
            false,
            self.epoch,
            self.epoch == 0,
            pre,
            post,
            dev,
            local,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn v(input: &str) -> Version {
        input.parse().unwrap()
    }

    #[test_case(None, 1 => Ok(0))]
    #[test_case(None, 3 => Ok(2))]
    #[test_case(None, -1 => Err(VersionError::NegativeBump { field: "x" }))]
    #[test_case(Some(4), 1 => Ok(5))]
    #[test_case(Some(4), -4 => Ok(0))]
    #[test_case(Some(4), -5 => Err(VersionError::Negative { field: "x" }))]
    #[test_case(None, 0 => Err(VersionError::Negative { field: "x" }); "unset by zero")]
    #[test_case(Some(u64::MAX), 1 => Err(VersionError::Overflow { field: "x" }))]
    fn test_bumped(current: Option<u64>, by: i64) -> Result<u64, VersionError> {
        bumped("x", current, by)
    }

    #[test_case([1, 4], 2 => "1.4.1")]
    #[test_case([1, 4, 9], 1 => "1.5.0")]
    #[test_case([1, 4, 9], 0 => "2.0.0")]
    #[test_case([1, 4, 9], 5 => "1.4.9.0.0.1")]
    fn test_bump_release<const N: usize>(release: [u64; N], index: usize) -> String {
        Version::new(release).unwrap().bump_release(index).unwrap().to_string()
    }

    #[test_case([1, 4], 2, 5 => "1.4.5")]
    #[test_case([1, 4, 9], 1, 5 => "1.5.9")]
    #[test_case([1, 4, 9], 0, 0 => "0.4.9")]
    fn test_set_release<const N: usize>(release: [u64; N], index: usize, value: u64) -> String {
        Version::new(release).unwrap().set_release(index, value).unwrap().to_string()
    }

    #[test]
    fn test_bump_release_keeps_other_fields() {
        let version = v("v1!1.4-rc_2.post3.dev4+abc");
        assert_eq!(
            version.bump_release(0).unwrap().to_string(),
            "v1!2.0-rc_2.post3.dev4+abc"
        );
        assert_eq!(
            version.bump_release_to(1, 7).unwrap().to_string(),
            "v1!1.7-rc_2.post3.dev4+abc"
        );
    }

    #[test]
    fn test_bump_release_overflow() {
        let version = Version::new([1, u64::MAX]).unwrap();
        assert_eq!(
            version.bump_release(1).unwrap_err(),
            VersionError::Overflow { field: "release" }
        );
    }

    #[test_case(usize::MAX => VersionError::Overflow { field: "index" }; "index past usize")]
    #[test_case(usize::MAX / 2 => VersionError::Overflow { field: "index" }; "index past memory")]
    fn test_bump_release_huge_index(index: usize) -> VersionError {
        let version = Version::new([1]).unwrap();
        assert!(version.set_release(index, 1).is_err());
        assert!(version.bump_release_to(index, 1).is_err());
        version.bump_release(index).unwrap_err()
    }

    #[test]
    fn test_truncate_huge_min_length() {
        assert_eq!(
            Version::new([1]).unwrap().truncate(usize::MAX).unwrap_err(),
            VersionError::Overflow { field: "min_length" }
        );
    }

    #[test_case("1.4", 1 => "1!1.4")]
    #[test_case("2!1.4", -1 => "1!1.4")]
    #[test_case("1!1.4", -1 => "0!1.4")]
    fn test_bump_epoch(input: &str, by: i64) -> String {
        v(input).bump_epoch(by).unwrap().to_string()
    }

    #[test]
    fn test_bump_epoch_negative() {
        assert_eq!(
            v("1.4").bump_epoch(-1).unwrap_err(),
            VersionError::Negative { field: "epoch" }
        );
    }

    #[test_case("1.4", Some(PreTag::A), 1 => "1.4a0")]
    #[test_case("1.4", Some(PreTag::Rc), 2 => "1.4rc1")]
    #[test_case("1.4b1", None, 1 => "1.4b2")]
    #[test_case("1.4b1", Some(PreTag::B), 1 => "1.4b2")]
    #[test_case("1.4-b_1", None, 1 => "1.4-b_2"; "keeps separators")]
    #[test_case("1.4a", None, 1 => "1.4a1"; "implicit becomes explicit")]
    #[test_case("1.4b5", None, -5 => "1.4b0")]
    fn test_bump_pre(input: &str, tag: Option<PreTag>, by: i64) -> String {
        v(input).bump_pre(tag, by).unwrap().to_string()
    }

    #[test_case("1.4", None, 1 => VersionError::MissingField { field: "pre_tag", required_by: "bump_pre" })]
    #[test_case("1.4", Some(PreTag::A), -1 => VersionError::NegativeBump { field: "pre" })]
    #[test_case("1.4a1", Some(PreTag::Alpha), 1 => VersionError::InvalidTag { current: PreTag::A, requested: PreTag::Alpha })]
    #[test_case("1.4a1", None, -2 => VersionError::Negative { field: "pre" })]
    fn test_bump_pre_errors(input: &str, tag: Option<PreTag>, by: i64) -> VersionError {
        v(input).bump_pre(tag, by).unwrap_err()
    }

    #[test_case("1.4", Field::Unset, 1 => "1.4.post0")]
    #[test_case("1.4", Field::Absent, 2 => "1.4-1")]
    #[test_case("1.4", Field::Value(PostTag::R), 1 => "1.4.r0")]
    #[test_case("1.4.post0", Field::Absent, 1 => "1.4-1")]
    #[test_case("1.4.post0", Field::Unset, 1 => "1.4.post1")]
    #[test_case("1.4-1", Field::Unset, 1 => "1.4-2"; "implicit form stays")]
    #[test_case("1.4-1", Field::Value(PostTag::Post), 1 => "1.4.post2"; "implicit form to tagged")]
    #[test_case("1.4_post-1", Field::Value(PostTag::Rev), 1 => "1.4_rev-2"; "keeps separators")]
    #[test_case("1.4.post", Field::Unset, 1 => "1.4.post1"; "implicit number")]
    fn test_bump_post(input: &str, tag: Field<PostTag>, by: i64) -> String {
        v(input).bump_post(tag, by).unwrap().to_string()
    }

    #[test]
    fn test_bump_post_after_implicit_pre() {
        assert!(matches!(
            v("1.4a").bump_post(Field::Absent, 1),
            Err(VersionError::Conflict(_))
        ));
    }

    #[test_case("1.4", 1 => "1.4.dev0")]
    #[test_case("1.4.dev0", 1 => "1.4.dev1")]
    #[test_case("1.4_dev1", 1 => "1.4_dev2")]
    #[test_case("1.4dev", 3 => "1.4dev3")]
    fn test_bump_dev(input: &str, by: i64) -> String {
        v(input).bump_dev(by).unwrap().to_string()
    }

    #[test_case([1, 2, 3], 1 => "1.2.3")]
    #[test_case([1, 0, 0], 1 => "1")]
    #[test_case([1, 0, 0], 2 => "1.0")]
    #[test_case([1, 0, 0], 5 => "1.0.0.0.0")]
    #[test_case([0, 0], 1 => "0")]
    #[test_case([1, 0, 2, 0], 1 => "1.0.2")]
    fn test_truncate<const N: usize>(release: [u64; N], min_length: usize) -> String {
        Version::new(release).unwrap().truncate(min_length).unwrap().to_string()
    }

    #[test_case("1.0a1", Version::builder().clear_pre() => "1.0")]
    #[test_case("1.0-a_1", Version::builder().clear_pre().pre_tag(PreTag::B) => "1.0"; "clearing pre wins over tag")]
    #[test_case("1.0.post1", Version::builder().clear_post() => "1.0")]
    #[test_case("1.0-post_1", Version::builder().post_tag(None) => "1.0-1"; "implicit form drops separators")]
    #[test_case("1.0-1", Version::builder().post_tag(Some(PostTag::Rev)) => "1.0.rev1"; "implicit form to tagged")]
    #[test_case("1.0_dev1", Version::builder().clear_dev() => "1.0")]
    #[test_case("1.0_dev1", Version::builder().dev(4) => "1.0_dev4")]
    #[test_case("1.0+abc", Version::builder().clear_local() => "1.0")]
    #[test_case("1.0", Version::builder().local("xyz") => "1.0+xyz")]
    #[test_case("1.0a", Version::builder().release([2, 0]) => "2.0a"; "implicit pre preserved")]
    #[test_case("0!1.0", Version::builder().implicit_epoch() => "1.0")]
    #[test_case("v1.0", Version::builder().v(false) => "1.0")]
    #[test_case("1.0", Version::builder().pre_tag(PreTag::C).pre(3).pre_sep1(Some(Separator::Dot)) => "1.0.c3")]
    fn test_replace(input: &str, changes: Builder) -> String {
        v(input).replace(changes).unwrap().to_string()
    }

    #[test]
    fn test_replace_errors() {
        assert_eq!(
            v("1.0").replace(Version::builder().pre(1)).unwrap_err(),
            VersionError::MissingField {
                field: "pre_tag",
                required_by: "pre"
            }
        );
        assert_eq!(
            v("1.0").replace(Version::builder().release(Vec::<u64>::new())).unwrap_err(),
            VersionError::EmptyRelease
        );
    }

    #[test_case("1.0" => "1.0")]
    #[test_case("v1.0" => "1.0")]
    #[test_case("0!1.0" => "1.0")]
    #[test_case("2!1.0" => "2!1.0")]
    #[test_case("1.0.0" => "1.0.0"; "keeps trailing zeros")]
    #[test_case("1.0alpha" => "1.0a0")]
    #[test_case("1.0-beta.2" => "1.0b2")]
    #[test_case("1.0c1" => "1.0rc1")]
    #[test_case("1.0pre" => "1.0rc0")]
    #[test_case("1.0-1" => "1.0.post1")]
    #[test_case("1.0_r" => "1.0.post0")]
    #[test_case("1.0-dev" => "1.0.dev0")]
    #[test_case("1.0+Abc-007_x" => "1.0+abc.7.x")]
    fn test_normalize(input: &str) -> String {
        v(input).normalize().to_string()
    }

    #[test]
    fn test_normalize_is_strict() {
        for input in ["V2!01.02RC_03-4_DEV+A-01", "1.0a", "1.0-1", "1.0.r.dev"] {
            let normalized = v(input).normalize().to_string();
            let strict = Version::parse(&normalized, crate::Grammar::Strict).unwrap();
            assert_eq!(strict, v(input));
            assert_eq!(strict.to_string(), normalized);
        }
    }

    #[test_case("v1!2.3rc4.post5.dev6+local" => "v1!2.3")]
    #[test_case("1.0-1" => "1.0")]
    #[test_case("0!1.0a" => "0!1.0")]
    fn test_base_version(input: &str) -> String {
        v(input).base_version().to_string()
    }

    #[test]
    fn test_public() {
        assert_eq!(v("1.0+abc").public(), "1.0");
        assert_eq!(v("1.0").public(), "1.0");
    }
}
