use parver_parser::PreTag;
use std::{
    cmp::Ordering,
    fmt::{self, Display},
};

/// One part of a local version label.
///
/// Numeric parts sort above alphanumeric parts and compare by value,
/// alphanumeric parts compare lexicographically.
///
/// ```rust
/// # use parver_version::LocalPart;
/// assert!(LocalPart::from("abc") < LocalPart::from("7"));
/// assert!(LocalPart::from("9") < LocalPart::from("10"));
/// assert_eq!(LocalPart::from("007"), LocalPart::from("7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocalPart {
    /// A part with at least one letter, lowercased.
    Alpha(String),
    /// A part of only digits, without leading zeros.
    Numeric(String),
}

impl LocalPart {
    /// Splits a local version label on `.`, `-` and `_`.
    pub fn split(local: &str) -> Vec<LocalPart> {
        local
            .split(|c: char| matches!(c, '.' | '-' | '_'))
            .map(LocalPart::from)
            .collect()
    }
}

impl From<&str> for LocalPart {
    fn from(part: &str) -> Self {
        if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
            let digits = part.trim_start_matches('0');
            LocalPart::Numeric(if digits.is_empty() { "0" } else { digits }.into())
        } else {
            LocalPart::Alpha(part.to_ascii_lowercase())
        }
    }
}

impl Display for LocalPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalPart::Alpha(part) | LocalPart::Numeric(part) => f.pad(part),
        }
    }
}

impl PartialOrd for LocalPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (LocalPart::Alpha(a), LocalPart::Alpha(b)) => a.cmp(b),
            (LocalPart::Alpha(_), LocalPart::Numeric(_)) => Ordering::Less,
            (LocalPart::Numeric(_), LocalPart::Alpha(_)) => Ordering::Greater,
            (LocalPart::Numeric(a), LocalPart::Numeric(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
        }
    }
}

/// `DevOnly` puts `1.0.dev0` before `1.0a0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum PreKey {
    DevOnly,
    Tagged(PreTag, u64),
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum DevKey {
    Dev(u64),
    Final,
}

/// The PEP 440 sort key.
///
/// Field order is comparison order. Variant order of the inner enums and
/// `None` sorting first stand in for negative and positive infinity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct CmpKey {
    epoch: u64,
    release: Vec<u64>,
    pre: PreKey,
    post: Option<u64>,
    dev: DevKey,
    local: Option<Vec<LocalPart>>,
}

impl CmpKey {
    /// `pre` carries the normalized tag.
    pub(crate) fn new(
        epoch: u64,
        release: &[u64],
        pre: Option<(PreTag, u64)>,
        post: Option<u64>,
        dev: Option<u64>,
        local: Option<&str>,
    ) -> Self {
        let significant = release.iter().rposition(|&n| n != 0).map_or(0, |i| i + 1);

        let pre = match (pre, post, dev) {
            (Some((tag, n)), _, _) => PreKey::Tagged(tag, n),
            (None, None, Some(_)) => PreKey::DevOnly,
            (None, _, _) => PreKey::Final,
        };

        CmpKey {
            epoch,
            release: release[..significant].to_vec(),
            pre,
            post,
            dev: dev.map_or(DevKey::Final, DevKey::Dev),
            local: local.map(LocalPart::split),
        }
    }
}
