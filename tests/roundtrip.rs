//! Property-based tests over generated version strings.
//!
//! The strategies compose strings the permissive grammar accepts,
//! mixing case, separators, tag synonyms and implicit numbers.

use parver::{Grammar, Version};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

// ============================================================================
// Strategies for generating version strings
// ============================================================================

fn separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(""), Just("."), Just("-"), Just("_")]
}

fn number() -> impl Strategy<Value = u64> {
    0u64..1000
}

/// A number that may be left out, together with the separator before it.
fn tag_number() -> impl Strategy<Value = String> {
    prop::option::of((separator(), number())).prop_map(|number| match number {
        Some((sep, n)) => format!("{}{}", sep, n),
        None => String::new(),
    })
}

fn pre_tag() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "a", "A", "alpha", "Alpha", "b", "beta", "BETA", "c", "rc", "RC", "pre", "preview",
    ])
}

fn post_tag() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["post", "POST", "rev", "r", "R"])
}

fn release() -> impl Strategy<Value = String> {
    vec(number(), 1..5).prop_map(|release| {
        release
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".")
    })
}

fn pre() -> impl Strategy<Value = String> {
    (separator(), pre_tag(), tag_number())
        .prop_map(|(sep, tag, number)| format!("{}{}{}", sep, tag, number))
}

fn post() -> impl Strategy<Value = String> {
    prop_oneof![
        number().prop_map(|n| format!("-{}", n)),
        (separator(), post_tag(), tag_number())
            .prop_map(|(sep, tag, number)| format!("{}{}{}", sep, tag, number)),
    ]
}

fn dev() -> impl Strategy<Value = String> {
    (separator(), prop::sample::select(vec!["dev", "DEV"]), prop::option::of(number()))
        .prop_map(|(sep, tag, number)| match number {
            Some(n) => format!("{}{}{}", sep, tag, n),
            None => format!("{}{}", sep, tag),
        })
}

fn local() -> impl Strategy<Value = String> {
    (
        "[a-zA-Z0-9]{1,6}",
        vec((separator().prop_filter("non-empty", |s| !s.is_empty()), "[a-zA-Z0-9]{1,6}"), 0..3),
    )
        .prop_map(|(first, rest)| {
            let mut local = first;
            for (sep, part) in rest {
                local.push_str(sep);
                local.push_str(&part);
            }
            local
        })
}

/// Strategy for generating versions the permissive grammar accepts
fn permissive_version() -> impl Strategy<Value = String> {
    (
        prop::option::of(prop_oneof![Just("v"), Just("V")]),
        prop::option::of(number()),
        release(),
        prop::option::of(pre()),
        prop::option::of(post()),
        prop::option::of(dev()),
        prop::option::of(local()),
    )
        .prop_map(|(v, epoch, release, pre, post, dev, local)| {
            let mut version = String::from(v.unwrap_or_default());
            if let Some(epoch) = epoch {
                version.push_str(&format!("{}!", epoch));
            }
            version.push_str(&release);
            version.push_str(&pre.unwrap_or_default());
            version.push_str(&post.unwrap_or_default());
            version.push_str(&dev.unwrap_or_default());
            if let Some(local) = local {
                version.push('+');
                version.push_str(&local);
            }
            version
        })
}

fn hash(version: &Version) -> u64 {
    let mut hasher = DefaultHasher::new();
    version.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn parse_render_parse_is_equal(input in permissive_version()) {
        let version = parver::parse(&input, false).unwrap();
        let rendered = version.to_string();
        let reparsed = parver::parse(&rendered, false).unwrap();
        prop_assert_eq!(&reparsed, &version);
        prop_assert_eq!(reparsed.to_string(), rendered);
    }

    #[test]
    fn normalize_is_equal_and_strict(input in permissive_version()) {
        let version = parver::parse(&input, false).unwrap();
        let normalized = version.normalize();
        prop_assert_eq!(&normalized, &version);
        prop_assert_eq!(hash(&normalized), hash(&version));

        let rendered = normalized.to_string();
        let strict = Version::parse(&rendered, Grammar::Strict).unwrap();
        prop_assert_eq!(strict.to_string(), rendered);
        prop_assert_eq!(strict.normalize().to_string(), normalized.to_string());
    }

    #[test]
    fn bump_release_increases(input in permissive_version(), index in 0usize..6) {
        let version = parver::parse(&input, false).unwrap();
        let bumped = version.bump_release(index).unwrap();
        prop_assert!(bumped > version);
    }

    #[test]
    fn ordering_is_consistent(a in permissive_version(), b in permissive_version()) {
        let a = parver::parse(&a, false).unwrap();
        let b = parver::parse(&b, false).unwrap();
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a == b, hash(&a) == hash(&b) && a.cmp(&b).is_eq());
    }

    #[test]
    fn base_version_drops_suffixes(input in permissive_version()) {
        let version = parver::parse(&input, false).unwrap();
        let base = version.base_version();
        prop_assert_eq!(base.release(), version.release());
        prop_assert_eq!(base.epoch(), version.epoch());
        prop_assert!(base.pre().is_none() && base.post().is_none() && base.dev().is_none());
        prop_assert!(base.local().is_none());
    }
}
