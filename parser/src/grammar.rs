use crate::{PostTag, PreTag, Separator};
use once_cell::sync::Lazy;

/// Selects which of the two version grammars to parse with.
///
/// The strict grammar accepts only the canonical PEP 440 form:
/// lowercase, no leading `v`, `.` as the only separator, explicit
/// numbers, and no leading zeros.
///
/// The permissive grammar accepts everything PEP 440 allows for the
/// normalization step: any case, a leading `v`, `.`, `-` or `_` as
/// separators, implicit numbers, leading zeros, tag synonyms, and the
/// implicit post-release form `1.0-1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Grammar {
    /// Canonical form only.
    Strict,
    /// Everything PEP 440 can normalize.
    #[default]
    Permissive,
}

impl Grammar {
    /// `Strict` when `strict` is true, `Permissive` otherwise.
    pub const fn from_strict(strict: bool) -> Self {
        if strict {
            Grammar::Strict
        } else {
            Grammar::Permissive
        }
    }

    pub(crate) fn rules(self) -> &'static Rules {
        match self {
            Grammar::Strict => &STRICT,
            Grammar::Permissive => &PERMISSIVE,
        }
    }
}

static STRICT: Lazy<Rules> = Lazy::new(|| Rules::compile(Grammar::Strict));
static PERMISSIVE: Lazy<Rules> = Lazy::new(|| Rules::compile(Grammar::Permissive));

/// How often a separator may appear in front of a rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Occurs {
    Never,
    Optional,
    Always,
}

/// The rule table the parser is driven by.
///
/// Tag tables are ordered choices, a longer spelling has to come before
/// any of its prefixes.
#[derive(Debug)]
pub(crate) struct Rules {
    pub(crate) ignore_case: bool,
    pub(crate) leading_v: bool,
    /// `0|[1-9][0-9]*` instead of `[0-9]+`
    pub(crate) canonical_ints: bool,
    /// `1.0a`, `1.0.post`, `1.0.dev`
    pub(crate) implicit_numbers: bool,
    /// `1.0-1`
    pub(crate) implicit_post: bool,
    pub(crate) separators: &'static [Separator],
    pub(crate) pre_separator: Occurs,
    pub(crate) number_separator: Occurs,
    pub(crate) post_separator: Occurs,
    pub(crate) dev_separator: Occurs,
    pub(crate) pre_tags: &'static [(&'static str, PreTag)],
    pub(crate) post_tags: &'static [(&'static str, PostTag)],
}

impl Rules {
    fn compile(grammar: Grammar) -> Self {
        let rules = match grammar {
            Grammar::Strict => Rules {
                ignore_case: false,
                leading_v: false,
                canonical_ints: true,
                implicit_numbers: false,
                implicit_post: false,
                separators: &[Separator::Dot],
                pre_separator: Occurs::Never,
                number_separator: Occurs::Never,
                post_separator: Occurs::Always,
                dev_separator: Occurs::Always,
                pre_tags: &[("a", PreTag::A), ("b", PreTag::B), ("rc", PreTag::Rc)],
                post_tags: &[("post", PostTag::Post)],
            },
            Grammar::Permissive => Rules {
                ignore_case: true,
                leading_v: true,
                canonical_ints: false,
                implicit_numbers: true,
                implicit_post: true,
                separators: &[Separator::Dot, Separator::Hyphen, Separator::Underscore],
                pre_separator: Occurs::Optional,
                number_separator: Occurs::Optional,
                post_separator: Occurs::Optional,
                dev_separator: Occurs::Optional,
                pre_tags: &[
                    ("alpha", PreTag::Alpha),
                    ("a", PreTag::A),
                    ("beta", PreTag::Beta),
                    ("b", PreTag::B),
                    ("c", PreTag::C),
                    ("rc", PreTag::Rc),
                    ("preview", PreTag::Preview),
                    ("pre", PreTag::Pre),
                ],
                post_tags: &[("post", PostTag::Post), ("rev", PostTag::Rev), ("r", PostTag::R)],
            },
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(?grammar, "compiled version grammar");
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_are_compiled_once() {
        assert!(std::ptr::eq(Grammar::Strict.rules(), Grammar::Strict.rules()));
        assert!(std::ptr::eq(
            Grammar::Permissive.rules(),
            Grammar::Permissive.rules()
        ));
        assert!(!std::ptr::eq(
            Grammar::Strict.rules(),
            Grammar::Permissive.rules()
        ));
    }

    #[test]
    fn concurrent_first_use() {
        let handles = (0..8)
            .map(|i| {
                std::thread::spawn(move || Grammar::from_strict(i % 2 == 0).rules())
            })
            .collect::<Vec<_>>();
        for (i, handle) in handles.into_iter().enumerate() {
            let rules = handle.join().unwrap();
            let grammar = Grammar::from_strict(i % 2 == 0);
            assert!(std::ptr::eq(rules, grammar.rules()));
        }
    }

    #[test]
    fn longer_tags_come_first() {
        for grammar in [Grammar::Strict, Grammar::Permissive] {
            let tags = grammar.rules().pre_tags;
            for (i, (tag, _)) in tags.iter().enumerate() {
                for (later, _) in &tags[i + 1..] {
                    assert!(
                        !later.starts_with(tag) || later == tag,
                        "{} shadows {}",
                        tag,
                        later
                    );
                }
            }
        }
    }
}
