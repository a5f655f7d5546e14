use crate::{
    grammar::{Occurs, Rules},
    ErrorKind, Number, PostTag, PreTag, Segment, Separator, Span,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorSpan {
    pub(crate) kind: ErrorKind,
    pub(crate) span: Span,
}

impl ErrorSpan {
    fn new(kind: ErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// What a failed rule was looking for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Expected {
    Release,
    Number,
    Local,
    Other,
}

/// The furthest position any rule failed at, and what was expected there.
#[derive(Debug, Default)]
struct Furthest {
    pos: usize,
    release: bool,
    number: bool,
    local: bool,
    other: bool,
}

impl Furthest {
    fn at(pos: usize) -> Self {
        Self {
            pos,
            ..Self::default()
        }
    }

    fn record(&mut self, pos: usize, expected: Expected) {
        if pos > self.pos {
            *self = Self::at(pos);
        }
        if pos == self.pos {
            match expected {
                Expected::Release => self.release = true,
                Expected::Number => self.number = true,
                Expected::Local => self.local = true,
                Expected::Other => self.other = true,
            }
        }
    }

    fn kind(&self) -> ErrorKind {
        if self.release {
            ErrorKind::MissingRelease
        } else if self.local {
            ErrorKind::MissingLocal
        } else if self.number && !self.other {
            ErrorKind::MissingNumber
        } else {
            ErrorKind::UnexpectedInput
        }
    }
}

/// Recursive descent over the PEG rules of a [`Rules`] table.
///
/// Ordered choice commits to the first alternative that matches,
/// optional rules rewind on failure, and the error reported for a
/// rejected input is the one at the furthest position reached.
pub(crate) struct Parser<'input> {
    input: &'input str,
    pos: usize,
    end: usize,
    rules: &'static Rules,
    furthest: Furthest,
}

impl<'input> Parser<'input> {
    pub(crate) fn new(input: &'input str, rules: &'static Rules) -> Self {
        let start = input.len() - input.trim_start().len();
        let end = input.trim_end().len().max(start);
        Self {
            input,
            pos: start,
            end,
            rules,
            furthest: Furthest::at(start),
        }
    }

    pub(crate) fn parse(mut self) -> Result<Vec<Segment>, ErrorSpan> {
        let mut segments = Vec::with_capacity(4);

        if self.rules.leading_v && self.literal("v") {
            segments.push(Segment::V);
        }
        if let Some(epoch) = self.epoch()? {
            segments.push(Segment::Epoch(epoch));
        }
        match self.release()? {
            Some(release) => segments.push(Segment::Release(release)),
            None => return Err(self.error()),
        }
        if let Some(pre) = self.pre()? {
            segments.push(pre);
        }
        if let Some(post) = self.post()? {
            segments.push(post);
        }
        if let Some(dev) = self.dev()? {
            segments.push(dev);
        }
        if let Some(local) = self.local() {
            segments.push(Segment::Local(local));
        }

        if self.pos < self.end {
            self.furthest.record(self.pos, Expected::Other);
            return Err(self.error());
        }

        Ok(segments)
    }

    fn error(&self) -> ErrorSpan {
        ErrorSpan::new(self.furthest.kind(), self.token_at(self.furthest.pos))
    }

    /// The alphanumeric run starting at `pos`, or the single character there.
    fn token_at(&self, pos: usize) -> Span {
        let rest = &self.input[pos..self.end];
        let len = match rest.find(|c: char| !c.is_ascii_alphanumeric()) {
            Some(0) => rest.chars().next().map_or(0, char::len_utf8),
            Some(len) => len,
            None => rest.len(),
        };
        Span::new(pos, pos + len)
    }

    fn bytes(&self) -> &'input [u8] {
        let input = self.input;
        &input.as_bytes()[..self.end]
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn literal(&mut self, literal: &str) -> bool {
        let matched = self
            .bytes()
            .get(self.pos..self.pos + literal.len())
            .map_or(false, |head| {
                if self.rules.ignore_case {
                    head.eq_ignore_ascii_case(literal.as_bytes())
                } else {
                    head == literal.as_bytes()
                }
            });
        if matched {
            self.pos += literal.len();
        } else {
            self.furthest.record(self.pos, Expected::Other);
        }
        matched
    }

    fn separator(&mut self) -> Option<Separator> {
        let separators = self.rules.separators;
        match self
            .peek()
            .and_then(Separator::from_byte)
            .filter(|sep| separators.contains(sep))
        {
            Some(sep) => {
                self.pos += 1;
                Some(sep)
            }
            None => {
                self.furthest.record(self.pos, Expected::Other);
                None
            }
        }
    }

    /// `sep`, `sep?` or nothing. `None` when a required separator is missing.
    fn leading_separator(&mut self, occurs: Occurs) -> Option<Option<Separator>> {
        match occurs {
            Occurs::Never => Some(None),
            Occurs::Optional => Some(self.separator()),
            Occurs::Always => self.separator().map(Some),
        }
    }

    fn digits(&mut self, expected: Expected) -> Option<Span> {
        let bytes = self.bytes();
        let start = self.pos;
        let end = if self.rules.canonical_ints && bytes.get(start) == Some(&b'0') {
            start + 1
        } else {
            start + bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
        };
        if end == start {
            self.furthest.record(start, expected);
            None
        } else {
            self.pos = end;
            Some(Span::new(start, end))
        }
    }

    fn int(&mut self, expected: Expected) -> Result<Option<u64>, ErrorSpan> {
        match self.digits(expected) {
            Some(span) => span
                .at(self.input)
                .parse::<u64>()
                .map(Some)
                .map_err(|_| ErrorSpan::new(ErrorKind::NumberTooLarge, span)),
            None => Ok(None),
        }
    }

    fn tag<T: Copy>(&mut self, tags: &[(&'static str, T)]) -> Option<T> {
        tags.iter()
            .find(|(text, _)| self.literal(text))
            .map(|&(_, tag)| tag)
    }

    /// `int "!"`
    fn epoch(&mut self) -> Result<Option<u64>, ErrorSpan> {
        let start = self.pos;
        if let Some(epoch) = self.int(Expected::Release)? {
            if self.literal("!") {
                return Ok(Some(epoch));
            }
        }
        self.pos = start;
        Ok(None)
    }

    /// `int ("." int)*`
    fn release(&mut self) -> Result<Option<Vec<u64>>, ErrorSpan> {
        let mut release = match self.int(Expected::Release)? {
            Some(first) => vec![first],
            None => return Ok(None),
        };
        loop {
            let start = self.pos;
            if !self.literal(".") {
                break;
            }
            match self.int(Expected::Number)? {
                Some(n) => release.push(n),
                None => {
                    self.pos = start;
                    break;
                }
            }
        }
        Ok(Some(release))
    }

    /// `sep? int`, the number after a pre- or post-release tag.
    fn tag_number(&mut self) -> Result<Option<(Option<Separator>, u64)>, ErrorSpan> {
        let start = self.pos;
        let sep = match self.leading_separator(self.rules.number_separator) {
            Some(sep) => sep,
            None => return Ok(None),
        };
        match self.int(Expected::Number)? {
            Some(n) => Ok(Some((sep, n))),
            None => {
                self.pos = start;
                Ok(None)
            }
        }
    }

    /// `sep? pre_tag (sep? int)?`
    fn pre(&mut self) -> Result<Option<Segment>, ErrorSpan> {
        let start = self.pos;
        let sep1 = match self.leading_separator(self.rules.pre_separator) {
            Some(sep) => sep,
            None => return Ok(None),
        };
        let tag: PreTag = match self.tag(self.rules.pre_tags) {
            Some(tag) => tag,
            None => {
                self.pos = start;
                return Ok(None);
            }
        };
        let (sep2, value) = match self.tag_number()? {
            Some((sep2, n)) => (sep2, Number::Explicit(n)),
            None if self.rules.implicit_numbers => (None, Number::Implicit),
            None => {
                self.pos = start;
                return Ok(None);
            }
        };
        Ok(Some(Segment::Pre {
            tag,
            value,
            sep1,
            sep2,
        }))
    }

    /// `sep? post_tag (sep? int)? / "-" int`
    fn post(&mut self) -> Result<Option<Segment>, ErrorSpan> {
        let start = self.pos;
        if let Some(sep1) = self.leading_separator(self.rules.post_separator) {
            let tag: Option<PostTag> = self.tag(self.rules.post_tags);
            if let Some(tag) = tag {
                let (sep2, value) = match self.tag_number()? {
                    Some((sep2, n)) => (sep2, Some(Number::Explicit(n))),
                    None if self.rules.implicit_numbers => (None, Some(Number::Implicit)),
                    None => (None, None),
                };
                if let Some(value) = value {
                    return Ok(Some(Segment::Post {
                        tag: Some(tag),
                        value,
                        sep1,
                        sep2,
                    }));
                }
            }
        }
        self.pos = start;

        if self.rules.implicit_post && self.literal("-") {
            if let Some(n) = self.int(Expected::Number)? {
                return Ok(Some(Segment::Post {
                    tag: None,
                    value: Number::Explicit(n),
                    sep1: None,
                    sep2: None,
                }));
            }
        }
        self.pos = start;
        Ok(None)
    }

    /// `sep? "dev" int?`
    fn dev(&mut self) -> Result<Option<Segment>, ErrorSpan> {
        let start = self.pos;
        if let Some(sep) = self.leading_separator(self.rules.dev_separator) {
            if self.literal("dev") {
                let value = match self.int(Expected::Number)? {
                    Some(n) => Some(Number::Explicit(n)),
                    None if self.rules.implicit_numbers => Some(Number::Implicit),
                    None => None,
                };
                if let Some(value) = value {
                    return Ok(Some(Segment::Dev { value, sep }));
                }
            }
        }
        self.pos = start;
        Ok(None)
    }

    /// `"+" local_part (sep local_part)*`
    fn local(&mut self) -> Option<String> {
        let start = self.pos;
        if !self.literal("+") {
            return None;
        }
        let mut local = String::new();
        if !self.local_part(&mut local) {
            self.pos = start;
            return None;
        }
        loop {
            let before = (self.pos, local.len());
            let sep = match self.separator() {
                Some(sep) => sep,
                None => break,
            };
            local.push(sep.as_char());
            if !self.local_part(&mut local) {
                self.pos = before.0;
                local.truncate(before.1);
                break;
            }
        }
        Some(local)
    }

    /// `[0-9]*[a-z][a-z0-9]* / int`
    fn local_part(&mut self, local: &mut String) -> bool {
        let bytes = self.bytes();
        let start = self.pos;
        let is_letter = |b: &u8| {
            if self.rules.ignore_case {
                b.is_ascii_alphabetic()
            } else {
                b.is_ascii_lowercase()
            }
        };

        let digits = bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count();
        if bytes.get(start + digits).map_or(false, is_letter) {
            let len = digits
                + bytes[start + digits..]
                    .iter()
                    .take_while(|b| is_letter(*b) || b.is_ascii_digit())
                    .count();
            local.push_str(&self.input[start..start + len]);
            self.pos = start + len;
            return true;
        }

        match self.digits(Expected::Local) {
            Some(span) => {
                let digits = span.at(self.input).trim_start_matches('0');
                local.push_str(if digits.is_empty() { "0" } else { digits });
                true
            }
            None => false,
        }
    }
}
