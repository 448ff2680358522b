//! Grammar rule combinators.
//!
//! A [`GrammarRule`] is a tree of matchers over the token stream produced by
//! [`crate::syntax::lexer`]. Rules are plain data; the backtracking
//! interpreter that runs them lives in [`crate::syntax::engine`].

use std::fmt;

use crate::syntax::lexer::{Token, TokenKind};

// ============================================================================
// TOKEN CLASSES
// ============================================================================

/// A predicate over a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Slash,
    Dash,
    /// ASCII letter, any case.
    Letter,
    UpperLetter,
    LowerLetter,
    /// Lowercase ASCII letter or `-`.
    LowerLetterOrDash,
    LetterOrDigit,
    PercentEncoded,
}

impl TokenClass {
    pub fn accepts(self, token: &Token) -> bool {
        match (self, token.kind) {
            (Self::Slash, TokenKind::Slash) => true,
            (Self::Dash, TokenKind::Dash) => true,
            (Self::Letter, TokenKind::LetterOrDigit(c)) => c.is_ascii_alphabetic(),
            (Self::UpperLetter, TokenKind::LetterOrDigit(c)) => c.is_ascii_uppercase(),
            (Self::LowerLetter, TokenKind::LetterOrDigit(c)) => c.is_ascii_lowercase(),
            (Self::LowerLetterOrDash, TokenKind::LetterOrDigit(c)) => c.is_ascii_lowercase(),
            (Self::LowerLetterOrDash, TokenKind::Dash) => true,
            (Self::LetterOrDigit, TokenKind::LetterOrDigit(_)) => true,
            (Self::PercentEncoded, TokenKind::PercentEncoded) => true,
            _ => false,
        }
    }
}

// ============================================================================
// FIELDS AND CAPTURES
// ============================================================================

/// A field a capturing rule contributes to the raw field map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Country,
    Lang,
    /// `contentType` in the strict layout, `serviceType` in the lenient one.
    ContentType,
    Title,
    Id,
    Data,
}

impl Field {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Lang => "lang",
            Self::ContentType => "contentType",
            Self::Title => "title",
            Self::Id => "id",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the matched text of a capture becomes a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// The matched text, unchanged.
    Verbatim,
    /// Dash-terminated title groups: drop the final dash, then percent-decode
    /// the whole run. Fails the rule when the bytes are not valid UTF-8.
    DecodeTitle,
}

impl Transform {
    pub fn apply(self, text: &str) -> Option<String> {
        match self {
            Self::Verbatim => Some(text.to_string()),
            Self::DecodeTitle => {
                let joined = text.strip_suffix('-').unwrap_or(text);
                if joined.is_empty() {
                    return None;
                }
                urlencoding::decode(joined).ok().map(|s| s.into_owned())
            }
        }
    }
}

/// What happens when a capture's field is already present in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Merge {
    /// The earlier value wins.
    #[default]
    KeepFirst,
    /// This capture overwrites the earlier value.
    Replace,
}

// ============================================================================
// RULES
// ============================================================================

/// A composable matcher over pathname tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarRule {
    /// Exactly one token of the given class.
    Token(TokenClass),
    /// Every sub-rule, in order.
    Sequence(Vec<GrammarRule>),
    /// The first alternative that lets the rest of the grammar match.
    Choice(Vec<GrammarRule>),
    /// Greedy repetition. Consumes as many repetitions as possible, then gives
    /// them back one at a time while the continuation fails.
    Repeat {
        rule: Box<GrammarRule>,
        min: usize,
        max: Option<usize>,
    },
    /// Records the text matched by `rule` under `field`.
    Capture {
        field: Field,
        rule: Box<GrammarRule>,
        transform: Transform,
        merge: Merge,
    },
}

impl GrammarRule {
    pub fn token(class: TokenClass) -> Self {
        Self::Token(class)
    }

    pub fn seq(rules: impl IntoIterator<Item = GrammarRule>) -> Self {
        Self::Sequence(rules.into_iter().collect())
    }

    pub fn choice(rules: impl IntoIterator<Item = GrammarRule>) -> Self {
        Self::Choice(rules.into_iter().collect())
    }

    pub fn repeat(self, min: usize, max: Option<usize>) -> Self {
        Self::Repeat {
            rule: Box::new(self),
            min,
            max,
        }
    }

    /// `rule?`
    pub fn optional(self) -> Self {
        self.repeat(0, Some(1))
    }

    /// `rule+`
    pub fn one_or_more(self) -> Self {
        self.repeat(1, None)
    }

    /// `rule{n}`
    pub fn exactly(self, n: usize) -> Self {
        self.repeat(n, Some(n))
    }

    pub fn capture(self, field: Field) -> Self {
        Self::Capture {
            field,
            rule: Box::new(self),
            transform: Transform::Verbatim,
            merge: Merge::KeepFirst,
        }
    }

    pub fn capture_with(self, field: Field, transform: Transform, merge: Merge) -> Self {
        Self::Capture {
            field,
            rule: Box::new(self),
            transform,
            merge,
        }
    }

    /// True for a token class or a choice of token classes: rules that always
    /// consume exactly one token and capture nothing.
    pub(crate) fn is_single_token(&self) -> bool {
        match self {
            Self::Token(_) => true,
            Self::Choice(alternatives) => {
                !alternatives.is_empty() && alternatives.iter().all(Self::is_single_token)
            }
            _ => false,
        }
    }

    /// Only meaningful when [`is_single_token`](Self::is_single_token) holds.
    pub(crate) fn accepts_token(&self, token: &Token) -> bool {
        match self {
            Self::Token(class) => class.accepts(token),
            Self::Choice(alternatives) => alternatives.iter().any(|rule| rule.accepts_token(token)),
            _ => false,
        }
    }
}
