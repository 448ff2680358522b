//! Backtracking interpreter for [`GrammarRule`] trees.
//!
//! Matching is written in continuation-passing style: every rule receives the
//! rest of the grammar as a continuation and only reports success when the
//! continuation does. That gives ordered alternation and greedy repetition with
//! one-unit back-off without an explicit backtracking stack. Captures are kept
//! on a single vector that is truncated whenever a branch is abandoned.

use std::cell::Cell;
use std::collections::HashMap;

use crate::syntax::lexer::Token;
use crate::syntax::rules::{Field, GrammarRule, Merge};

/// Pathnames lexing to more tokens than this never match.
pub const MAX_PATHNAME_TOKENS: usize = 2048;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Fields captured by a successful match. Rules that did not take part in the
/// match contribute no key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFieldMap {
    fields: HashMap<Field, String>,
}

impl RawFieldMap {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn take(&mut self, field: Field) -> Option<String> {
        self.fields.remove(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    fn from_captures(captures: &[Capture]) -> Self {
        let mut fields = HashMap::new();
        for capture in captures {
            match capture.merge {
                Merge::KeepFirst => {
                    fields
                        .entry(capture.field)
                        .or_insert_with(|| capture.value.clone());
                }
                Merge::Replace => {
                    fields.insert(capture.field, capture.value.clone());
                }
            }
        }
        Self { fields }
    }
}

/// The pathname does not match the grammar.
///
/// `offset..offset + len` is the token at which the furthest attempt stopped,
/// or an empty span at the end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMatch {
    pub offset: usize,
    pub len: usize,
}

// ============================================================================
// MATCHER
// ============================================================================

#[derive(Debug)]
struct Capture {
    field: Field,
    value: String,
    merge: Merge,
}

type Continuation<'k> = dyn FnMut(usize, &mut Vec<Capture>) -> bool + 'k;

struct Matcher<'a> {
    source: &'a str,
    tokens: &'a [Token],
    furthest: Cell<usize>,
}

/// Match `tokens` (lexed from `source`) against `rule`, requiring the whole
/// input to be consumed.
pub fn match_tokens(
    rule: &GrammarRule,
    source: &str,
    tokens: &[Token],
) -> Result<RawFieldMap, NoMatch> {
    if tokens.len() > MAX_PATHNAME_TOKENS {
        return Err(NoMatch {
            offset: 0,
            len: source.len(),
        });
    }

    let matcher = Matcher {
        source,
        tokens,
        furthest: Cell::new(0),
    };

    let mut result = None;
    let mut captures = Vec::new();
    let matched = matcher.run(rule, 0, &mut captures, &mut |end, captures: &mut Vec<Capture>| {
        if end != tokens.len() {
            return false;
        }
        result = Some(RawFieldMap::from_captures(captures));
        true
    });

    match result {
        Some(fields) if matched => Ok(fields),
        _ => Err(matcher.no_match()),
    }
}

impl Matcher<'_> {
    fn run(
        &self,
        rule: &GrammarRule,
        pos: usize,
        captures: &mut Vec<Capture>,
        k: &mut Continuation<'_>,
    ) -> bool {
        match rule {
            GrammarRule::Token(class) => match self.tokens.get(pos) {
                Some(token) if class.accepts(token) => {
                    self.reached(pos + 1);
                    k(pos + 1, captures)
                }
                _ => false,
            },

            GrammarRule::Sequence(rules) => self.run_sequence(rules, pos, captures, k),

            GrammarRule::Choice(alternatives) => {
                for alternative in alternatives {
                    let mark = captures.len();
                    if self.run(alternative, pos, captures, &mut *k) {
                        return true;
                    }
                    captures.truncate(mark);
                }
                false
            }

            GrammarRule::Repeat { rule, min, max } if rule.is_single_token() => {
                self.run_token_repeat(rule, *min, *max, pos, captures, k)
            }

            GrammarRule::Repeat { rule, min, max } => {
                self.run_repeat(rule, *min, *max, 0, pos, captures, k)
            }

            GrammarRule::Capture {
                field,
                rule,
                transform,
                merge,
            } => self.run(rule, pos, captures, &mut |end, captures: &mut Vec<Capture>| {
                let Some(value) = transform.apply(self.text(pos, end)) else {
                    return false;
                };
                let mark = captures.len();
                captures.push(Capture {
                    field: *field,
                    value,
                    merge: *merge,
                });
                if k(end, captures) {
                    return true;
                }
                captures.truncate(mark);
                false
            }),
        }
    }

    fn run_sequence(
        &self,
        rules: &[GrammarRule],
        pos: usize,
        captures: &mut Vec<Capture>,
        k: &mut Continuation<'_>,
    ) -> bool {
        match rules.split_first() {
            None => k(pos, captures),
            Some((first, rest)) => {
                self.run(first, pos, captures, &mut |next, captures: &mut Vec<Capture>| {
                    self.run_sequence(rest, next, captures, &mut *k)
                })
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn run_repeat(
        &self,
        rule: &GrammarRule,
        min: usize,
        max: Option<usize>,
        count: usize,
        pos: usize,
        captures: &mut Vec<Capture>,
        k: &mut Continuation<'_>,
    ) -> bool {
        if max.map_or(true, |max| count < max) {
            let mark = captures.len();
            // an iteration that consumes nothing would loop forever
            let matched_more =
                self.run(rule, pos, captures, &mut |next, captures: &mut Vec<Capture>| {
                    next > pos
                        && self.run_repeat(rule, min, max, count + 1, next, captures, &mut *k)
                });
            if matched_more {
                return true;
            }
            captures.truncate(mark);
        }
        count >= min && k(pos, captures)
    }

    // Same greedy back-off as run_repeat, but the run is scanned in a loop so
    // stack depth does not grow with the number of tokens.
    fn run_token_repeat(
        &self,
        rule: &GrammarRule,
        min: usize,
        max: Option<usize>,
        pos: usize,
        captures: &mut Vec<Capture>,
        k: &mut Continuation<'_>,
    ) -> bool {
        let limit = max.map_or(self.tokens.len(), |max| {
            pos.saturating_add(max).min(self.tokens.len())
        });
        let mut end = pos;
        while end < limit && rule.accepts_token(&self.tokens[end]) {
            end += 1;
        }
        self.reached(end);

        let mark = captures.len();
        for stop in (pos + min..=end).rev() {
            if k(stop, captures) {
                return true;
            }
            captures.truncate(mark);
        }
        false
    }

    fn text(&self, start: usize, end: usize) -> &str {
        if start >= end {
            return "";
        }
        let from = self.tokens[start].span.start;
        let to = self.tokens[end - 1].span.end;
        self.source.get(from..to).unwrap_or_default()
    }

    fn reached(&self, pos: usize) {
        if pos > self.furthest.get() {
            self.furthest.set(pos);
        }
    }

    fn no_match(&self) -> NoMatch {
        match self.tokens.get(self.furthest.get()) {
            Some(token) => NoMatch {
                offset: token.span.start,
                len: token.span.end - token.span.start,
            },
            None => NoMatch {
                offset: self.source.len(),
                len: 0,
            },
        }
    }
}
