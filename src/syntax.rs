//! Pathname grammar engine.
//!
//! Pathnames are lexed into tokens ([`lexer`]), matched against a fixed,
//! layout-specific grammar ([`layout`]) built from composable rules ([`rules`])
//! by a backtracking interpreter ([`engine`]). The result is a flat
//! [`RawFieldMap`] or an explicit [`NoMatch`].

pub mod engine;
pub mod layout;
pub mod lexer;
pub mod rules;

pub use engine::{NoMatch, RawFieldMap, MAX_PATHNAME_TOKENS};
pub use layout::{Layout, PathnameGrammar};
pub use rules::{Field, GrammarRule, Merge, TokenClass, Transform};

/// Represents a byte span in a pathname.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}
