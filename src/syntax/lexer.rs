//! Pathname lexer.
//!
//! Splits a pathname into [`Token`]s using the pest grammar in
//! `syntax/grammar.pest`. The lexer never rejects input: characters outside the
//! permalink alphabet become [`TokenKind::Stray`] so the matcher can point at them.

use pest::Parser;
use pest_derive::Parser;

use crate::syntax::Span;

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct PathLexer;

/// Lexical class of a single pathname token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `-`
    Dash,
    /// `/`
    Slash,
    /// One ASCII letter or digit.
    LetterOrDigit(char),
    /// A `%XX` triplet with uppercase hex digits.
    PercentEncoded,
    /// Anything else; no grammar rule accepts it.
    Stray,
}

/// A token together with its byte span in the pathname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Lex a pathname into tokens.
///
/// The returned vector covers the input without gaps: the end of each token is
/// the start of the next, and the last token ends at `pathname.len()`.
pub fn tokenize(pathname: &str) -> Result<Vec<Token>, Box<pest::error::Error<Rule>>> {
    let mut pairs = PathLexer::parse(Rule::pathname, pathname).map_err(Box::new)?;

    let Some(root) = pairs.next() else {
        return Ok(Vec::new());
    };

    let tokens = root
        .into_inner()
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .map(|pair| {
            let span = Span {
                start: pair.as_span().start(),
                end: pair.as_span().end(),
            };
            let kind = match pair.as_rule() {
                Rule::dash => TokenKind::Dash,
                Rule::slash => TokenKind::Slash,
                Rule::pct_encoded => TokenKind::PercentEncoded,
                Rule::letter_or_digit => pair
                    .as_str()
                    .chars()
                    .next()
                    .map_or(TokenKind::Stray, TokenKind::LetterOrDigit),
                _ => TokenKind::Stray,
            };
            Token { kind, span }
        })
        .collect();

    Ok(tokens)
}
