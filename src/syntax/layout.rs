//! The two permalink pathname layouts.
//!
//! ```text
//! strict:  /[CC/][ll/]content-type/[title-]id[/[data[/]]]
//! lenient: /[cc/][ll/]servicetype/[title-]id[/[data[/]]]
//! ```
//!
//! Strict takes an uppercase country, lets content types contain dashes and
//! accepts ids of 8 or more characters. Lenient takes a country in any case,
//! a letters-only service type and ids of 8 to 13 characters.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::syntax::engine::{self, NoMatch, RawFieldMap};
use crate::syntax::lexer::tokenize;
use crate::syntax::rules::{Field, GrammarRule, Merge, TokenClass, Transform};

const ID_MIN_LEN: usize = 8;
const LENIENT_ID_MAX_LEN: usize = 13;

static STRICT: Lazy<PathnameGrammar> = Lazy::new(|| PathnameGrammar::build(Layout::Strict));
static LENIENT: Lazy<PathnameGrammar> = Lazy::new(|| PathnameGrammar::build(Layout::Lenient));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Strict,
    #[default]
    Lenient,
}

/// A compiled pathname grammar for one [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathnameGrammar {
    layout: Layout,
    root: GrammarRule,
}

impl PathnameGrammar {
    /// The shared grammar for `layout`, built on first use.
    pub fn for_layout(layout: Layout) -> &'static PathnameGrammar {
        match layout {
            Layout::Strict => &STRICT,
            Layout::Lenient => &LENIENT,
        }
    }

    pub fn build(layout: Layout) -> Self {
        Self {
            layout,
            root: pathname_rule(layout),
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Match a whole pathname, e.g. `/kr/app/title-id12345678/`.
    pub fn match_pathname(&self, pathname: &str) -> Result<RawFieldMap, NoMatch> {
        let tokens = tokenize(pathname).map_err(|_| NoMatch {
            offset: 0,
            len: pathname.len(),
        })?;

        let result = engine::match_tokens(&self.root, pathname, &tokens);
        if let Err(no_match) = &result {
            tracing::trace!(
                layout = ?self.layout,
                pathname,
                offset = no_match.offset,
                "pathname does not match grammar"
            );
        }
        result
    }
}

// ============================================================================
// RULE DEFINITIONS
// ============================================================================

fn token(class: TokenClass) -> GrammarRule {
    GrammarRule::token(class)
}

fn slash() -> GrammarRule {
    token(TokenClass::Slash)
}

/// `rule /`
fn segment(rule: GrammarRule) -> GrammarRule {
    GrammarRule::seq([rule, slash()])
}

fn country(layout: Layout) -> GrammarRule {
    let class = match layout {
        Layout::Strict => TokenClass::UpperLetter,
        Layout::Lenient => TokenClass::Letter,
    };
    token(class).exactly(2).capture(Field::Country)
}

fn lang() -> GrammarRule {
    token(TokenClass::LowerLetter)
        .exactly(2)
        .capture(Field::Lang)
}

fn content_type(layout: Layout) -> GrammarRule {
    let class = match layout {
        Layout::Strict => TokenClass::LowerLetterOrDash,
        Layout::Lenient => TokenClass::LowerLetter,
    };
    token(class).repeat(2, None).capture(Field::ContentType)
}

/// `((letterOrDigit | %XX)+ -)+`, reduced to one decoded string.
fn title() -> GrammarRule {
    let title_part =
        GrammarRule::choice([token(TokenClass::LetterOrDigit), token(TokenClass::PercentEncoded)])
            .one_or_more();

    GrammarRule::seq([title_part, token(TokenClass::Dash)])
        .one_or_more()
        .capture_with(Field::Title, Transform::DecodeTitle, Merge::Replace)
}

fn id(layout: Layout) -> GrammarRule {
    let max = match layout {
        Layout::Strict => None,
        Layout::Lenient => Some(LENIENT_ID_MAX_LEN),
    };
    token(TokenClass::LetterOrDigit)
        .repeat(ID_MIN_LEN, max)
        .capture(Field::Id)
}

fn data() -> GrammarRule {
    token(TokenClass::LetterOrDigit)
        .one_or_more()
        .capture(Field::Data)
}

fn pathname_rule(layout: Layout) -> GrammarRule {
    let slug = GrammarRule::seq([title().optional(), id(layout)]);
    let tail = GrammarRule::seq([
        slash(),
        GrammarRule::seq([data(), slash().optional()]).optional(),
    ])
    .optional();

    GrammarRule::seq([
        slash(),
        segment(country(layout)).optional(),
        segment(lang()).optional(),
        segment(content_type(layout)),
        slug,
        tail,
    ])
}
