//! Title slugs that keep CJK text readable.
//!
//! Unlike ASCII-only slugifiers, Hangul, kana and common kanji survive as-is so
//! the URL stays meaningful once percent-decoded by a browser.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

// Half-width quotation marks and apostrophes, dropped outright.
static QUOTES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u0022\u0027\u02bc\u0060\u00b4\u2018\u2019\u201c\u201d]").expect("valid regex")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_]+").expect("valid regex"));

// Anything outside alphanumerics, `-`, and the CJK blocks:
//   3040-309f hiragana
//   30a0-30ff katakana
//   3400-4dbf CJK extension A
//   4e00-9faf CJK unified ideographs
//   ac00-d7a3 Hangul syllables
//   ff00-ff9f full-width roman and half-width katakana
static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[^a-zA-Z0-9\-\u3040-\u309f\u30a0-\u30ff\u3400-\u4dbf\u4e00-\u9faf\uac00-\ud7a3\uff00-\uff9f]",
    )
    .expect("valid regex")
});

static DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid regex"));

static EDGE_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-|-$").expect("valid regex"));

// Hangul jamo, compatibility jamo, parenthesized and circled Hangul, half-width
// Hangul and the won sign.
static HANGUL_COMPAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u1100-\u11ff\u3130-\u318f\u3200-\u321e\u3260-\u327f\uffa0-\uffdc\uffe6]+")
        .expect("valid regex")
});

static HALF_WIDTH_KATAKANA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\uff60-\uff9f]+").expect("valid regex"));

/// Convert arbitrary text into a lowercase, dash-separated slug.
///
/// ```rust
/// use permalink::slug::slugify;
/// assert_eq!(slugify("당근마켓 - 대한민국 1등 동네 커뮤니티"), "당근마켓-대한민국-1등-동네-커뮤니티");
/// assert_eq!(slugify("Parse, don’t validate"), "parse-dont-validate");
/// ```
pub fn slugify(text: &str) -> String {
    let slug = normalize_hangul(&normalize_katakana(text));
    let slug = QUOTES.replace_all(&slug, "");
    let slug = WHITESPACE.replace_all(&slug, "-");
    let slug = DISALLOWED.replace_all(&slug, "-");
    let slug = DASHES.replace_all(&slug, "-");
    let slug = EDGE_DASHES.replace_all(&slug, "");

    slug.to_lowercase()
}

fn nfkc(caps: &Captures<'_>) -> String {
    caps[0].nfkc().collect()
}

fn normalize_hangul(text: &str) -> String {
    HANGUL_COMPAT.replace_all(text, nfkc).into_owned()
}

fn normalize_katakana(text: &str) -> String {
    HALF_WIDTH_KATAKANA.replace_all(text, nfkc).into_owned()
}
