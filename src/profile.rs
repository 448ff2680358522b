//! Permalink profiles.
//!
//! A profile pairs a grammar [`Layout`] with the resolution rules that go with
//! it. [`Profile::Lenient`] is the default.

use serde::{Deserialize, Serialize};

use crate::syntax::{Layout, PathnameGrammar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Uppercase country, explicit language segment, `contentType`.
    Strict,
    /// Country in any case folded to lowercase, `serviceType`, language always
    /// taken from the country table.
    #[default]
    Lenient,
}

impl Profile {
    pub fn layout(self) -> Layout {
        match self {
            Self::Strict => Layout::Strict,
            Self::Lenient => Layout::Lenient,
        }
    }

    pub fn grammar(self) -> &'static PathnameGrammar {
        PathnameGrammar::for_layout(self.layout())
    }

    /// Render a country code in this profile's case.
    pub fn fold_country(self, country: &str) -> String {
        match self {
            Self::Strict => country.to_ascii_uppercase(),
            Self::Lenient => country.to_ascii_lowercase(),
        }
    }

    /// Whether a `lang` path segment takes precedence over the country default.
    pub fn reads_language_from_path(self) -> bool {
        matches!(self, Self::Strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folding_follows_profile() {
        assert_eq!(Profile::Strict.fold_country("kr"), "KR");
        assert_eq!(Profile::Lenient.fold_country("KR"), "kr");
        assert_eq!(Profile::Lenient.fold_country("Kr"), "kr");
    }

    #[test]
    fn grammar_matches_layout() {
        assert_eq!(Profile::Strict.grammar().layout(), Layout::Strict);
        assert_eq!(Profile::default().grammar().layout(), Layout::Lenient);
    }
}
