//! Permalink error handling.
//!
//! Every failure is a [`PermalinkError`] variant returned to the immediate
//! caller. Nothing is retried or recovered internally.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::syntax::NoMatch;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum PermalinkError {
    #[error("invalid url `{input}`: {reason}")]
    #[diagnostic(code(permalink::url))]
    InvalidUrl { input: String, reason: String },

    #[error("invalid permalink format")]
    #[diagnostic(
        code(permalink::format),
        help("expected /[country/][lang/]type/[title-]id/[data/]")
    )]
    Format {
        #[source_code]
        pathname: String,
        #[label("no grammar rule matches here")]
        at: SourceSpan,
    },

    #[error("country must be provided in the permalink (origin `{origin}` implies none)")]
    #[diagnostic(
        code(permalink::missing_country),
        help("add a country segment or use a regional origin")
    )]
    MissingCountry { origin: String },

    #[error("lang must be provided in the permalink (no default language for country `{country}`)")]
    #[diagnostic(code(permalink::missing_language))]
    MissingLanguage { country: String },

    #[error("invalid permalink: `{component}` is missing")]
    #[diagnostic(code(permalink::invalid))]
    InvalidPermalink { component: &'static str },

    #[error("title must be bound explicitly")]
    #[diagnostic(
        code(permalink::title_required),
        help("try again with canonicalize(&permalink, permalink.title.as_deref())")
    )]
    TitleRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The input URL was rejected before any lookup happened.
    Input,
    /// The URL matched but a locale field could not be resolved.
    Resolution,
    /// A URL could not be built from the given record.
    Construction,
}

impl PermalinkError {
    pub(crate) fn format(pathname: &str, no_match: NoMatch) -> Self {
        Self::Format {
            pathname: pathname.to_string(),
            at: SourceSpan::from((no_match.offset, no_match.len)),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidUrl { .. } | Self::Format { .. } => ErrorCategory::Input,
            Self::MissingCountry { .. } | Self::MissingLanguage { .. } => {
                ErrorCategory::Resolution
            }
            Self::InvalidPermalink { .. } | Self::TitleRequired => ErrorCategory::Construction,
        }
    }
}
