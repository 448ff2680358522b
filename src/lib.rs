//! Parse, normalize and canonicalize localized content permalinks.
//!
//! A permalink URL has the shape
//! `https://<origin>/[country/][lang/]<content type>/[title-]<id>/[data/]`.
//! Parsing matches the pathname against a backtracking grammar and then fills
//! in country and language from the origin tables.
//!
//! ```rust
//! let permalink = permalink::parse("https://www.daangn.com/kr/app/hello-id1018769995/").unwrap();
//! assert_eq!(permalink.country, "kr");
//! assert_eq!(permalink.language, "ko");
//! assert_eq!(permalink.title.as_deref(), Some("hello"));
//!
//! assert_eq!(
//!     permalink::normalize(&permalink).unwrap(),
//!     "https://www.karrotmarket.com/kr/app/id1018769995/"
//! );
//! assert_eq!(
//!     permalink::canonicalize(&permalink, Some("Hello World")).unwrap(),
//!     "https://www.daangn.com/ko/app/hello-world-id1018769995/"
//! );
//! ```

pub use crate::config::{ConfigError, PermalinkConfig};
pub use crate::engine::PermalinkEngine;
pub use crate::errors::{ErrorCategory, PermalinkError};
pub use crate::permalink::{Permalink, Source};
pub use crate::profile::Profile;
pub use crate::tables::OriginTables;

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod permalink;
pub mod profile;
pub mod slug;
pub mod syntax;
pub mod tables;

/// Parse with the shared lenient engine.
pub fn parse(url_like: &str) -> Result<Permalink, PermalinkError> {
    PermalinkEngine::shared().parse(url_like)
}

/// Normalize with the shared lenient engine.
pub fn normalize(permalink: &Permalink) -> Result<String, PermalinkError> {
    PermalinkEngine::shared().normalize(permalink)
}

/// Canonicalize with the shared lenient engine.
pub fn canonicalize(permalink: &Permalink, title: Option<&str>) -> Result<String, PermalinkError> {
    PermalinkEngine::shared().canonicalize(permalink, title)
}
