//! Country and origin lookup tables.
//!
//! Tables are plain data, validated once and then shared read-only behind an
//! [`Arc`]. Country codes are stored lowercase and every lookup folds case, so
//! the strict profile's uppercase codes hit the same entries.

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ConfigError;

static WELL_KNOWN: Lazy<Arc<OriginTables>> = Lazy::new(|| Arc::new(OriginTables::well_known()));

/// Origin used by [`normalize`](crate::PermalinkEngine::normalize) for every country.
pub const DEFAULT_NORMALIZED_ORIGIN: &str = "https://www.karrotmarket.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OriginTables {
    /// Origin to country. `None` marks an origin that is known but carries no
    /// country, so the path has to supply one.
    origin_to_country: BTreeMap<String, Option<String>>,
    country_to_origin: BTreeMap<String, String>,
    country_to_language: BTreeMap<String, String>,
    /// Bare domains to their canonical `www` origin, applied before any lookup.
    origin_alias: BTreeMap<String, String>,
    normalized_origin: String,
}

impl Default for OriginTables {
    fn default() -> Self {
        Self::well_known()
    }
}

impl OriginTables {
    pub fn new(
        origin_to_country: BTreeMap<String, Option<String>>,
        country_to_origin: BTreeMap<String, String>,
        country_to_language: BTreeMap<String, String>,
        origin_alias: BTreeMap<String, String>,
        normalized_origin: impl Into<String>,
    ) -> Self {
        Self {
            origin_to_country,
            country_to_origin,
            country_to_language,
            origin_alias,
            normalized_origin: normalized_origin.into(),
        }
        .normalized()
    }

    /// The built-in tables for the daangn.com / karrotmarket.com origins.
    pub fn well_known() -> Self {
        let origin_to_country = [
            ("https://www.daangn.com", Some("kr")),
            ("https://www.karrotmarket.com", None),
            ("https://ca.karrotmarket.com", Some("ca")),
            ("https://jp.karrotmarket.com", Some("jp")),
            ("https://uk.karrotmarket.com", Some("uk")),
            ("https://us.karrotmarket.com", Some("us")),
            ("https://kr.karrotmarket.com", Some("kr")),
        ];
        let country_to_origin = [
            ("ca", "https://ca.karrotmarket.com"),
            ("jp", "https://jp.karrotmarket.com"),
            ("kr", "https://www.daangn.com"),
            ("uk", "https://uk.karrotmarket.com"),
            ("us", "https://us.karrotmarket.com"),
        ];
        let country_to_language = [
            ("ca", "en"),
            ("jp", "ja"),
            ("kr", "ko"),
            ("uk", "en"),
            ("us", "en"),
        ];
        let origin_alias = [
            ("https://daangn.com", "https://www.daangn.com"),
            ("https://karrotmarket.com", "https://www.karrotmarket.com"),
        ];

        Self {
            origin_to_country: origin_to_country
                .into_iter()
                .map(|(o, c)| (o.to_string(), c.map(str::to_string)))
                .collect(),
            country_to_origin: to_owned_map(country_to_origin),
            country_to_language: to_owned_map(country_to_language),
            origin_alias: to_owned_map(origin_alias),
            normalized_origin: DEFAULT_NORMALIZED_ORIGIN.to_string(),
        }
    }

    /// The built-in tables, shared.
    pub fn shared_well_known() -> Arc<Self> {
        Arc::clone(&WELL_KNOWN)
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    /// `origin` after alias resolution.
    pub fn canonical_origin<'a>(&'a self, origin: &'a str) -> &'a str {
        self.origin_alias
            .get(origin)
            .map(String::as_str)
            .unwrap_or(origin)
    }

    pub fn country_for_origin(&self, origin: &str) -> Option<&str> {
        self.origin_to_country
            .get(self.canonical_origin(origin))
            .and_then(|country| country.as_deref())
    }

    /// Canonical origin serving `country`, with aliases applied.
    pub fn origin_for_country(&self, country: &str) -> Option<&str> {
        self.country_to_origin
            .get(&country.to_ascii_lowercase())
            .map(|origin| self.canonical_origin(origin))
    }

    pub fn language_for_country(&self, country: &str) -> Option<&str> {
        self.country_to_language
            .get(&country.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn normalized_origin(&self) -> &str {
        &self.normalized_origin
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Lowercase every country code and language.
    pub fn normalized(self) -> Self {
        let lower = |s: String| s.to_ascii_lowercase();
        Self {
            origin_to_country: self
                .origin_to_country
                .into_iter()
                .map(|(origin, country)| (origin, country.map(lower)))
                .collect(),
            country_to_origin: self
                .country_to_origin
                .into_iter()
                .map(|(country, origin)| (lower(country), origin))
                .collect(),
            country_to_language: self
                .country_to_language
                .into_iter()
                .map(|(country, language)| (lower(country), lower(language)))
                .collect(),
            origin_alias: self.origin_alias,
            normalized_origin: self.normalized_origin,
        }
    }

    /// Check that every entry is usable: two-letter codes, and origins that are
    /// bare `scheme://host[:port]` strings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (origin, country) in &self.origin_to_country {
            check_origin("originToCountry", origin)?;
            if let Some(country) = country {
                check_code("originToCountry", country)?;
            }
        }
        for (country, origin) in &self.country_to_origin {
            check_code("countryToOrigin", country)?;
            check_origin("countryToOrigin", origin)?;
        }
        for (country, language) in &self.country_to_language {
            check_code("countryToLanguage", country)?;
            check_code("countryToLanguage", language)?;
        }
        for (from, to) in &self.origin_alias {
            check_origin("originAlias", from)?;
            check_origin("originAlias", to)?;
        }
        check_origin("normalizedOrigin", &self.normalized_origin)
    }
}

fn to_owned_map<const N: usize>(entries: [(&str, &str); N]) -> BTreeMap<String, String> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn check_code(table: &'static str, code: &str) -> Result<(), ConfigError> {
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Ok(());
    }
    Err(ConfigError::InvalidTable {
        table,
        entry: code.to_string(),
        reason: "expected a two-letter code".into(),
    })
}

fn check_origin(table: &'static str, origin: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidTable {
        table,
        entry: origin.to_string(),
        reason,
    };
    let url = Url::parse(origin).map_err(|e| invalid(e.to_string()))?;
    let serialized = url.origin().ascii_serialization();
    if serialized != origin {
        return Err(invalid(format!("expected a bare origin such as `{serialized}`")));
    }
    Ok(())
}
