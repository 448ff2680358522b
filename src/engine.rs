//! Permalink engine: parse, normalize and canonicalize.
//!
//! The engine owns a [`Profile`] and shared [`OriginTables`]. It runs the
//! profile's pathname grammar, then fills in missing locale fields:
//!
//! 1. country: the origin's country if the origin is well known, otherwise the
//!    path segment;
//! 2. language: the path segment when the profile reads it, otherwise the
//!    country's default language.
//!
//! Any field that stays unresolved is an error; partially filled records are
//! never returned.

use std::sync::Arc;

use once_cell::sync::Lazy;
use url::Url;

use crate::errors::PermalinkError;
use crate::permalink::{Permalink, Source};
use crate::profile::Profile;
use crate::slug::slugify;
use crate::syntax::lexer::tokenize;
use crate::syntax::{Field, NoMatch, RawFieldMap, MAX_PATHNAME_TOKENS};
use crate::tables::OriginTables;

static SHARED: Lazy<PermalinkEngine> = Lazy::new(|| PermalinkEngine::new(Profile::default()));

#[derive(Debug, Clone)]
pub struct PermalinkEngine {
    profile: Profile,
    tables: Arc<OriginTables>,
}

impl Default for PermalinkEngine {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}

impl PermalinkEngine {
    /// An engine for `profile` using the built-in tables.
    pub fn new(profile: Profile) -> Self {
        Self::with_tables(profile, OriginTables::shared_well_known())
    }

    pub fn with_tables(profile: Profile, tables: Arc<OriginTables>) -> Self {
        Self { profile, tables }
    }

    /// The process-wide lenient engine used by the crate-level functions.
    pub fn shared() -> &'static PermalinkEngine {
        &SHARED
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn tables(&self) -> &OriginTables {
        &self.tables
    }

    // ========================================================================
    // PARSE
    // ========================================================================

    /// Parse an absolute URL string.
    pub fn parse(&self, url_like: &str) -> Result<Permalink, PermalinkError> {
        let url = Url::parse(url_like).map_err(|e| PermalinkError::InvalidUrl {
            input: url_like.to_string(),
            reason: e.to_string(),
        })?;
        self.parse_url(&url)
    }

    pub fn parse_url(&self, url: &Url) -> Result<Permalink, PermalinkError> {
        let source = Source::from_url(url);

        let mut fields = self
            .profile
            .grammar()
            .match_pathname(&source.pathname)
            .map_err(|no_match| PermalinkError::format(&source.pathname, no_match))?;

        let country = self.resolve_country(&source.origin, fields.take(Field::Country))?;
        let language = self.resolve_language(&country, fields.take(Field::Lang))?;
        let content_type = required_field(&mut fields, Field::ContentType, &source.pathname)?;
        let id = required_field(&mut fields, Field::Id, &source.pathname)?;
        let title = fields.take(Field::Title).filter(|t| !t.is_empty());
        let data = fields.take(Field::Data).filter(|d| !d.is_empty());

        tracing::debug!(
            href = %source.href,
            %country,
            %language,
            %content_type,
            %id,
            "parsed permalink"
        );

        Ok(Permalink {
            source: Some(source),
            country,
            language,
            content_type,
            title,
            id,
            data,
        })
    }

    fn resolve_country(
        &self,
        origin: &str,
        from_path: Option<String>,
    ) -> Result<String, PermalinkError> {
        let country = match (self.tables.country_for_origin(origin), from_path) {
            (Some(from_origin), from_path) => {
                let overridden = from_path.filter(|c| !c.eq_ignore_ascii_case(from_origin));
                if let Some(path_country) = overridden {
                    tracing::debug!(
                        origin,
                        path_country = %path_country,
                        country = from_origin,
                        "origin country overrides path segment"
                    );
                }
                from_origin.to_string()
            }
            (None, Some(from_path)) => from_path,
            (None, None) => {
                return Err(PermalinkError::MissingCountry {
                    origin: origin.to_string(),
                })
            }
        };
        Ok(self.profile.fold_country(&country))
    }

    fn resolve_language(
        &self,
        country: &str,
        from_path: Option<String>,
    ) -> Result<String, PermalinkError> {
        from_path
            .filter(|_| self.profile.reads_language_from_path())
            .or_else(|| self.tables.language_for_country(country).map(str::to_string))
            .ok_or_else(|| PermalinkError::MissingLanguage {
                country: country.to_string(),
            })
    }

    // ========================================================================
    // NORMALIZE / CANONICALIZE
    // ========================================================================

    /// The region-independent identity URL:
    /// `<normalized origin>/<country>/<content type>/<id>/`.
    ///
    /// Title, language and data are ignored.
    pub fn normalize(&self, permalink: &Permalink) -> Result<String, PermalinkError> {
        let country = non_empty("country", &permalink.country)?;
        let content_type = non_empty("contentType", &permalink.content_type)?;
        let id = non_empty("id", &permalink.id)?;

        Ok(format!(
            "{}/{}/{}/{}/",
            self.tables.normalized_origin(),
            country,
            content_type,
            id
        ))
    }

    /// The locale- and title-specific URL:
    /// `<country origin>/<language>/<content type>/<title slug>-<id>/`.
    ///
    /// `title` must be passed explicitly, even when it equals
    /// `permalink.title`; `None` fails with [`PermalinkError::TitleRequired`].
    /// An empty title yields a slug of just the id. A title too long for the
    /// pathname grammar fails with `InvalidPermalink { component: "title" }`.
    pub fn canonicalize(
        &self,
        permalink: &Permalink,
        title: Option<&str>,
    ) -> Result<String, PermalinkError> {
        let title = title.ok_or(PermalinkError::TitleRequired)?;

        let country = non_empty("country", &permalink.country)?;
        let origin = self
            .tables
            .origin_for_country(country)
            .ok_or(PermalinkError::InvalidPermalink { component: "origin" })?;
        let language = match permalink.language.as_str() {
            "" => self
                .tables
                .language_for_country(country)
                .ok_or(PermalinkError::InvalidPermalink { component: "lang" })?,
            language => language,
        };
        let content_type = non_empty("contentType", &permalink.content_type)?;
        let id = non_empty("id", &permalink.id)?;

        let slug = title_slug(title, id);
        let pathname = format!(
            "/{}/{}/{}/",
            language,
            content_type,
            urlencoding::encode(&slug)
        );
        if !fits_token_limit(&pathname) {
            tracing::debug!(len = pathname.len(), "canonical pathname exceeds token limit");
            return Err(PermalinkError::InvalidPermalink { component: "title" });
        }

        Ok(format!("{origin}{pathname}"))
    }
}

/// `slugify(title)-id`, or just `id` when the title slugifies to nothing. The
/// id is appended verbatim so it survives a round trip.
fn title_slug(title: &str, id: &str) -> String {
    let title = slugify(title);
    if title.is_empty() {
        id.to_string()
    } else {
        format!("{title}-{id}")
    }
}

fn fits_token_limit(pathname: &str) -> bool {
    tokenize(pathname).map_or(false, |tokens| tokens.len() <= MAX_PATHNAME_TOKENS)
}

fn non_empty<'a>(component: &'static str, value: &'a str) -> Result<&'a str, PermalinkError> {
    if value.is_empty() {
        return Err(PermalinkError::InvalidPermalink { component });
    }
    Ok(value)
}

// the layouts make these fields mandatory, so a miss means the grammar and the
// model disagree
fn required_field(
    fields: &mut RawFieldMap,
    field: Field,
    pathname: &str,
) -> Result<String, PermalinkError> {
    fields.take(field).filter(|v| !v.is_empty()).ok_or_else(|| {
        PermalinkError::format(
            pathname,
            NoMatch {
                offset: 0,
                len: pathname.len(),
            },
        )
    })
}
