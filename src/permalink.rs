//! The permalink record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::engine::PermalinkEngine;
use crate::errors::PermalinkError;

/// Components of the URL a [`Permalink`] was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub href: String,
    pub origin: String,
    /// Always ends with `/`.
    pub pathname: String,
}

impl Source {
    /// Split `url`, forcing a trailing slash onto its path.
    pub fn from_url(url: &Url) -> Self {
        let mut url = url.clone();
        if !url.path().ends_with('/') {
            let pathname = format!("{}/", url.path());
            url.set_path(&pathname);
        }
        Self {
            href: url.as_str().to_string(),
            origin: url.origin().ascii_serialization(),
            pathname: url.path().to_string(),
        }
    }
}

/// A parsed permalink.
///
/// `title` and `data` are `None` when absent and never empty. Records built by
/// hand for [`normalize`](crate::normalize) or [`canonicalize`](crate::canonicalize)
/// may leave `language` empty and `source` unset.
///
/// Both profiles serialize the same shape, `lang` and `contentType`, so a
/// record's JSON does not depend on the engine that produced it. The lenient
/// names `defaultLanguage` and `serviceType` are accepted when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permalink {
    #[serde(flatten)]
    pub source: Option<Source>,
    pub country: String,
    #[serde(rename = "lang", alias = "defaultLanguage", default)]
    pub language: String,
    #[serde(rename = "contentType", alias = "serviceType")]
    pub content_type: String,
    #[serde(default)]
    pub title: Option<String>,
    pub id: String,
    #[serde(default)]
    pub data: Option<String>,
}

impl Permalink {
    pub fn new(
        country: impl Into<String>,
        content_type: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            content_type: content_type.into(),
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Empty titles are stored as `None`.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into()).filter(|t| !t.is_empty());
        self
    }

    /// Empty data is stored as `None`.
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into()).filter(|d| !d.is_empty());
        self
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "permalink")?;
        if let Some(source) = &self.source {
            writeln!(f, "\thref: {}", source.href)?;
        }
        writeln!(f, "\tcountry: {}", self.country)?;
        writeln!(f, "\tlanguage: {}", self.language)?;
        writeln!(f, "\tcontent_type: {}", self.content_type)?;
        writeln!(f, "\ttitle: {:?}", self.title)?;
        writeln!(f, "\tid: {}", self.id)?;
        write!(f, "\tdata: {:?}", self.data)
    }
}

impl FromStr for Permalink {
    type Err = PermalinkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PermalinkEngine::shared().parse(value)
    }
}

impl TryFrom<&str> for Permalink {
    type Error = PermalinkError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&Url> for Permalink {
    type Error = PermalinkError;

    fn try_from(url: &Url) -> Result<Self, Self::Error> {
        PermalinkEngine::shared().parse_url(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn source_forces_trailing_slash() {
        let url = Url::parse("https://www.daangn.com/kr/app/id1018769995?ref=home").unwrap();
        let source = Source::from_url(&url);
        assert_eq!(source.pathname, "/kr/app/id1018769995/");
        assert_eq!(source.origin, "https://www.daangn.com");
        assert_eq!(
            source.href,
            "https://www.daangn.com/kr/app/id1018769995/?ref=home"
        );
    }

    #[test]
    fn builders_drop_empty_optionals() {
        let permalink = Permalink::new("kr", "app", "id1018769995")
            .with_title("")
            .with_data("abc");
        assert_eq!(permalink.title, None);
        assert_eq!(permalink.data.as_deref(), Some("abc"));
    }

    #[test]
    fn serializes_to_the_camel_case_shape() {
        let permalink = Permalink::new("kr", "app", "id1018769995").with_language("ko");
        let json = serde_json::to_value(&permalink).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "country": "kr",
                "lang": "ko",
                "contentType": "app",
                "title": null,
                "id": "id1018769995",
                "data": null,
            })
        );
    }

    #[test]
    fn deserializes_lenient_field_names() {
        let permalink: Permalink = serde_json::from_str(
            r#"{"country":"kr","defaultLanguage":"ko","serviceType":"app","id":"id1018769995"}"#,
        )
        .unwrap();
        assert_eq!(
            permalink,
            Permalink::new("kr", "app", "id1018769995").with_language("ko")
        );
    }

    #[test]
    fn lenient_records_serialize_with_the_shared_names() {
        let permalink = crate::parse("https://www.daangn.com/kr/app/id1018769995/").unwrap();
        let json = serde_json::to_value(&permalink).unwrap();
        assert_eq!(json["lang"], "ko");
        assert_eq!(json["contentType"], "app");
        assert!(json.get("serviceType").is_none());
        assert!(json.get("defaultLanguage").is_none());
        assert_eq!(json["pathname"], "/kr/app/id1018769995/");
    }

    #[test]
    fn display_lists_fields() {
        let text = Permalink::new("kr", "app", "id1018769995").to_string();
        assert!(text.starts_with("permalink\n"));
        assert!(text.contains("\tcontent_type: app"));
        assert!(text.contains("\ttitle: None"));
    }
}
