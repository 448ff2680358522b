// Engines built from JSON / YAML configuration.

use permalink::{ConfigError, PermalinkConfig, PermalinkError, Profile};
use pretty_assertions::assert_eq;

const FRENCH_TABLES: &str = r#"{
    "profile": "lenient",
    "tables": {
        "originToCountry": { "https://fr.example.com": "fr", "https://www.example.com": null },
        "countryToOrigin": { "fr": "https://fr.example.com" },
        "countryToLanguage": { "fr": "fr" },
        "originAlias": { "https://example.com": "https://www.example.com" },
        "normalizedOrigin": "https://www.example.com"
    }
}"#;

#[test]
fn json_config_replaces_every_table() {
    let engine = PermalinkConfig::from_json_str(FRENCH_TABLES)
        .unwrap()
        .into_engine()
        .unwrap();

    let permalink = engine
        .parse("https://fr.example.com/annonce/velo-abcdefgh/")
        .unwrap();
    assert_eq!(permalink.country, "fr");
    assert_eq!(permalink.language, "fr");
    assert_eq!(permalink.content_type, "annonce");
    assert_eq!(
        engine.normalize(&permalink).unwrap(),
        "https://www.example.com/fr/annonce/abcdefgh/"
    );
    assert_eq!(
        engine.canonicalize(&permalink, Some("Vélo rouge")).unwrap(),
        "https://fr.example.com/fr/annonce/v-lo-rouge-abcdefgh/"
    );

    // the built-in origins are gone
    assert!(matches!(
        engine.parse("https://www.daangn.com/app/abcdefgh/"),
        Err(PermalinkError::MissingCountry { .. })
    ));
    // aliased apex origin carries no country either
    assert!(matches!(
        engine.parse("https://example.com/annonce/abcdefgh/"),
        Err(PermalinkError::MissingCountry { .. })
    ));
}

#[test]
fn yaml_config_selects_strict_profile() {
    let engine = PermalinkConfig::from_yaml_str("profile: strict\n")
        .unwrap()
        .into_engine()
        .unwrap();
    assert_eq!(engine.profile(), Profile::Strict);

    let permalink = engine
        .parse("https://www.daangn.com/KR/en/app/id1018769995/")
        .unwrap();
    assert_eq!(permalink.country, "KR");
    assert_eq!(permalink.language, "en");
}

#[test]
fn config_round_trips_through_yaml() {
    let config = PermalinkConfig::from_json_str(FRENCH_TABLES).unwrap();
    let yaml = serde_yaml::to_string(&config).unwrap();
    assert_eq!(PermalinkConfig::from_yaml_str(&yaml).unwrap(), config);
}

#[test]
fn bad_origin_is_reported_with_its_table() {
    let config = PermalinkConfig::from_yaml_str(
        "tables:\n  originToCountry:\n    not-a-url: kr\n",
    )
    .unwrap();
    match config.into_engine() {
        Err(ConfigError::InvalidTable { table, entry, .. }) => {
            assert_eq!(table, "originToCountry");
            assert_eq!(entry, "not-a-url");
        }
        other => panic!("expected an invalid table error, got {other:?}"),
    }
}

#[test]
fn unknown_profile_is_a_yaml_error() {
    assert!(matches!(
        PermalinkConfig::from_yaml_str("profile: loose\n"),
        Err(ConfigError::Yaml(_))
    ));
}
