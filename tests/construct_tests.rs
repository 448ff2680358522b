// normalize / canonicalize and the parse round trip.

use permalink::{ErrorCategory, Permalink, PermalinkEngine, PermalinkError, Profile};
use pretty_assertions::assert_eq;
use rstest::rstest;

const TITLE: &str = "당근마켓-대한민국-1등-동네-앱";
const CANONICAL: &str = "https://www.daangn.com/ko/app/%EB%8B%B9%EA%B7%BC%EB%A7%88%EC%BC%93-%EB%8C%80%ED%95%9C%EB%AF%BC%EA%B5%AD-1%EB%93%B1-%EB%8F%99%EB%84%A4-%EC%95%B1-id1018769995/";

// ============================================================================
// NORMALIZE
// ============================================================================

#[test]
fn normalize_hand_built_record() {
    let permalink = Permalink::new("kr", "app", "id1018769995");
    assert_eq!(
        permalink::normalize(&permalink).unwrap(),
        "https://www.karrotmarket.com/kr/app/id1018769995/"
    );
}

#[test]
fn normalize_ignores_title_language_and_data() {
    let plain = permalink::parse("https://www.daangn.com/kr/app/id1018769995/").unwrap();
    let decorated = permalink::parse(&format!(
        "https://www.daangn.com/kr/app/{TITLE}-id1018769995/abc123/"
    ))
    .unwrap();
    assert_eq!(
        permalink::normalize(&plain).unwrap(),
        permalink::normalize(&decorated).unwrap()
    );
}

#[test]
fn normalize_keeps_strict_country_case() {
    let permalink = PermalinkEngine::new(Profile::Strict)
        .parse(&format!("https://www.daangn.com/KR/ko/app/{TITLE}-id1018769995/"))
        .unwrap();
    assert_eq!(
        permalink::normalize(&permalink).unwrap(),
        "https://www.karrotmarket.com/KR/app/id1018769995/"
    );
}

#[rstest]
#[case(Permalink::new("", "app", "id1018769995"), "country")]
#[case(Permalink::new("kr", "", "id1018769995"), "contentType")]
#[case(Permalink::new("kr", "app", ""), "id")]
fn normalize_rejects_missing_components(
    #[case] permalink: Permalink,
    #[case] component: &'static str,
) {
    let err = permalink::normalize(&permalink).unwrap_err();
    assert_eq!(err, PermalinkError::InvalidPermalink { component });
    assert_eq!(err.category(), ErrorCategory::Construction);
}

// ============================================================================
// CANONICALIZE
// ============================================================================

#[test]
fn canonicalize_with_explicit_title() {
    let permalink = permalink::parse("https://www.daangn.com/kr/app/id1018769995/").unwrap();
    assert_eq!(
        permalink::canonicalize(&permalink, Some(TITLE)).unwrap(),
        CANONICAL
    );
}

#[test]
fn canonicalize_accepts_strict_records() {
    let permalink = PermalinkEngine::new(Profile::Strict)
        .parse("https://www.daangn.com/KR/app/id1018769995/")
        .unwrap();
    assert_eq!(
        permalink::canonicalize(&permalink, Some(TITLE)).unwrap(),
        CANONICAL
    );
}

#[test]
fn canonicalize_requires_explicit_title() {
    let permalink = permalink::parse(&format!(
        "https://www.daangn.com/kr/app/{TITLE}-id1018769995/"
    ))
    .unwrap();
    assert_eq!(
        permalink::canonicalize(&permalink, None),
        Err(PermalinkError::TitleRequired)
    );
    assert_eq!(
        permalink::canonicalize(&permalink, permalink.title.as_deref()).unwrap(),
        CANONICAL
    );
}

#[test]
fn empty_title_yields_id_only_slug() {
    let permalink = Permalink::new("us", "app", "id1018769995");
    assert_eq!(
        permalink::canonicalize(&permalink, Some("")).unwrap(),
        "https://us.karrotmarket.com/en/app/id1018769995/"
    );
}

#[test]
fn canonicalize_prefers_record_language() {
    let permalink = Permalink::new("ca", "app", "id1018769995").with_language("fr");
    assert_eq!(
        permalink::canonicalize(&permalink, Some("Bonjour le monde")).unwrap(),
        "https://ca.karrotmarket.com/fr/app/bonjour-le-monde-id1018769995/"
    );
}

#[test]
fn canonicalize_slugifies_title() {
    let permalink = Permalink::new("jp", "app", "id1018769995");
    assert_eq!(
        permalink::canonicalize(&permalink, Some("Parse, don’t validate")).unwrap(),
        "https://jp.karrotmarket.com/ja/app/parse-dont-validate-id1018769995/"
    );
}

#[rstest]
#[case(Permalink::new("", "app", "id1018769995"), "country")]
#[case(Permalink::new("zz", "app", "id1018769995"), "origin")]
#[case(Permalink::new("kr", "", "id1018769995"), "contentType")]
#[case(Permalink::new("kr", "app", ""), "id")]
fn canonicalize_rejects_incomplete_records(
    #[case] permalink: Permalink,
    #[case] component: &'static str,
) {
    assert_eq!(
        permalink::canonicalize(&permalink, Some("")),
        Err(PermalinkError::InvalidPermalink { component })
    );
}

// ============================================================================
// ROUND TRIP
// ============================================================================

fn assert_round_trip(engine: &PermalinkEngine, url: &str) -> Permalink {
    let original = engine.parse(url).unwrap();
    let title = original.title.clone().unwrap_or_default();
    let canonical = engine.canonicalize(&original, Some(&title)).unwrap();
    let reparsed = engine.parse(&canonical).unwrap();

    assert_eq!(reparsed.country, original.country);
    assert_eq!(reparsed.content_type, original.content_type);
    assert_eq!(reparsed.id, original.id);
    assert_eq!(
        engine.normalize(&reparsed).unwrap(),
        engine.normalize(&original).unwrap()
    );
    reparsed
}

#[rstest]
#[case("https://www.daangn.com/kr/app/당근마켓-대한민국-1등-동네-앱-id1018769995/")]
#[case("https://www.daangn.com/KR/app/id1018769995/abc123/")]
#[case("https://us.karrotmarket.com/app/hello-world-abcdefgh/")]
#[case("https://www.karrotmarket.com/jp/app/%E3%83%8B%E3%83%83%E3%83%9D%E3%83%B3-abcdefghij/")]
#[case("http://localhost:3000/uk/post/a-b-c-abcdefghijklm/")]
fn lenient_canonical_url_parses_back(#[case] url: &str) {
    assert_round_trip(&PermalinkEngine::new(Profile::Lenient), url);
}

#[rstest]
#[case("https://www.daangn.com/kr/app/당근마켓-대한민국-1등-동네-앱-id1018769995/")]
#[case("https://www.daangn.com/KR/app/id1018769995/abc123/")]
#[case("https://us.karrotmarket.com/app/hello-world-abcdefgh/")]
#[case("https://www.karrotmarket.com/JP/ja/app/%E3%83%8B%E3%83%83%E3%83%9D%E3%83%B3-abcdefghij/")]
#[case("http://localhost:3000/UK/en/job-post/a-b-c-abcdefghijklmnop/")]
fn strict_canonical_url_parses_back(#[case] url: &str) {
    assert_round_trip(&PermalinkEngine::new(Profile::Strict), url);
}

#[rstest]
fn long_title_round_trips(#[values(Profile::Lenient, Profile::Strict)] profile: Profile) {
    let engine = PermalinkEngine::new(profile);
    // three percent-encoded tokens per syllable
    let title = "가".repeat(600);
    let original = Permalink::new("kr", "app", "id1018769995");

    let canonical = engine.canonicalize(&original, Some(&title)).unwrap();
    let reparsed = engine.parse(&canonical).unwrap();

    assert_eq!(reparsed.country, profile.fold_country("kr"));
    assert_eq!(reparsed.content_type, "app");
    assert_eq!(reparsed.id, "id1018769995");
    assert_eq!(reparsed.title.as_deref(), Some(title.as_str()));
}

#[test]
fn title_past_the_token_limit_is_rejected_up_front() {
    let permalink = Permalink::new("kr", "app", "id1018769995");
    assert_eq!(
        permalink::canonicalize(&permalink, Some(&"가".repeat(700))),
        Err(PermalinkError::InvalidPermalink { component: "title" })
    );
}

#[test]
fn canonical_round_trip_keeps_decodable_title() {
    let original = permalink::parse(&format!(
        "https://www.daangn.com/kr/app/{TITLE}-id1018769995/"
    ))
    .unwrap();
    let canonical = permalink::canonicalize(&original, original.title.as_deref()).unwrap();
    let reparsed = permalink::parse(&canonical).unwrap();
    assert_eq!(reparsed.title, original.title);
    assert_eq!(reparsed.language, "ko");
}
