// tests/curation_render.rs
mod common;

use chrono::NaiveDate;
use common::{story_xml, strings, FixtureApi, STORY_500001, STORY_500002};
use news_link::config::RankOrder;
use news_link::curation::CurationRenderer;
use news_link::story::CURATED_NO_AUTHOR;
use news_link::NewsError;
use std::sync::Arc;

fn april_3() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 3).unwrap()
}

#[tokio::test]
async fn output_follows_rank_and_skips_unranked() {
    let api = Arc::new(
        FixtureApi::default()
            .with_story("x", &story_xml("x", "Story X"))
            .with_story("y", &story_xml("y", "Story Y"))
            .with_story("z", &story_xml("z", "Story Z")),
    );
    let curator = CurationRenderer::new(api.clone(), RankOrder::Numeric);

    let digest = curator
        .render_on(&strings(&["x", "y", "z"]), &strings(&["2", "", "1"]), april_3())
        .await
        .expect("render ok");

    assert_eq!(digest.stories.keys().collect::<Vec<_>>(), vec!["z", "x"]);
    assert_eq!(digest.post_date, "Wednesday - April 3, 2024");
    assert!(!api.requested().contains(&"story:y".to_string()));
}

#[tokio::test]
async fn curated_records_use_body_teaser_and_own_byline_default() {
    let api = Arc::new(
        FixtureApi::default()
            .with_story("500001", STORY_500001)
            .with_story("500002", STORY_500002),
    );
    let curator = CurationRenderer::new(api, RankOrder::Numeric);
    let digest = curator
        .render_on(
            &strings(&["500002", "500001"]),
            &strings(&["10", "2"]),
            april_3(),
        )
        .await
        .unwrap();

    assert_eq!(
        digest.stories.keys().collect::<Vec<_>>(),
        vec!["500001", "500002"]
    );

    let first = digest.stories.get("500001").unwrap();
    assert_eq!(first.byline, "Pat Reporter");
    assert_eq!(
        first.teaser,
        "Lawmakers in\n<b>\n Montpelier\n</b>\nwrapped up just after midnight.\n"
    );

    let second = digest.stories.get("500002").unwrap();
    assert_eq!(second.byline, CURATED_NO_AUTHOR);
    assert_eq!(second.teaser, "");
}

#[tokio::test]
async fn legacy_text_ordering_is_available() {
    let api = Arc::new(
        FixtureApi::default()
            .with_story("500001", STORY_500001)
            .with_story("500002", STORY_500002),
    );
    let curator = CurationRenderer::new(api, RankOrder::Lexicographic);
    let digest = curator
        .render_on(
            &strings(&["500002", "500001"]),
            &strings(&["10", "2"]),
            april_3(),
        )
        .await
        .unwrap();
    assert_eq!(
        digest.stories.keys().collect::<Vec<_>>(),
        vec!["500002", "500001"]
    );
}

#[tokio::test]
async fn any_failed_lookup_aborts_curation() {
    let api = Arc::new(FixtureApi::default().with_story("500001", STORY_500001));
    let curator = CurationRenderer::new(api, RankOrder::Numeric);
    let err = curator
        .render_on(
            &strings(&["500001", "missing"]),
            &strings(&["1", "2"]),
            april_3(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, NewsError::RemoteFetch { .. }), "got {err:?}");
}

#[tokio::test]
async fn lookup_without_story_is_xml_error() {
    let api = Arc::new(FixtureApi::default().with_story("gone", "<nprml><list></list></nprml>"));
    let curator = CurationRenderer::new(api, RankOrder::Numeric);
    let err = curator
        .render_on(&strings(&["gone"]), &strings(&["1"]), april_3())
        .await
        .unwrap_err();
    assert!(matches!(err, NewsError::XmlParse(_)), "got {err:?}");
}

#[tokio::test]
async fn nothing_ranked_gives_empty_digest() {
    let api = Arc::new(FixtureApi::default());
    let curator = CurationRenderer::new(api.clone(), RankOrder::Numeric);
    let digest = curator
        .render_on(&strings(&["a", "b"]), &strings(&["", " "]), april_3())
        .await
        .unwrap();
    assert!(digest.stories.is_empty());
    assert!(api.requested().is_empty());
}

#[tokio::test]
async fn inline_markup_in_body_and_title_still_renders() {
    let body = r#"<nprml><list><story id="600001">
<link type="html">https://n.test/600001</link>
<title>Budget <i>passes</i></title>
<text>
  <paragraph num="1">Hello <b>world</b> end</paragraph>
</text>
</story></list></nprml>"#;
    let api = Arc::new(FixtureApi::default().with_story("600001", body));
    let curator = CurationRenderer::new(api, RankOrder::Numeric);
    let digest = curator
        .render_on(&strings(&["600001"]), &strings(&["1"]), april_3())
        .await
        .expect("mixed content renders");

    let story = digest.stories.get("600001").unwrap();
    assert_eq!(story.title.trim(), "Budget");
    assert_eq!(story.teaser, "Hello\n");
}
