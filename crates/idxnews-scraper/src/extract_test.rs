use super::*;
use chrono::TimeZone;

use idxnews_core::lexicon::Lexicon;
use idxnews_core::relevance::RelevanceFilter;

use crate::test_support::{MemoryStore, StaticPage};

const LISTING_URL: &str = "https://news.example.com/tag/bbca";

fn test_descriptor() -> SiteDescriptor {
    SiteDescriptor {
        id: "testsource",
        name: "Test Source",
        url_pattern: "https://news.example.com/tag/{symbol}",
        article_selector: "li.item",
        title_selector: "h2",
        link_selector: Some("a"),
        date_selector: Some(".date"),
        summary_selector: Some(".summary"),
        image_selector: Some("img"),
        requires_scroll: false,
        lazy_image_attrs: &["data-src", "data-lazy", "data-original"],
        link_base_override: None,
    }
}

fn test_filter() -> RelevanceFilter {
    RelevanceFilter::new(Lexicon {
        positive: vec!["saham".to_string(), "laba".to_string()],
        negative: vec!["gempa".to_string()],
    })
}

fn item(title: &str, href: &str, extras: &str) -> String {
    format!(r#"<li class="item"><h2><a href="{href}">{title}</a></h2>{extras}</li>"#)
}

fn listing(items: &[String]) -> String {
    format!("<html><body><ul>{}</ul></body></html>", items.join("\n"))
}

async fn extract(
    page: &mut StaticPage,
    descriptor: &SiteDescriptor,
    symbol: &str,
    store: &MemoryStore,
    opts: &ExtractOptions,
) -> Extraction {
    extract_articles(page, descriptor, LISTING_URL, symbol, store, &test_filter(), opts)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Record construction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn accepted_record_carries_all_fields() {
    let html = listing(&[item(
        "Saham BBCA menguat",
        "/news/a1",
        r#"<span class="date">10 Februari 2026 14:30</span>
           <p class="summary">Ringkasan singkat.</p>
           <img data-src="https://img.example.com/a1.jpg" src="https://img.example.com/blank.gif">"#,
    )]);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::default();

    let extraction = extract(
        &mut page,
        &test_descriptor(),
        "BBCA",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert_eq!(extraction.outcomes, vec![CandidateOutcome::Accepted]);
    let record = &extraction.records[0];
    assert_eq!(record.title, "Saham BBCA menguat");
    assert_eq!(record.url, "https://news.example.com/news/a1");
    assert_eq!(record.hash, article_hash("https://news.example.com/news/a1"));
    assert_eq!(record.source, "testsource");
    assert_eq!(record.summary.as_deref(), Some("Ringkasan singkat."));
    assert_eq!(record.stock_symbols, vec!["BBCA".to_string()]);
    assert_eq!(
        record.image_url.as_deref(),
        Some("https://img.example.com/a1.jpg")
    );
    assert_eq!(
        record.published_at,
        chrono::Utc.with_ymd_and_hms(2026, 2, 10, 14, 30, 0).unwrap()
    );
}

#[tokio::test]
async fn absolute_links_pass_through_unchanged() {
    let html = listing(&[item(
        "Saham naik",
        "https://other.example.org/read/123",
        "",
    )]);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::default();

    let extraction = extract(
        &mut page,
        &test_descriptor(),
        "BBCA",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert_eq!(
        extraction.records[0].url,
        "https://other.example.org/read/123"
    );
}

#[tokio::test]
async fn base_override_wins_for_relative_links() {
    let mut descriptor = test_descriptor();
    descriptor.link_base_override = Some("https://www.articles.example.com");

    let html = listing(&[item("Saham naik", "/read/456", "")]);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::default();

    let extraction = extract(
        &mut page,
        &descriptor,
        "BBCA",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert_eq!(
        extraction.records[0].url,
        "https://www.articles.example.com/read/456"
    );
}

#[tokio::test]
async fn container_anchor_is_used_when_link_selector_is_none() {
    let mut descriptor = test_descriptor();
    descriptor.article_selector = "a.article-link";
    descriptor.title_selector = "h2";
    descriptor.link_selector = None;

    let html = r#"<html><body>
        <a class="article-link" href="/read/789"><h2>Saham turun tipis</h2></a>
    </body></html>"#;
    let mut page = StaticPage::from_html(html);
    let store = MemoryStore::default();

    let extraction = extract(
        &mut page,
        &descriptor,
        "BBCA",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert_eq!(extraction.records[0].url, "https://news.example.com/read/789");
}

#[tokio::test]
async fn long_title_is_truncated() {
    let long_title = format!("Saham {}", "x".repeat(600));
    let html = listing(&[item(&long_title, "/news/long", "")]);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::default();

    let extraction = extract(
        &mut page,
        &test_descriptor(),
        "BBCA",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert_eq!(extraction.records[0].title.chars().count(), 500);
}

// ---------------------------------------------------------------------------
// Skips
// ---------------------------------------------------------------------------

#[tokio::test]
async fn containers_without_title_or_link_are_skipped() {
    let html = listing(&[
        r#"<li class="item"><h2></h2></li>"#.to_string(),
        r#"<li class="item"><h2>Saham tanpa tautan</h2></li>"#.to_string(),
        item("Saham lengkap", "/news/ok", ""),
    ]);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::default();

    let extraction = extract(
        &mut page,
        &test_descriptor(),
        "BBCA",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert_eq!(
        extraction.outcomes,
        vec![
            CandidateOutcome::Skipped(SkipReason::MissingTitle),
            CandidateOutcome::Skipped(SkipReason::MissingLink),
            CandidateOutcome::Accepted,
        ]
    );
}

#[tokio::test]
async fn irrelevant_articles_do_not_reach_the_dedup_gate() {
    let html = listing(&[
        item("Gempa bumi mengguncang Jakarta", "/news/quake", ""),
        item("Laba Bumi Resources naik", "/news/profit", ""),
    ]);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::default();

    let extraction = extract(
        &mut page,
        &test_descriptor(),
        "BUMI",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert_eq!(
        extraction.outcomes,
        vec![
            CandidateOutcome::Skipped(SkipReason::Irrelevant),
            CandidateOutcome::Accepted,
        ]
    );
    // Only the relevant candidate was checked against the store.
    assert_eq!(store.exists_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn store_failure_fails_open() {
    let html = listing(&[item("Saham tetap masuk", "/news/open", "")]);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::failing_exists();

    let extraction = extract(
        &mut page,
        &test_descriptor(),
        "BBCA",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert_eq!(extraction.outcomes, vec![CandidateOutcome::Accepted]);
}

// ---------------------------------------------------------------------------
// Duplicate early exit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn three_leading_duplicates_stop_the_scan() {
    let items: Vec<String> = (1..=5)
        .map(|i| item(&format!("Saham berita {i}"), &format!("/news/u{i}"), ""))
        .collect();
    let html = listing(&items);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::with_existing_urls(&[
        "https://news.example.com/news/u1",
        "https://news.example.com/news/u2",
        "https://news.example.com/news/u3",
    ]);

    let extraction = extract(
        &mut page,
        &test_descriptor(),
        "BBCA",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert!(extraction.early_exit);
    assert_eq!(
        extraction.outcomes,
        vec![CandidateOutcome::Skipped(SkipReason::Duplicate); 3]
    );
    assert!(extraction.records.is_empty());
    // Containers 4 and 5 were never examined.
    assert_eq!(store.exists_calls.load(std::sync::atomic::Ordering::SeqCst), 3);
}

#[tokio::test]
async fn duplicate_count_is_cumulative_not_consecutive() {
    // Duplicates at positions 1, 3 and 5; new articles in between. The
    // counter never resets, so the third duplicate ends the scan and the
    // sixth container is never reached.
    let items: Vec<String> = (1..=6)
        .map(|i| item(&format!("Saham berita {i}"), &format!("/news/u{i}"), ""))
        .collect();
    let html = listing(&items);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::with_existing_urls(&[
        "https://news.example.com/news/u1",
        "https://news.example.com/news/u3",
        "https://news.example.com/news/u5",
    ]);

    let extraction = extract(
        &mut page,
        &test_descriptor(),
        "BBCA",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert!(extraction.early_exit);
    assert_eq!(
        extraction.outcomes,
        vec![
            CandidateOutcome::Skipped(SkipReason::Duplicate),
            CandidateOutcome::Accepted,
            CandidateOutcome::Skipped(SkipReason::Duplicate),
            CandidateOutcome::Accepted,
            CandidateOutcome::Skipped(SkipReason::Duplicate),
        ]
    );
    assert_eq!(extraction.records.len(), 2);
    assert_eq!(store.exists_calls.load(std::sync::atomic::Ordering::SeqCst), 5);
}

#[tokio::test]
async fn container_list_is_capped() {
    let items: Vec<String> = (1..=25)
        .map(|i| item(&format!("Saham berita {i}"), &format!("/news/c{i}"), ""))
        .collect();
    let html = listing(&items);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::default();

    let extraction = extract(
        &mut page,
        &test_descriptor(),
        "BBCA",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert_eq!(extraction.outcomes.len(), 20);
    assert_eq!(extraction.records.len(), 20);
}

// ---------------------------------------------------------------------------
// Images and scroll
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lazy_attribute_takes_precedence_over_src() {
    let html = listing(&[item(
        "Saham dengan gambar",
        "/news/img1",
        r#"<img data-src="https://img.example.com/lazy.jpg" src="https://img.example.com/eager.jpg">"#,
    )]);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::default();

    let extraction = extract(
        &mut page,
        &test_descriptor(),
        "BBCA",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert_eq!(
        extraction.records[0].image_url.as_deref(),
        Some("https://img.example.com/lazy.jpg")
    );
}

#[tokio::test]
async fn plain_src_is_the_fallback() {
    let html = listing(&[item(
        "Saham dengan gambar",
        "/news/img2",
        r#"<img src="https://img.example.com/eager.jpg">"#,
    )]);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::default();

    let extraction = extract(
        &mut page,
        &test_descriptor(),
        "BBCA",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert_eq!(
        extraction.records[0].image_url.as_deref(),
        Some("https://img.example.com/eager.jpg")
    );
}

#[tokio::test]
async fn placeholder_images_resolve_to_none() {
    let html = listing(&[item(
        "Saham tanpa gambar asli",
        "/news/img3",
        r#"<img data-src="https://img.example.com/Placeholder-wide.png">"#,
    )]);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::default();

    let extraction = extract(
        &mut page,
        &test_descriptor(),
        "BBCA",
        &store,
        &ExtractOptions::default(),
    )
    .await;

    assert!(extraction.records[0].image_url.is_none());
}

#[tokio::test]
async fn scroll_trigger_runs_before_querying() {
    let mut descriptor = test_descriptor();
    descriptor.requires_scroll = true;

    let html = listing(&[item("Saham dengan scroll", "/news/scroll", "")]);
    let mut page = StaticPage::from_html(&html);
    let store = MemoryStore::default();

    extract(&mut page, &descriptor, "BBCA", &store, &ExtractOptions::default()).await;

    assert_eq!(
        page.scroll_calls,
        vec![ScrollTarget::Bottom, ScrollTarget::Top]
    );
}
