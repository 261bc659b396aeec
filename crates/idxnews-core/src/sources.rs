//! Static registry of news-source extraction descriptors.
//!
//! Each IDX news source exposes a per-ticker tag page; the descriptor
//! records the CSS selectors needed to walk its article listing. Selector
//! fields are `Option` because layouts differ: a `None` link selector means
//! the article container element is itself the anchor, and a `None`
//! date/summary/image selector means that field simply does not exist on
//! the tag page.

/// Extraction rules for one news source's ticker tag page.
#[derive(Debug, Clone)]
pub struct SiteDescriptor {
    /// Stable source id persisted with each article (e.g. `"kontan"`).
    pub id: &'static str,
    /// Human-readable source name, used in logs only.
    pub name: &'static str,
    /// Listing-URL template with a `{symbol}` slot (lowercased symbol).
    pub url_pattern: &'static str,
    /// Selector matching one article container per listing entry.
    pub article_selector: &'static str,
    /// Selector for the article title, scoped to the container.
    pub title_selector: &'static str,
    /// Selector for the link anchor; `None` when the container is the anchor.
    pub link_selector: Option<&'static str>,
    /// Selector for the publication-date text, if the tag page shows one.
    pub date_selector: Option<&'static str>,
    /// Selector for the article summary, if the tag page shows one.
    pub summary_selector: Option<&'static str>,
    /// Selector for the thumbnail image, if the tag page shows one.
    pub image_selector: Option<&'static str>,
    /// Scroll to the bottom and back before querying, to trigger lazy
    /// image loading.
    pub requires_scroll: bool,
    /// Lazy-load attributes tried in order before falling back to `src`.
    pub lazy_image_attrs: &'static [&'static str],
    /// Replacement base for root-relative links, for sources whose tag-page
    /// domain differs from the canonical article domain.
    pub link_base_override: Option<&'static str>,
}

impl SiteDescriptor {
    /// Render the listing URL for a ticker symbol.
    #[must_use]
    pub fn listing_url(&self, symbol: &str) -> String {
        self.url_pattern
            .replace("{symbol}", &symbol.to_lowercase())
    }
}

const LAZY_IMAGE_ATTRS: &[&str] = &["data-src", "data-lazy", "data-original"];

/// All configured sources, in the order they are scraped.
static DESCRIPTORS: &[SiteDescriptor] = &[
    SiteDescriptor {
        id: "kontan",
        name: "Kontan",
        url_pattern: "https://www.kontan.co.id/tag/{symbol}",
        article_selector: "#load_berita > li",
        title_selector: ".sp-hl h1 a",
        link_selector: Some(".sp-hl h1 a"),
        date_selector: Some(".font-gray"),
        summary_selector: None,
        image_selector: Some("div.pic img"),
        requires_scroll: false,
        lazy_image_attrs: LAZY_IMAGE_ATTRS,
        // Article links resolve against the www subdomain, not the tag page.
        link_base_override: Some("https://www.kontan.co.id"),
    },
    SiteDescriptor {
        id: "cnbc",
        name: "CNBC Indonesia",
        url_pattern: "https://www.cnbcindonesia.com/tag/{symbol}",
        article_selector: "article",
        title_selector: "h2",
        link_selector: Some("a"),
        date_selector: Some("span > span:last-child"),
        summary_selector: None,
        image_selector: Some("img"),
        requires_scroll: false,
        lazy_image_attrs: LAZY_IMAGE_ATTRS,
        link_base_override: None,
    },
    SiteDescriptor {
        id: "investor",
        name: "Investor.id",
        url_pattern: "https://investor.id/tag/{symbol}",
        article_selector: ".row.mb-4.position-relative",
        title_selector: "h4.my-3",
        link_selector: Some("a.stretched-link"),
        date_selector: Some("span.text-muted.small"),
        summary_selector: Some("span.text-muted.text-truncate-2-lines"),
        image_selector: Some(".col-4 img"),
        requires_scroll: false,
        lazy_image_attrs: LAZY_IMAGE_ATTRS,
        // Absolute resolution uses the bare domain, not www.
        link_base_override: Some("https://investor.id"),
    },
    SiteDescriptor {
        id: "idxchannel",
        name: "IDX Channel",
        url_pattern: "https://www.idxchannel.com/tag/{symbol}",
        article_selector: ".bt-con",
        title_selector: "h2.list-berita-baru a",
        link_selector: Some("h2.list-berita-baru a"),
        date_selector: Some(".mh-clock"),
        summary_selector: None,
        image_selector: Some("img"),
        requires_scroll: true,
        lazy_image_attrs: LAZY_IMAGE_ATTRS,
        link_base_override: None,
    },
    SiteDescriptor {
        id: "kompas",
        name: "Kompas",
        url_pattern: "https://www.kompas.com/tag/{symbol}",
        article_selector: "a.article-link",
        title_selector: "h2.articleTitle",
        link_selector: None,
        date_selector: Some(".articlePost-date"),
        summary_selector: None,
        image_selector: Some(".articleItem-img img"),
        requires_scroll: false,
        lazy_image_attrs: LAZY_IMAGE_ATTRS,
        link_base_override: None,
    },
];

/// All configured source descriptors in scrape order.
#[must_use]
pub fn descriptors() -> &'static [SiteDescriptor] {
    DESCRIPTORS
}

/// Look up a descriptor by source id.
#[must_use]
pub fn descriptor(id: &str) -> Option<&'static SiteDescriptor> {
    DESCRIPTORS.iter().find(|d| d.id == id)
}
