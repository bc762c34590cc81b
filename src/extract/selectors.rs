// src/extract/selectors.rs
//
// Selector tables for the saved-posts feed.
//
// The site has shipped two incompatible markup generations for the same
// list. Each generation is a full table; `compiled()` hands back both,
// newest first, and the caller picks the first one whose post container
// matches the document. Field rules inside a set are ordered fallback
// chains: first structural match wins.

use std::sync::LazyLock;

use scraper::Selector;

/// Words that mark a metadata span as the relative timestamp.
pub const TIME_WORDS: &[&str] = &["ago", "day", "week", "month", "year", "hour", "minute"];

pub struct SelectorSet {
    pub name: &'static str,

    /// Post container, and the attribute on it carrying the URN.
    pub container: &'static str,
    pub urn_attr: &'static str,

    /// Wrapper for everything else; a post without it yields a bare record.
    pub content: &'static str,

    /// Personal-profile link first, company-page link second.
    pub person_link: &'static str,
    pub company_link: &'static str,

    /// Avatar fallback chain; name comes from `alt`, image from `src`.
    pub avatar: &'static [&'static str],

    pub headline: &'static str,
    pub badge: &'static str,
    pub metadata_spans: &'static str,
    pub permalink: &'static str,
    pub summary: &'static str,
    pub image: &'static str,
    pub video: &'static str,

    /// Engagement region and its ARIA-labelled counters.
    pub counts: &'static str,
    pub reactions: &'static str,
    pub comments: &'static str,
}

/// Current markup (entity-result era).
pub const CURRENT: SelectorSet = SelectorSet {
    name: "entity-result",
    container: "[data-chameleon-result-urn]",
    urn_attr: "data-chameleon-result-urn",
    content: ".entity-result__content",
    person_link: r#"a[href*="/in/"]"#,
    company_link: r#"a[href*="/company/"]"#,
    avatar: &["img.presence-entity__image", ".entity-result__image img"],
    headline: ".entity-result__primary-subtitle",
    badge: ".entity-result__badge-text",
    metadata_spans: ".entity-result__metadata span",
    permalink: r#"a[href*="/feed/update/"], a[href*="/posts/"]"#,
    summary: ".entity-result__summary, .entity-result__content-summary",
    image: r#".entity-result__image img, img[data-ghost-classes*="entity-result"]"#,
    video: r#"video, [data-test-icon="video-icon"]"#,
    counts: ".social-details-social-counts",
    reactions: r#"[aria-label*="reaction"]"#,
    comments: r#"[aria-label*="comment"]"#,
};

/// Previous markup (feed-update era). Consulted only when `CURRENT`
/// matches no container in a snapshot.
pub const LEGACY: SelectorSet = SelectorSet {
    name: "feed-update",
    container: "div.feed-shared-update-v2[data-urn]",
    urn_attr: "data-urn",
    content: ".feed-shared-update-v2__content-wrapper, .feed-shared-update-v2__description-wrapper",
    person_link: r#"a[href*="/in/"]"#,
    company_link: r#"a[href*="/company/"]"#,
    avatar: &[
        "img.update-components-actor__avatar-image",
        ".ivm-view-attr__img-wrapper img",
    ],
    headline: ".update-components-actor__description",
    badge: ".update-components-actor__supplementary-actor-info",
    metadata_spans: ".update-components-actor__sub-description span",
    permalink: r#"a[href*="/feed/update/"], a[href*="/posts/"]"#,
    summary: ".update-components-text, .feed-shared-inline-show-more-text",
    image: ".update-components-image img",
    video: "video, .update-components-linkedin-video",
    counts: ".social-details-social-counts",
    reactions: r#"[aria-label*="reaction"]"#,
    comments: r#"[aria-label*="comment"]"#,
};

/// A selector set compiled for matching.
pub struct Compiled {
    pub name: &'static str,
    pub urn_attr: &'static str,
    pub container: Selector,
    pub content: Selector,
    pub person_link: Selector,
    pub company_link: Selector,
    pub avatar: Vec<Selector>,
    pub headline: Selector,
    pub badge: Selector,
    pub metadata_spans: Selector,
    pub permalink: Selector,
    pub summary: Selector,
    pub image: Selector,
    pub video: Selector,
    pub counts: Selector,
    pub reactions: Selector,
    pub comments: Selector,
}

fn sel(src: &'static str) -> Selector {
    // All inputs are the literal tables above.
    Selector::parse(src).expect("selector table entry must parse")
}

impl Compiled {
    fn from(set: &SelectorSet) -> Self {
        Self {
            name: set.name,
            urn_attr: set.urn_attr,
            container: sel(set.container),
            content: sel(set.content),
            person_link: sel(set.person_link),
            company_link: sel(set.company_link),
            avatar: set.avatar.iter().map(|s| sel(s)).collect(),
            headline: sel(set.headline),
            badge: sel(set.badge),
            metadata_spans: sel(set.metadata_spans),
            permalink: sel(set.permalink),
            summary: sel(set.summary),
            image: sel(set.image),
            video: sel(set.video),
            counts: sel(set.counts),
            reactions: sel(set.reactions),
            comments: sel(set.comments),
        }
    }
}

static COMPILED: LazyLock<Vec<Compiled>> =
    LazyLock::new(|| vec![Compiled::from(&CURRENT), Compiled::from(&LEGACY)]);

/// All selector generations, newest first.
pub fn compiled() -> &'static [Compiled] {
    &COMPILED
}
