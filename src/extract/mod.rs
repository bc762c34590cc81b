// src/extract/mod.rs
//
// Field extraction: one post container element → one PostRecord.
//
// Every field is a prioritized probe — try the selectors in order, take
// the first structural match, leave the field absent otherwise. Nothing
// in here fails: a gutted element still yields a record (which the
// caller drops if the URN is missing).

pub mod selectors;

use scraper::{ElementRef, Html};

use crate::config::consts::POST_URL_TEMPLATE;
use crate::core::sanitize::{normalize_ws, strip_badge_bullet, strip_see_more};
use crate::record::PostRecord;
use selectors::{Compiled, TIME_WORDS, compiled};

fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

fn nonempty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn attr_of(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value().attr(name).map(str::to_string).and_then(nonempty)
}

/// Extract one post. Infallible by design: anything not found stays absent.
pub fn extract_post(el: ElementRef<'_>, r#gen: &Compiled) -> PostRecord {
    let urn = el.value().attr(r#gen.urn_attr).unwrap_or_default().to_string();
    let mut rec = PostRecord::with_urn(urn);

    // Ghost cards render the container without content; keep the urn.
    let Some(content) = el.select(&r#gen.content).next() else {
        return rec;
    };

    // Author link: personal profile first, company page second. A card
    // with no personal-profile link is a company post, link or not.
    let mut author_link = content.select(&r#gen.person_link).next();
    if author_link.is_none() {
        rec.is_company_post = true;
        author_link = content.select(&r#gen.company_link).next();
    }
    rec.author_profile_url = author_link.and_then(|a| attr_of(a, "href"));

    // Name and avatar ride on the same <img>.
    if let Some(img) = r#gen.avatar.iter().find_map(|s| content.select(s).next()) {
        rec.author_name = attr_of(img, "alt");
        rec.author_profile_image_url = attr_of(img, "src");
    }

    rec.author_headline = content
        .select(&r#gen.headline)
        .next()
        .and_then(|e| nonempty(text_of(e)));

    // Connection badge only renders for personal authors.
    rec.connection_degree = content
        .select(&r#gen.badge)
        .next()
        .and_then(|e| nonempty(strip_badge_bullet(&text_of(e))));

    // First metadata span that talks about time is the timestamp.
    rec.posted_time = content
        .select(&r#gen.metadata_spans)
        .map(text_of)
        .find(|t| TIME_WORDS.iter().any(|w| t.contains(w)));

    // Permalink anchor, else synthesize from the URN.
    rec.post_url = content
        .select(&r#gen.permalink)
        .next()
        .and_then(|a| attr_of(a, "href"))
        .or_else(|| {
            if rec.urn.is_empty() {
                None
            } else {
                Some(join!(POST_URL_TEMPLATE, &rec.urn))
            }
        });

    rec.post_text = content
        .select(&r#gen.summary)
        .next()
        .and_then(|e| nonempty(strip_see_more(&text_of(e))));

    if let Some(img) = content.select(&r#gen.image).next() {
        rec.has_image = true;
        rec.post_image_url = attr_of(img, "src");
        rec.post_image_alt = attr_of(img, "alt");
    }
    rec.has_video = content.select(&r#gen.video).next().is_some();

    if let Some(social) = content.select(&r#gen.counts).next() {
        rec.reactions = social
            .select(&r#gen.reactions)
            .next()
            .and_then(|e| nonempty(text_of(e)));
        rec.comments = social
            .select(&r#gen.comments)
            .next()
            .and_then(|e| nonempty(text_of(e)));
    }

    rec
}

/// First generation whose container selector matches this document.
pub fn pick_generation(doc: &Html) -> Option<&'static Compiled> {
    compiled()
        .iter()
        .find(|r#gen| doc.select(&r#gen.container).next().is_some())
}

/// Number of post containers currently present in a snapshot.
pub fn count_posts(html: &str) -> usize {
    let doc = Html::parse_document(html);
    match pick_generation(&doc) {
        Some(r#gen) => doc.select(&r#gen.container).count(),
        None => 0,
    }
}

/// Extract every post visible in a snapshot, dropping records without an
/// identifier. An unrecognized page yields an empty batch, not an error:
/// a later snapshot may still match.
pub fn collect_visible(html: &str) -> Vec<PostRecord> {
    let doc = Html::parse_document(html);
    let Some(r#gen) = pick_generation(&doc) else {
        logd!("Extract: no known post container matched this snapshot");
        return Vec::new();
    };

    let records: Vec<PostRecord> = doc
        .select(&r#gen.container)
        .map(|el| extract_post(el, r#gen))
        .filter(PostRecord::has_identifier)
        .collect();

    logd!("Extract: gen={} posts={}", r#gen.name, records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERSONAL_POST: &str = r#"
    <div data-chameleon-result-urn="urn:li:activity:111">
      <div class="entity-result__content">
        <a href="https://example.com/in/jane-doe/">Jane Doe</a>
        <img class="presence-entity__image" alt="Jane Doe" src="https://cdn.example.com/jane.jpg">
        <div class="entity-result__primary-subtitle">Staff Engineer</div>
        <div class="entity-result__badge-text"> • 2nd </div>
        <div class="entity-result__metadata">
          <span>Promoted</span>
          <span>3 weeks ago</span>
        </div>
        <p class="entity-result__summary">Shipping is a feature …see more</p>
        <div class="social-details-social-counts">
          <span aria-label="1,204 reactions">1.2K</span>
          <span aria-label="87 comments">87 comments</span>
        </div>
      </div>
    </div>"#;

    const COMPANY_POST: &str = r#"
    <div data-chameleon-result-urn="urn:li:activity:222">
      <div class="entity-result__content">
        <a href="https://example.com/company/acme/">Acme</a>
        <div class="entity-result__image"><img alt="Acme logo" src="https://cdn.example.com/acme.png"></div>
        <a href="https://example.com/feed/update/urn:li:activity:222/">Open</a>
        <span data-test-icon="video-icon"></span>
      </div>
    </div>"#;

    fn one(html: &str) -> PostRecord {
        let posts = collect_visible(html);
        assert_eq!(posts.len(), 1);
        posts.into_iter().next().unwrap()
    }

    #[test]
    fn personal_post_fields() {
        let rec = one(PERSONAL_POST);
        assert_eq!(rec.urn, "urn:li:activity:111");
        assert!(!rec.is_company_post);
        assert_eq!(rec.author_name.as_deref(), Some("Jane Doe"));
        assert_eq!(rec.author_headline.as_deref(), Some("Staff Engineer"));
        assert_eq!(rec.connection_degree.as_deref(), Some("2nd"));
        assert_eq!(rec.posted_time.as_deref(), Some("3 weeks ago"));
        assert_eq!(rec.post_text.as_deref(), Some("Shipping is a feature"));
        assert_eq!(rec.reactions.as_deref(), Some("1.2K"));
        assert_eq!(rec.comments.as_deref(), Some("87 comments"));
        // No permalink anchor → synthesized from the urn.
        assert_eq!(
            rec.post_url.as_deref(),
            Some("https://www.linkedin.com/feed/update/urn:li:activity:111")
        );
        // Presence avatar is not a result image, so no media flag.
        assert!(!rec.has_image);
        assert!(!rec.has_video);
    }

    #[test]
    fn company_post_fields() {
        let rec = one(COMPANY_POST);
        assert!(rec.is_company_post);
        assert_eq!(
            rec.author_profile_url.as_deref(),
            Some("https://example.com/company/acme/")
        );
        // Avatar fallback: generic result image.
        assert_eq!(rec.author_name.as_deref(), Some("Acme logo"));
        assert_eq!(
            rec.post_url.as_deref(),
            Some("https://example.com/feed/update/urn:li:activity:222/")
        );
        assert!(rec.has_image);
        assert_eq!(rec.post_image_alt.as_deref(), Some("Acme logo"));
        assert!(rec.has_video);
        assert!(rec.connection_degree.is_none());
        assert!(rec.posted_time.is_none());
    }

    #[test]
    fn bare_container_keeps_only_urn() {
        let rec = one(r#"<div data-chameleon-result-urn="urn:li:activity:333"></div>"#);
        assert_eq!(rec.urn, "urn:li:activity:333");
        assert!(rec.author_name.is_none());
        assert!(rec.post_url.is_none());
        assert!(!rec.has_image && !rec.has_video);
    }

    #[test]
    fn author_without_a_profile_link_reads_as_company() {
        let rec = one(
            r#"<div data-chameleon-result-urn="urn:li:activity:555">
              <div class="entity-result__content"><p class="entity-result__summary">text</p></div>
            </div>"#,
        );
        assert!(rec.is_company_post);
        assert!(rec.author_profile_url.is_none());
    }

    #[test]
    fn missing_urn_is_dropped() {
        let html = r#"
        <div data-chameleon-result-urn="">
          <div class="entity-result__content"><p class="entity-result__summary">x</p></div>
        </div>
        <div><div class="entity-result__content"></div></div>"#;
        assert!(collect_visible(html).is_empty());
    }

    #[test]
    fn unknown_markup_yields_empty_batch() {
        assert!(collect_visible("<html><body><p>nothing here</p></body></html>").is_empty());
        assert_eq!(count_posts("<p>nope</p>"), 0);
    }

    #[test]
    fn legacy_generation_is_a_fallback() {
        let html = r#"
        <div class="feed-shared-update-v2" data-urn="urn:li:activity:444">
          <div class="feed-shared-update-v2__description-wrapper">
            <a href="https://example.com/in/old-friend/">Old Friend</a>
            <img class="update-components-actor__avatar-image" alt="Old Friend" src="of.jpg">
            <div class="update-components-actor__sub-description"><span>2d ago</span></div>
            <span class="update-components-text">Legacy markup still works</span>
          </div>
        </div>"#;
        let rec = one(html);
        assert_eq!(rec.urn, "urn:li:activity:444");
        assert_eq!(rec.author_name.as_deref(), Some("Old Friend"));
        assert_eq!(rec.posted_time.as_deref(), Some("2d ago"));
        assert_eq!(rec.post_text.as_deref(), Some("Legacy markup still works"));
        assert_eq!(count_posts(html), 1);
    }

    #[test]
    fn current_generation_wins_when_both_match() {
        let html = join!(
            PERSONAL_POST,
            r#"<div class="feed-shared-update-v2" data-urn="urn:li:activity:999"></div>"#
        );
        let posts = collect_visible(&html);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].urn, "urn:li:activity:111");
    }
}
