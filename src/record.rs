// src/record.rs
//
// One saved post, as extracted from the saved-posts feed.
//
// Field names on the wire match the JSON the browser bookmarklet-era
// exports used, so old dumps stay loadable. Counts and the posted time
// are kept as the literal on-page text ("1.2K", "3 weeks ago"): the
// source formats are locale-dependent and not worth parsing.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostRecord {
    /// Stable platform identifier (URN). The dedup key; records without
    /// one are never persisted.
    pub urn: String,

    pub author_name: Option<String>,
    pub author_profile_url: Option<String>,
    pub author_profile_image_url: Option<String>,
    pub author_headline: Option<String>,

    /// Author is a company page rather than a person.
    pub is_company_post: bool,
    /// Relationship badge ("1st", "2nd"…); personal authors only.
    pub connection_degree: Option<String>,

    /// Relative timestamp exactly as shown on the page.
    pub posted_time: Option<String>,
    pub post_url: Option<String>,
    pub post_text: Option<String>,

    pub has_image: bool,
    pub post_image_url: Option<String>,
    pub post_image_alt: Option<String>,
    pub has_video: bool,

    pub reactions: Option<String>,
    pub comments: Option<String>,
}

impl PostRecord {
    pub fn with_urn(urn: impl Into<String>) -> Self {
        Self { urn: urn.into(), ..Self::default() }
    }

    /// A record is only worth keeping if it carries the dedup key.
    pub fn has_identifier(&self) -> bool {
        !self.urn.is_empty()
    }
}

/// The persisted vault blob: every deduplicated record plus the time of
/// the last merge. Written as a single JSON file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
    /// Unix seconds of the last successful save.
    pub saved_at_unix: u64,
    pub posts: Vec<PostRecord>,
}

impl Collection {
    pub fn len(&self) -> usize { self.posts.len() }
    pub fn is_empty(&self) -> bool { self.posts.is_empty() }
}
