// src/config/consts.rs

// Local vault
pub const STORE_DIR: &str = ".vault";
pub const COLLECTION_FILE: &str = "collection.json";

// Post URL synthesized from the URN when no permalink anchor is present
pub const POST_URL_TEMPLATE: &str = "https://www.linkedin.com/feed/update/";

// Incremental loading
// The host page gives no load-completion signal, so the run loop polls:
// trigger, settle, recount. Stable count seen STABILITY_THRESHOLD times
// in a row means the feed stopped growing; MAX_COLLECT_ROUNDS is the
// hard ceiling on a page that never stabilizes.
pub const SETTLE_MS: u64 = 1_500;
pub const STABILITY_THRESHOLD: u32 = 3;
pub const MAX_COLLECT_ROUNDS: u32 = 100;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "saved_posts";
