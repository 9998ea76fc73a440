//! Feed assembly: a thin, time-ordered view over content records.
//!
//! Given a list of content records, the assembler keeps the posts,
//! resolves each body — inline text stays as-is, a body that looks like a
//! manifest identifier is fetched through the distributed data store —
//! and sorts the result newest-first. A record whose body fails to
//! resolve gets a placeholder; one bad record never fails the whole feed.

use std::sync::Arc;

use reef_dds::Retriever;
use reef_types::Cid;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Body text shown when a record's content could not be resolved.
pub const UNAVAILABLE_BODY: &str = "[content unavailable]";

/// The kind of social record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// A post — the only kind that appears in feeds.
    Post,
    /// A comment on existing content.
    Comment,
    /// A profile update.
    Profile,
}

/// A content record as produced by the social layer.
///
/// The `body` is either inline text or the manifest identifier of content
/// stored in the distributed data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Record identifier.
    pub id: String,
    /// Author identifier.
    pub author: String,
    /// Inline body text, or a manifest identifier.
    pub body: String,
    /// What kind of record this is.
    pub kind: RecordKind,
    /// Creation time, nanoseconds since UNIX epoch.
    pub created_at: u64,
    /// Free-form tags.
    pub tags: Vec<String>,
}

/// A single resolved item in a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    /// Identifier of the originating record.
    pub post_id: String,
    /// Author identifier.
    pub author: String,
    /// The resolved post text.
    pub body: String,
    /// Creation time, nanoseconds since UNIX epoch.
    pub timestamp: u64,
    /// Tags carried over from the record.
    pub tags: Vec<String>,
}

/// Heuristic: does this body string look like a manifest identifier?
///
/// A SHA-256 identifier in Base58BTC is 40-50 characters and decodes to
/// exactly 32 bytes. Ordinary post text essentially never satisfies both.
pub fn looks_like_cid(s: &str) -> bool {
    if !(40..=50).contains(&s.len()) {
        return false;
    }
    Cid::parse(s).is_ok()
}

/// Assembles feeds by resolving record bodies through the retriever.
pub struct FeedAssembler {
    retriever: Arc<Retriever>,
}

impl FeedAssembler {
    /// Create an assembler over a retriever.
    pub fn new(retriever: Arc<Retriever>) -> Self {
        Self { retriever }
    }

    /// Build a public feed: posts only, bodies resolved, newest first.
    pub async fn assemble(&self, records: &[ContentRecord]) -> Vec<FeedItem> {
        let mut items = Vec::new();

        for record in records {
            if record.kind != RecordKind::Post {
                continue;
            }

            let body = match Cid::parse(&record.body) {
                Ok(cid) if (40..=50).contains(&record.body.len()) => {
                    match self.retriever.retrieve(&cid).await {
                        Ok((data, _manifest)) => String::from_utf8_lossy(&data).into_owned(),
                        Err(e) => {
                            warn!(post = %record.id, %cid, error = %e, "failed to resolve post body");
                            UNAVAILABLE_BODY.to_string()
                        }
                    }
                }
                _ => record.body.clone(),
            };

            items.push(FeedItem {
                post_id: record.id.clone(),
                author: record.author.clone(),
                body,
                timestamp: record.created_at,
                tags: record.tags.clone(),
            });
        }

        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        debug!(items = items.len(), "assembled feed");
        items
    }
}
