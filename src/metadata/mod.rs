//! Decoded audio metadata revisions with ownership-transfer accessors.
//!
//! A decoder may emit several revisions for one stream; only the newest one
//! matters to a consumer. [MetadataLog::into_latest] and
//! [MetadataRevision::into_parts] let the consumer keep the newest tags and
//! cover art without cloning large attachment buffers.

pub mod log;
pub mod revision;

pub use log::MetadataLog;
pub use revision::{
    MetadataRevision, RevisionParts, Size, StandardTagKey, StandardVisualKey, Tag, Value,
    VendorData, Visual,
};
