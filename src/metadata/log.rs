use std::collections::VecDeque;

use crate::metadata::MetadataRevision;

/// Revisions of a stream's metadata, oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataLog {
    revisions: VecDeque<MetadataRevision>,
}

impl MetadataLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a revision as the newest one.
    pub fn push(&mut self, revision: MetadataRevision) {
        self.revisions.push_back(revision);
    }

    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    /// The newest revision.
    pub fn current(&self) -> Option<&MetadataRevision> {
        self.revisions.back()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &MetadataRevision> {
        self.revisions.iter()
    }

    /// Drops every revision except the newest and returns it.
    pub fn skip_to_latest(&mut self) -> Option<&MetadataRevision> {
        let keep_from = self.revisions.len().saturating_sub(1);
        self.revisions.drain(..keep_from);
        self.revisions.back()
    }

    /// Removes the newest revision and returns it by value.
    pub fn pop_latest(&mut self) -> Option<MetadataRevision> {
        self.revisions.pop_back()
    }

    /// Collapses the log to its newest revision and takes ownership of it.
    pub fn into_latest(mut self) -> Option<MetadataRevision> {
        self.revisions.pop_back()
    }
}

impl FromIterator<MetadataRevision> for MetadataLog {
    fn from_iter<I: IntoIterator<Item = MetadataRevision>>(iter: I) -> Self {
        MetadataLog {
            revisions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{StandardTagKey, Tag, Value, Visual};

    fn titled(title: &str) -> MetadataRevision {
        MetadataRevision::new().with_tag(Tag::new(
            Some(StandardTagKey::TrackTitle),
            "TITLE",
            Value::String(title.to_string()),
        ))
    }

    fn title_of(rev: &MetadataRevision) -> String {
        rev.get(StandardTagKey::TrackTitle).unwrap().value.to_string()
    }

    #[test]
    fn test_current_is_newest() {
        let log: MetadataLog = vec![titled("old"), titled("new")].into_iter().collect();
        assert_eq!(log.len(), 2);
        assert_eq!(title_of(log.current().unwrap()), "new");
    }

    #[test]
    fn test_skip_to_latest_collapses() {
        let mut log: MetadataLog = vec![titled("a"), titled("b"), titled("c")]
            .into_iter()
            .collect();

        assert_eq!(title_of(log.skip_to_latest().unwrap()), "c");
        assert_eq!(log.len(), 1);
        // Idempotent once collapsed.
        assert_eq!(title_of(log.skip_to_latest().unwrap()), "c");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_skip_to_latest_on_empty() {
        let mut log = MetadataLog::new();
        assert!(log.skip_to_latest().is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn test_pop_latest_removes_newest() {
        let mut log: MetadataLog = vec![titled("a"), titled("b")].into_iter().collect();

        assert_eq!(title_of(&log.pop_latest().unwrap()), "b");
        assert_eq!(title_of(log.current().unwrap()), "a");
        assert_eq!(title_of(&log.pop_latest().unwrap()), "a");
        assert!(log.pop_latest().is_none());
    }

    #[test]
    fn test_into_latest_keeps_visual_allocation() {
        let art = Visual {
            media_type: "image/png".to_string(),
            dimensions: None,
            usage: None,
            tags: Vec::new(),
            data: vec![7u8; 4096].into_boxed_slice(),
        };
        let ptr = art.data.as_ptr();

        let mut log = MetadataLog::new();
        log.push(titled("first"));
        log.push(titled("second").with_visual(art));

        let latest = log.into_latest().unwrap();
        assert_eq!(title_of(&latest), "second");

        let parts = latest.into_parts();
        assert_eq!(parts.visuals[0].data.as_ptr(), ptr);
    }

    #[test]
    fn test_into_latest_on_empty() {
        assert!(MetadataLog::new().into_latest().is_none());
    }
}
