//! Workspace-level cache for built style documents.
//!
//! Several compilations can resolve against the same archive entries at
//! once; each entry must be built exactly once and shared afterwards.

use crate::document::CssDocument;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use veld_shared::problems::Problems;

/// Cache key: the owning archive (when the document came out of one) plus
/// the file name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    archive: Option<String>,
    filename: String,
}

impl CacheKey {
    /// Key for an entry inside a library archive.
    #[must_use]
    pub fn for_archive_entry(archive: &str, filename: &str) -> Self {
        Self {
            archive: Some(archive.to_string()),
            filename: filename.to_string(),
        }
    }

    /// Key for a loose style file.
    #[must_use]
    pub fn for_file(filename: &str) -> Self {
        Self {
            archive: None,
            filename: filename.to_string(),
        }
    }
}

type Slot = (Arc<CssDocument>, Problems);

/// Concurrent map of built documents with at-most-once population per key.
///
/// The map lock is only held while looking up the slot; the build closure
/// runs outside it, so a slow build never blocks unrelated keys. Two
/// callers racing on one uncached key both end up with the same shared
/// document, and whichever caller populated the slot reports the build
/// problems exactly once.
#[derive(Default)]
pub struct CssDocumentCache {
    entries: Mutex<HashMap<CacheKey, Arc<OnceLock<Slot>>>>,
}

impl CssDocumentCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &self,
        key: CacheKey,
        problems: &mut Problems,
        build: impl FnOnce(&mut Problems) -> CssDocument,
    ) -> Arc<CssDocument> {
        let slot = {
            let mut entries = self.entries.lock();
            Arc::clone(entries.entry(key).or_default())
        };

        let mut populated = false;
        let (document, build_problems) = slot.get_or_init(|| {
            populated = true;
            let mut local = Problems::new();
            let document = build(&mut local);
            (Arc::new(document), local)
        });
        if populated {
            problems.extend(build_problems.iter().cloned());
        }
        Arc::clone(document)
    }

    /// The document for a key, when it has already been built.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Arc<CssDocument>> {
        let entries = self.entries.lock();
        entries.get(key).and_then(|slot| slot.get()).map(|(document, _)| Arc::clone(document))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use veld_shared::location::SourceSpan;
    use veld_shared::problems::{Problem, ProblemKind};

    #[test]
    fn builds_once_and_shares_the_document() {
        let cache = CssDocumentCache::new();
        let builds = AtomicUsize::new(0);
        let key = CacheKey::for_archive_entry("/libs/controls.vlib", "defaults.css");

        let mut problems = Problems::new();
        let first = cache.get_or_build(key.clone(), &mut problems, |_| {
            builds.fetch_add(1, Ordering::SeqCst);
            CssDocument::empty()
        });
        let second = cache.get_or_build(key.clone(), &mut problems, |_| {
            builds.fetch_add(1, Ordering::SeqCst);
            CssDocument::empty()
        });

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &cache.get(&key).expect("entry should be cached")));
    }

    #[test]
    fn build_problems_are_reported_once() {
        let cache = CssDocumentCache::new();
        let key = CacheKey::for_archive_entry("/libs/theme.vlib", "halo.css");

        let mut problems = Problems::new();
        cache.get_or_build(key.clone(), &mut problems, |problems| {
            problems.push(Problem::new(
                ProblemKind::ParseProblem {
                    message: "bad entry".to_string(),
                },
                &SourceSpan::synthetic(),
            ));
            CssDocument::empty()
        });
        assert_eq!(problems.len(), 1);

        let mut later = Problems::new();
        cache.get_or_build(key, &mut later, |_| CssDocument::empty());
        assert!(later.is_empty());
    }

    #[test]
    fn racing_callers_share_one_build() {
        let cache = CssDocumentCache::new();
        let builds = AtomicUsize::new(0);
        let key = CacheKey::for_archive_entry("/libs/controls.vlib", "defaults.css");

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        let mut problems = Problems::new();
                        cache.get_or_build(key.clone(), &mut problems, |_| {
                            builds.fetch_add(1, Ordering::SeqCst);
                            CssDocument::empty()
                        })
                    })
                })
                .collect();

            let documents: Vec<_> = handles.into_iter().map(|h| h.join().expect("thread panicked")).collect();
            for document in &documents {
                assert!(Arc::ptr_eq(document, &documents[0]));
            }
        });

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_keys_do_not_collide() {
        let cache = CssDocumentCache::new();
        assert!(cache.is_empty());
        let mut problems = Problems::new();

        let a = cache.get_or_build(
            CacheKey::for_archive_entry("/libs/a.vlib", "defaults.css"),
            &mut problems,
            |_| CssDocument::empty(),
        );
        let b = cache.get_or_build(
            CacheKey::for_archive_entry("/libs/b.vlib", "defaults.css"),
            &mut problems,
            |_| CssDocument::empty(),
        );

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }
}
