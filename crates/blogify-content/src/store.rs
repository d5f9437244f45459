//! The [`ContentStore`]: the post collection and its write-through
//! persistence.

use std::collections::HashSet;
use std::ops::Deref;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, info, warn};

use blogify_storage::{validate_key, Storage};
use blogify_types::{Post, PostId};

use crate::draft::{PostDraft, PostPatch};
use crate::error::{ContentError, ContentResult};
use crate::seed::seed_posts;

/// Storage key of the post collection record.
pub const DEFAULT_POSTS_KEY: &str = "blogify-blogs";

/// An immutable view of the post collection at one point in time.
///
/// Cloning is cheap (the posts are shared). The revision increases with
/// every successful mutation of the store that produced the snapshot.
#[derive(Clone, Debug)]
pub struct Snapshot {
    revision: u64,
    posts: Arc<Vec<Post>>,
}

impl Snapshot {
    fn new(revision: u64, posts: Vec<Post>) -> Self {
        Self {
            revision,
            posts: Arc::new(posts),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Find a post by id.
    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| &p.id == id)
    }

    /// Returns `true` if both snapshots share the same underlying collection.
    pub fn same_collection(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.posts, &other.posts)
    }
}

impl Deref for Snapshot {
    type Target = [Post];

    fn deref(&self) -> &[Post] {
        &self.posts
    }
}

/// Parse a serialized collection, rejecting duplicate ids.
pub fn decode_posts(raw: &str) -> ContentResult<Vec<Post>> {
    let posts: Vec<Post> =
        serde_json::from_str(raw).map_err(|e| ContentError::Serialization(e.to_string()))?;
    ensure_unique_ids(&posts)?;
    Ok(posts)
}

fn ensure_unique_ids(posts: &[Post]) -> ContentResult<()> {
    let mut seen = HashSet::with_capacity(posts.len());
    for post in posts {
        if !seen.insert(&post.id) {
            return Err(ContentError::DuplicateId(post.id.clone()));
        }
    }
    Ok(())
}

/// Owner of the post collection.
///
/// Every mutator follows the same protocol: compute the new collection on a
/// working copy, return early (writing nothing) on validation failure or an
/// unknown id, otherwise serialize the whole collection, overwrite the
/// storage record, and only then publish the working copy as the current
/// [`Snapshot`]. A failed write therefore leaves both storage and memory at
/// the previous state.
pub struct ContentStore {
    storage: Arc<dyn Storage>,
    key: String,
    state: RwLock<Snapshot>,
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.read_state();
        f.debug_struct("ContentStore")
            .field("key", &self.key)
            .field("revision", &snapshot.revision)
            .field("post_count", &snapshot.posts.len())
            .finish()
    }
}

impl ContentStore {
    /// Open the store over `storage` using [`DEFAULT_POSTS_KEY`].
    pub fn open(storage: Arc<dyn Storage>) -> ContentResult<Self> {
        Self::open_with_key(storage, DEFAULT_POSTS_KEY)
    }

    /// Open the store over `storage` under a custom record key.
    ///
    /// A missing or unparsable record is replaced by the seed dataset, which
    /// is written back immediately. If the record cannot be read at all, the
    /// seed is used in memory only and storage is left untouched until the
    /// next mutation. The fallback is logged but never returned as an error.
    pub fn open_with_key(storage: Arc<dyn Storage>, key: impl Into<String>) -> ContentResult<Self> {
        let key = key.into();
        validate_key(&key)?;

        let (posts, write_back) = Self::load(storage.as_ref(), &key);
        let store = Self {
            storage,
            key,
            state: RwLock::new(Snapshot::new(0, posts)),
        };
        if write_back {
            if let Err(e) = store.persist(&store.read_state().posts) {
                warn!(key = %store.key, error = %e, "could not write seed dataset");
            }
        }
        Ok(store)
    }

    /// The posts to start from, and whether they should be written back.
    fn load(storage: &dyn Storage, key: &str) -> (Vec<Post>, bool) {
        let seed = || (seed_posts(Utc::now()), true);
        match storage.get(key) {
            Ok(Some(raw)) => match decode_posts(&raw) {
                Ok(posts) => {
                    debug!(key, count = posts.len(), "loaded posts");
                    (posts, false)
                }
                Err(e) => {
                    warn!(key, error = %e, "stored posts are corrupt; falling back to seed dataset");
                    seed()
                }
            },
            Ok(None) => {
                debug!(key, "no stored posts; starting from seed dataset");
                seed()
            }
            Err(e) => {
                // The record may still exist and must not be overwritten.
                warn!(key, error = %e, "storage unreadable; using seed dataset in memory only");
                (seed_posts(Utc::now()), false)
            }
        }
    }

    /// The storage key this store writes to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The full collection, newest-created first.
    pub fn list(&self) -> Snapshot {
        self.read_state().clone()
    }

    /// Find a post by id.
    pub fn get(&self, id: &PostId) -> Option<Post> {
        self.read_state().get(id).cloned()
    }

    /// Number of posts in the collection.
    pub fn len(&self) -> usize {
        self.read_state().posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate `draft`, assign a fresh id and `published_at = now`, and
    /// prepend the new post.
    pub fn create(&self, draft: PostDraft) -> ContentResult<Post> {
        let valid = draft.validate()?;
        let post = valid.into_post(PostId::generate(), Utc::now());
        let created = post.clone();
        self.commit(move |posts| {
            if posts.iter().any(|p| p.id == post.id) {
                return Err(ContentError::DuplicateId(post.id));
            }
            posts.insert(0, post);
            Ok(Some(()))
        })?;
        let post = created;
        info!(id = %post.id, title = %post.title, "post created");
        Ok(post)
    }

    /// Merge `patch` into the post with `id` and set `updated_at = now`.
    ///
    /// Returns `Ok(None)` without writing anything if no such post exists.
    pub fn update(&self, id: &PostId, patch: PostPatch) -> ContentResult<Option<Post>> {
        patch.validate()?;
        let updated = self.commit(|posts| {
            let Some(post) = posts.iter_mut().find(|p| &p.id == id) else {
                return Ok(None);
            };
            patch.apply(post, Utc::now());
            Ok(Some(post.clone()))
        })?;
        match &updated {
            Some(_) => info!(%id, "post updated"),
            None => debug!(%id, "update of unknown post ignored"),
        }
        Ok(updated)
    }

    /// Remove the post with `id`. Returns `true` if it existed.
    pub fn delete(&self, id: &PostId) -> ContentResult<bool> {
        let removed = self.commit(|posts| {
            let Some(idx) = posts.iter().position(|p| &p.id == id) else {
                return Ok(None);
            };
            posts.remove(idx);
            Ok(Some(()))
        })?;
        if removed.is_some() {
            info!(%id, "post deleted");
        }
        Ok(removed.is_some())
    }

    /// Add one like. Returns the new count, or `None` for an unknown id.
    ///
    /// Repeated calls keep counting; preventing a viewer from liking twice is
    /// the caller's job.
    pub fn like(&self, id: &PostId) -> ContentResult<Option<u64>> {
        self.bump(id, |post| &mut post.likes)
    }

    /// Add one view. Returns the new count, or `None` for an unknown id.
    pub fn increment_views(&self, id: &PostId) -> ContentResult<Option<u64>> {
        self.bump(id, |post| &mut post.views)
    }

    fn bump(&self, id: &PostId, counter: fn(&mut Post) -> &mut u64) -> ContentResult<Option<u64>> {
        self.commit(|posts| {
            let Some(post) = posts.iter_mut().find(|p| &p.id == id) else {
                return Ok(None);
            };
            let count = counter(post);
            *count = count.saturating_add(1);
            Ok(Some(*count))
        })
    }

    /// Replace the whole collection (import). Counters may go down here and
    /// nowhere else.
    pub fn replace_all(&self, posts: Vec<Post>) -> ContentResult<()> {
        ensure_unique_ids(&posts)?;
        let count = posts.len();
        self.commit(move |current| {
            *current = posts;
            Ok(Some(()))
        })?;
        info!(count, "collection replaced");
        Ok(())
    }

    /// Discard every post and start over from the seed dataset.
    pub fn reset_to_seed(&self) -> ContentResult<()> {
        self.replace_all(seed_posts(Utc::now()))
    }

    /// Re-read the record from storage, picking up whatever another writer
    /// left there.
    pub fn reload(&self) -> Snapshot {
        let (posts, write_back) = Self::load(self.storage.as_ref(), &self.key);
        let mut state = self.write_state();
        *state = Snapshot::new(state.revision + 1, posts);
        if write_back {
            if let Err(e) = self.persist(&state.posts) {
                warn!(key = %self.key, error = %e, "could not write seed dataset");
            }
        }
        state.clone()
    }

    /// The collection serialized exactly as it is persisted.
    pub fn export_json(&self) -> ContentResult<String> {
        serde_json::to_string(&*self.read_state().posts)
            .map_err(|e| ContentError::Serialization(e.to_string()))
    }

    // ---- internals ----

    /// Run `f` against a working copy. `Ok(None)` means "nothing changed" and
    /// skips the write; `Ok(Some(_))` persists the working copy and then
    /// publishes it.
    fn commit<R>(
        &self,
        f: impl FnOnce(&mut Vec<Post>) -> ContentResult<Option<R>>,
    ) -> ContentResult<Option<R>> {
        let mut state = self.write_state();
        let mut working = state.posts.as_ref().clone();
        let Some(result) = f(&mut working)? else {
            return Ok(None);
        };
        self.persist(&working)?;
        *state = Snapshot::new(state.revision + 1, working);
        Ok(Some(result))
    }

    fn persist(&self, posts: &[Post]) -> ContentResult<()> {
        let json =
            serde_json::to_string(posts).map_err(|e| ContentError::Serialization(e.to_string()))?;
        self.storage.set(&self.key, &json)?;
        debug!(key = %self.key, count = posts.len(), bytes = json.len(), "posts persisted");
        Ok(())
    }

    // The snapshot is only ever swapped whole, so a poisoned lock still holds
    // a consistent value.
    fn read_state(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::Field;
    use blogify_storage::{FileStorage, InMemoryStorage, StorageError, StorageResult};
    use blogify_types::Category;

    fn open_seeded() -> (Arc<InMemoryStorage>, ContentStore) {
        let storage = Arc::new(InMemoryStorage::new());
        let store = ContentStore::open(storage.clone()).unwrap();
        (storage, store)
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft::new(title, "An excerpt", "Some content")
            .with_author("Regular User", "a@b.com")
            .with_category(Category::Tutorial)
            .with_tags(["Rust"])
    }

    fn stored(storage: &InMemoryStorage) -> Option<String> {
        storage.get(DEFAULT_POSTS_KEY).unwrap()
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage(InMemoryStorage);

    impl Storage for ReadOnlyStorage {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
        fn remove(&self, key: &str) -> StorageResult<bool> {
            self.0.remove(key)
        }
    }

    /// Storage whose reads always fail while writes go through.
    struct UnreadableStorage(InMemoryStorage);

    impl Storage for UnreadableStorage {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Interrupted,
                "transient read failure",
            )))
        }
        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> StorageResult<bool> {
            self.0.remove(key)
        }
    }

    // ---- Initialization ----

    #[test]
    fn empty_storage_starts_from_seed_and_persists_it() {
        let (storage, store) = open_seeded();
        assert_eq!(store.len(), 7);
        let raw = stored(&storage).expect("seed written");
        assert_eq!(decode_posts(&raw).unwrap(), store.list().posts());
    }

    #[test]
    fn corrupt_record_falls_back_to_seed() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.set(DEFAULT_POSTS_KEY, "{not json").unwrap();
        let store = ContentStore::open(storage.clone()).unwrap();
        assert_eq!(store.len(), 7);
        assert!(decode_posts(&stored(&storage).unwrap()).is_ok());
    }

    #[test]
    fn duplicate_ids_in_record_fall_back_to_seed() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut posts = seed_posts(Utc::now());
        posts[1].id = posts[0].id.clone();
        storage
            .set(DEFAULT_POSTS_KEY, &serde_json::to_string(&posts).unwrap())
            .unwrap();
        let store = ContentStore::open(storage).unwrap();
        assert_eq!(store.get(&PostId::from("2")).unwrap().title, "The Art of UI/UX Design");
    }

    #[test]
    fn read_failure_uses_seed_without_overwriting_record() {
        let inner = InMemoryStorage::new();
        inner.set(DEFAULT_POSTS_KEY, "[\"kept as is\"]").unwrap();
        let storage = Arc::new(UnreadableStorage(inner));

        let store = ContentStore::open(storage.clone()).unwrap();
        assert_eq!(store.len(), 7);
        assert_eq!(
            storage.0.get(DEFAULT_POSTS_KEY).unwrap().as_deref(),
            Some("[\"kept as is\"]")
        );

        store.reload();
        assert_eq!(
            storage.0.get(DEFAULT_POSTS_KEY).unwrap().as_deref(),
            Some("[\"kept as is\"]")
        );
    }

    #[test]
    fn unwritable_storage_still_opens() {
        let store = ContentStore::open(Arc::new(ReadOnlyStorage(InMemoryStorage::new()))).unwrap();
        assert_eq!(store.len(), 7);
    }

    #[test]
    fn invalid_key_is_rejected() {
        let err = ContentStore::open_with_key(Arc::new(InMemoryStorage::new()), "bad/key")
            .unwrap_err();
        assert!(matches!(err, ContentError::Storage(StorageError::InvalidKey { .. })));
    }

    // ---- create ----

    #[test]
    fn create_prepends_with_zero_counters_and_fresh_id() {
        let (_storage, store) = open_seeded();
        let before = store.list();

        let post = store.create(draft("Hello Rust")).unwrap();

        let after = store.list();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after[0], post);
        assert_eq!(post.likes, 0);
        assert_eq!(post.views, 0);
        assert!(post.updated_at.is_none());
        assert!(before.iter().all(|p| p.id != post.id));
        assert!(after.revision() > before.revision());
    }

    #[test]
    fn create_persists_whole_collection() {
        let (storage, store) = open_seeded();
        let post = store.create(draft("Persisted")).unwrap();
        let on_disk = decode_posts(&stored(&storage).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 8);
        assert_eq!(on_disk[0].id, post.id);
    }

    #[test]
    fn create_missing_fields_mutates_nothing() {
        let (storage, store) = open_seeded();
        let raw_before = stored(&storage);
        let snapshot_before = store.list();

        for bad in [
            PostDraft::new("", "e", "c"),
            PostDraft::new("t", "e", ""),
            PostDraft::new("t", "", "c"),
        ] {
            let err = store.create(bad).unwrap_err();
            assert!(matches!(err, ContentError::Validation(_)));
        }

        assert_eq!(store.list().posts(), snapshot_before.posts());
        assert_eq!(store.list().revision(), snapshot_before.revision());
        assert_eq!(stored(&storage), raw_before);
    }

    #[test]
    fn create_reports_which_fields_failed() {
        let (_storage, store) = open_seeded();
        match store.create(PostDraft::new("", "", "body")) {
            Err(ContentError::Validation(errors)) => {
                assert!(errors.contains(Field::Title));
                assert!(errors.contains(Field::Excerpt));
                assert!(!errors.contains(Field::Content));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let store = ContentStore::open(Arc::new(ReadOnlyStorage(InMemoryStorage::new()))).unwrap();
        let before = store.list();
        let err = store.create(draft("Never saved")).unwrap_err();
        assert!(matches!(err, ContentError::Storage(_)));
        assert!(store.list().same_collection(&before));
    }

    // ---- update ----

    #[test]
    fn update_changes_only_given_field_and_stamps_updated_at() {
        let (_storage, store) = open_seeded();
        let id = PostId::from("3");
        let before = store.get(&id).unwrap();
        let len_before = store.len();

        let updated = store.update(&id, PostPatch::new().title("X")).unwrap().unwrap();

        assert_eq!(updated.title, "X");
        assert!(updated.updated_at.is_some());
        assert_eq!(
            Post {
                title: before.title.clone(),
                updated_at: None,
                ..updated.clone()
            },
            before
        );
        assert_eq!(store.len(), len_before);
        assert_eq!(store.get(&id).unwrap(), updated);
    }

    #[test]
    fn update_without_changes_still_sets_updated_at() {
        let (_storage, store) = open_seeded();
        let id = PostId::from("1");
        let updated = store.update(&id, PostPatch::new()).unwrap().unwrap();
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn update_unknown_id_is_a_silent_no_op() {
        let (storage, store) = open_seeded();
        let raw_before = stored(&storage);
        let revision_before = store.list().revision();

        let result = store
            .update(&PostId::from("missing"), PostPatch::new().title("X"))
            .unwrap();

        assert!(result.is_none());
        assert_eq!(stored(&storage), raw_before);
        assert_eq!(store.list().revision(), revision_before);
    }

    #[test]
    fn update_rejects_blanking_required_field() {
        let (_storage, store) = open_seeded();
        let err = store
            .update(&PostId::from("1"), PostPatch::new().excerpt(""))
            .unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));
        assert!(!store.get(&PostId::from("1")).unwrap().excerpt.is_empty());
    }

    // ---- delete ----

    #[test]
    fn delete_removes_exactly_one() {
        let (_storage, store) = open_seeded();
        let id = PostId::from("4");
        assert!(store.delete(&id).unwrap());
        assert_eq!(store.len(), 6);
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let (storage, store) = open_seeded();
        let raw_before = stored(&storage);
        assert!(!store.delete(&PostId::from("nope")).unwrap());
        assert_eq!(store.len(), 7);
        assert_eq!(stored(&storage), raw_before);
    }

    #[test]
    fn deleted_ids_are_not_reissued() {
        let (_storage, store) = open_seeded();
        let first = store.create(draft("One")).unwrap();
        store.delete(&first.id).unwrap();
        let second = store.create(draft("Two")).unwrap();
        assert_ne!(first.id, second.id);
    }

    // ---- counters ----

    #[test]
    fn like_twice_counts_twice() {
        // Duplicate-like prevention lives above the store.
        let (_storage, store) = open_seeded();
        let id = PostId::from("1");
        let start = store.get(&id).unwrap().likes;
        assert_eq!(store.like(&id).unwrap(), Some(start + 1));
        assert_eq!(store.like(&id).unwrap(), Some(start + 2));
        assert_eq!(store.get(&id).unwrap().likes, start + 2);
    }

    #[test]
    fn increment_views_persists() {
        let (storage, store) = open_seeded();
        let id = PostId::from("2");
        let start = store.get(&id).unwrap().views;
        assert_eq!(store.increment_views(&id).unwrap(), Some(start + 1));
        let on_disk = decode_posts(&stored(&storage).unwrap()).unwrap();
        let persisted = on_disk.iter().find(|p| p.id == id).unwrap();
        assert_eq!(persisted.views, start + 1);
    }

    #[test]
    fn counters_on_unknown_id_return_none() {
        let (_storage, store) = open_seeded();
        assert_eq!(store.like(&PostId::from("x")).unwrap(), None);
        assert_eq!(store.increment_views(&PostId::from("x")).unwrap(), None);
    }

    // ---- replacement and reload ----

    #[test]
    fn reload_round_trips_collection() {
        let (storage, store) = open_seeded();
        store.create(draft("Round trip")).unwrap();
        store.like(&PostId::from("5")).unwrap();
        store
            .update(&PostId::from("6"), PostPatch::new().featured(true))
            .unwrap();

        let reopened = ContentStore::open(storage).unwrap();
        assert_eq!(reopened.list().posts(), store.list().posts());
    }

    #[test]
    fn file_storage_round_trips_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::open(Arc::new(FileStorage::open(dir.path()).unwrap())).unwrap();
        store.create(draft("On disk")).unwrap();

        let reopened =
            ContentStore::open(Arc::new(FileStorage::open(dir.path()).unwrap())).unwrap();
        assert_eq!(reopened.list().posts(), store.list().posts());
    }

    #[test]
    fn reload_picks_up_last_writer() {
        let storage = Arc::new(InMemoryStorage::new());
        let a = ContentStore::open(storage.clone()).unwrap();
        let b = ContentStore::open(storage.clone()).unwrap();

        a.create(draft("From A")).unwrap();
        b.delete(&PostId::from("1")).unwrap();

        // B wrote last with its own stale view: A's post is gone.
        let seen = a.reload();
        assert_eq!(seen.len(), 6);
        assert!(seen.iter().all(|p| p.title != "From A"));
    }

    #[test]
    fn replace_all_rejects_duplicate_ids() {
        let (_storage, store) = open_seeded();
        let mut posts = store.list().to_vec();
        posts.push(posts[0].clone());
        let err = store.replace_all(posts).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateId(_)));
        assert_eq!(store.len(), 7);
    }

    #[test]
    fn reset_to_seed_restores_counters() {
        let (_storage, store) = open_seeded();
        let id = PostId::from("1");
        store.like(&id).unwrap();
        store.create(draft("Extra")).unwrap();
        store.reset_to_seed().unwrap();
        assert_eq!(store.len(), 7);
        assert_eq!(store.get(&id).unwrap().likes, 42);
    }

    #[test]
    fn export_matches_persisted_record() {
        let (storage, store) = open_seeded();
        store.like(&PostId::from("1")).unwrap();
        assert_eq!(store.export_json().unwrap(), stored(&storage).unwrap());
    }

    #[test]
    fn custom_key_is_used() {
        let storage = Arc::new(InMemoryStorage::new());
        let store = ContentStore::open_with_key(storage.clone(), "other-posts").unwrap();
        assert_eq!(store.key(), "other-posts");
        assert!(storage.get("other-posts").unwrap().is_some());
        assert!(storage.get(DEFAULT_POSTS_KEY).unwrap().is_none());
    }
}
