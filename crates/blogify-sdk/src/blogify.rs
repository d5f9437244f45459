use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use blogify_content::views::{
    category_counts, most_recent, most_viewed, partition_featured, tag_counts,
};
use blogify_content::{ContentStore, MemoizedView, PostDraft, PostPatch, PostQuery, Snapshot};
use blogify_session::SessionStore;
use blogify_storage::{FileStorage, InMemoryStorage, Storage};
use blogify_types::{Category, Post, PostId, Session};

use crate::config::BlogifyConfig;
use crate::error::{SdkError, SdkResult};

/// Returns `true` if `session` may edit or delete `post`: admins may touch
/// anything, everyone else only their own posts.
pub fn can_edit(session: Option<&Session>, post: &Post) -> bool {
    match session {
        Some(s) => s.is_admin || post.is_authored_by(&s.email),
        None => false,
    }
}

/// Result of [`Blogify::like`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The like was counted; carries the new total.
    Liked(u64),
    /// This session already liked the post; carries the unchanged total.
    AlreadyLiked(u64),
}

impl LikeOutcome {
    pub fn likes(&self) -> u64 {
        match self {
            LikeOutcome::Liked(n) | LikeOutcome::AlreadyLiked(n) => *n,
        }
    }
}

/// What the home page shows for a query.
///
/// Without a filter, featured posts get their own section and `posts` holds
/// the rest. With a filter every match lands in `posts`, featured or not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HomeView {
    pub featured: Vec<Post>,
    pub posts: Vec<Post>,
}

impl HomeView {
    /// Number of posts shown across both sections.
    pub fn total(&self) -> usize {
        self.featured.len() + self.posts.len()
    }
}

/// High-level Blogify API.
///
/// Both stores share one storage backend. Likes are tracked per instance and
/// forgotten whenever the identity changes.
pub struct Blogify {
    config: BlogifyConfig,
    content: ContentStore,
    session: SessionStore,
    liked: Mutex<HashSet<PostId>>,
    home: Mutex<MemoizedView>,
}

impl std::fmt::Debug for Blogify {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blogify")
            .field("config", &self.config)
            .field("posts", &self.content.len())
            .field("session", &self.session)
            .finish()
    }
}

impl Blogify {
    /// Open the file-backed store under `config.data_dir`.
    pub fn open(config: BlogifyConfig) -> SdkResult<Self> {
        let storage = FileStorage::open(&config.data_dir)?;
        Self::with_storage(Arc::new(storage), config)
    }

    /// A throwaway instance with default settings and nothing on disk.
    pub fn in_memory() -> SdkResult<Self> {
        Self::with_storage(Arc::new(InMemoryStorage::new()), BlogifyConfig::default())
    }

    pub fn with_storage(storage: Arc<dyn Storage>, config: BlogifyConfig) -> SdkResult<Self> {
        let content = ContentStore::open_with_key(storage.clone(), &config.posts_key)?;
        let session =
            SessionStore::open_with(storage, &config.session_key, &config.admin_email)?;
        Ok(Self {
            config,
            content,
            session,
            liked: Mutex::new(HashSet::new()),
            home: Mutex::new(MemoizedView::new()),
        })
    }

    pub fn config(&self) -> &BlogifyConfig {
        &self.config
    }

    /// The underlying content store, for operations without access rules.
    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ---- Identity ----

    /// Log in. Empty credentials are ignored and return `Ok(None)`.
    pub fn login(&self, email: &str, password: &str) -> SdkResult<Option<Session>> {
        let session = self.session.login(email, password)?;
        if session.is_some() {
            self.liked().clear();
        }
        Ok(session)
    }

    pub fn logout(&self) -> SdkResult<Option<Session>> {
        let previous = self.session.logout()?;
        self.liked().clear();
        Ok(previous)
    }

    pub fn current_user(&self) -> Option<Session> {
        self.session.current()
    }

    // ---- Reading ----

    pub fn posts(&self) -> Snapshot {
        self.content.list()
    }

    /// Fetch a post without counting a view.
    pub fn post(&self, id: &PostId) -> SdkResult<Post> {
        self.content
            .get(id)
            .ok_or_else(|| SdkError::PostNotFound(id.clone()))
    }

    /// Open a post's detail page: counts one view and returns the post with
    /// the new count.
    pub fn open_post(&self, id: &PostId) -> SdkResult<Post> {
        self.content
            .increment_views(id)?
            .ok_or_else(|| SdkError::PostNotFound(id.clone()))?;
        self.post(id)
    }

    /// Posts matching `query`, in collection order.
    pub fn query(&self, query: &PostQuery) -> Vec<Post> {
        let snapshot = self.content.list();
        let mut memo = self.home.lock().unwrap_or_else(|e| e.into_inner());
        memo.get(&snapshot, query).into_iter().cloned().collect()
    }

    pub fn home(&self, query: &PostQuery) -> HomeView {
        let matches = self.query(query);
        if !query.is_unfiltered() {
            return HomeView {
                featured: Vec::new(),
                posts: matches,
            };
        }
        let (featured, posts): (Vec<Post>, Vec<Post>) =
            matches.into_iter().partition(|p| p.featured);
        HomeView { featured, posts }
    }

    pub fn featured(&self) -> Vec<Post> {
        let snapshot = self.content.list();
        partition_featured(snapshot.iter())
            .featured
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn recent(&self, limit: usize) -> Vec<Post> {
        most_recent(&self.content.list(), limit)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn popular(&self, limit: usize) -> Vec<Post> {
        most_viewed(&self.content.list(), limit)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn categories(&self) -> Vec<(Category, usize)> {
        category_counts(&self.content.list())
    }

    pub fn tags(&self) -> Vec<(String, usize)> {
        tag_counts(&self.content.list())
    }

    // ---- Writing ----

    /// Publish a new post as the current user. The draft's author fields
    /// are overwritten with the session's name and email.
    pub fn publish(&self, draft: PostDraft) -> SdkResult<Post> {
        let session = self.session.current().ok_or(SdkError::NotLoggedIn)?;
        let draft = draft.with_author(session.name, session.email);
        let post = self.content.create(draft)?;
        Ok(post)
    }

    /// Edit a post. Requires authorship or admin rights.
    pub fn edit(&self, id: &PostId, patch: PostPatch) -> SdkResult<Post> {
        self.authorize(id)?;
        self.content
            .update(id, patch)?
            .ok_or_else(|| SdkError::PostNotFound(id.clone()))
    }

    /// Delete a post. Requires authorship or admin rights.
    pub fn remove(&self, id: &PostId) -> SdkResult<()> {
        self.authorize(id)?;
        if !self.content.delete(id)? {
            return Err(SdkError::PostNotFound(id.clone()));
        }
        self.liked().remove(id);
        Ok(())
    }

    /// Like a post, at most once per identity for the life of this instance.
    pub fn like(&self, id: &PostId) -> SdkResult<LikeOutcome> {
        let mut liked = self.liked();
        if liked.contains(id) {
            let post = self.post(id)?;
            debug!(%id, "post already liked");
            return Ok(LikeOutcome::AlreadyLiked(post.likes));
        }
        let likes = self
            .content
            .like(id)?
            .ok_or_else(|| SdkError::PostNotFound(id.clone()))?;
        liked.insert(id.clone());
        Ok(LikeOutcome::Liked(likes))
    }

    /// Returns `true` if this instance has already liked the post.
    pub fn has_liked(&self, id: &PostId) -> bool {
        self.liked().contains(id)
    }

    /// Whether the current user may edit or delete `post`.
    pub fn can_edit(&self, post: &Post) -> bool {
        can_edit(self.session.current().as_ref(), post)
    }

    /// Discard every post and restore the seed dataset. Admin only.
    pub fn reset(&self) -> SdkResult<()> {
        let session = self.session.current().ok_or(SdkError::NotLoggedIn)?;
        if !session.is_admin {
            return Err(SdkError::Forbidden("only an admin can reset the blog".into()));
        }
        self.content.reset_to_seed()?;
        self.liked().clear();
        info!(by = %session.email, "blog reset to seed");
        Ok(())
    }

    // ---- internals ----

    fn authorize(&self, id: &PostId) -> SdkResult<()> {
        let session = self.session.current().ok_or(SdkError::NotLoggedIn)?;
        let post = self.post(id)?;
        if !can_edit(Some(&session), &post) {
            debug!(%id, email = %session.email, "edit refused");
            return Err(SdkError::PermissionDenied(id.clone()));
        }
        Ok(())
    }

    fn liked(&self) -> MutexGuard<'_, HashSet<PostId>> {
        self.liked.lock().unwrap_or_else(|e| e.into_inner())
    }
}
