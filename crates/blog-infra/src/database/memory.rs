//! In-memory store - used when no database is configured.
//!
//! Mirrors the relational schema closely enough for the API contract:
//! ids come from per-table counters, posts must reference an existing
//! creator and theme, and deleting a theme deletes its posts.
//! Note: Data is lost on process restart.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::domain::{Post, PostDraft, Theme, ThemeDraft};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository, ThemeRepository};

#[derive(Default)]
struct Tables {
    users: BTreeSet<i32>,
    themes: BTreeMap<i32, Theme>,
    posts: BTreeMap<i32, Post>,
    last_theme_id: i32,
    last_post_id: i32,
}

impl Tables {
    fn check_references(&self, draft: &PostDraft) -> Result<(), RepoError> {
        if !self.users.contains(&draft.creator_id()) {
            return Err(RepoError::InvalidReference(format!(
                "User with id {} does not exist",
                draft.creator_id()
            )));
        }
        if !self.themes.contains_key(&draft.theme_id()) {
            return Err(RepoError::InvalidReference(format!(
                "Theme with id {} does not exist",
                draft.theme_id()
            )));
        }
        Ok(())
    }
}

/// Shared tables behind the in-memory repositories.
///
/// Users are not managed by this API; seed the ids that posts may name as
/// their creator with [`InMemoryStore::with_users`].
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already knows the given user ids.
    pub fn with_users(ids: impl IntoIterator<Item = i32>) -> Self {
        let tables = Tables {
            users: ids.into_iter().collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }
}

/// Theme repository over an [`InMemoryStore`].
pub struct InMemoryThemeRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryThemeRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Theme, ThemeDraft, i32> for InMemoryThemeRepository {
    async fn find_all(&self) -> Result<Vec<Theme>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.themes.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Theme>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.themes.get(&id).cloned())
    }

    async fn create(&self, draft: ThemeDraft) -> Result<Theme, RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.last_theme_id += 1;

        let theme = Theme::from_draft(tables.last_theme_id, draft);
        tables.themes.insert(theme.id, theme.clone());
        Ok(theme)
    }

    async fn update(&self, id: i32, draft: ThemeDraft) -> Result<Theme, RepoError> {
        let mut tables = self.store.tables.write().await;
        let slot = tables
            .themes
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Theme", id))?;

        *slot = Theme::from_draft(id, draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        if tables.themes.remove(&id).is_none() {
            return Err(RepoError::not_found("Theme", id));
        }

        // on delete cascade
        let before = tables.posts.len();
        tables.posts.retain(|_, post| post.theme.id != id);
        let removed = before - tables.posts.len();
        if removed > 0 {
            tracing::debug!(theme_id = id, removed, "Cascaded theme delete to posts");
        }

        Ok(())
    }
}

impl ThemeRepository for InMemoryThemeRepository {}

/// Post repository over an [`InMemoryStore`].
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Post, PostDraft, i32> for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn create(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.check_references(&draft)?;
        tables.last_post_id += 1;

        let post = Post::from_draft(tables.last_post_id, draft, Utc::now());
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: i32, draft: PostDraft) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        let current = tables
            .posts
            .get(&id)
            .cloned()
            .ok_or_else(|| RepoError::not_found("Post", id))?;
        tables.check_references(&draft)?;

        let updated = current.apply(draft);
        tables.posts.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        match tables.posts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::not_found("Post", id)),
        }
    }
}

impl PostRepository for InMemoryPostRepository {}
