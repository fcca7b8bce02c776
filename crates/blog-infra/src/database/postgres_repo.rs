//! PostgreSQL repository implementations.

use blog_core::ports::{PostRepository, ThemeRepository};

use super::entity::post::Entity as PostEntity;
use super::entity::theme::Entity as ThemeEntity;
use super::postgres_base::{EntityLabel, PostgresBaseRepository};

/// PostgreSQL theme repository.
pub type PostgresThemeRepository = PostgresBaseRepository<ThemeEntity>;

/// PostgreSQL post repository.
///
/// Creator and theme references are enforced by the `posts` foreign keys.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

impl EntityLabel for ThemeEntity {
    const LABEL: &'static str = "Theme";
}

impl EntityLabel for PostEntity {
    const LABEL: &'static str = "Post";
}

impl ThemeRepository for PostgresThemeRepository {}

impl PostRepository for PostgresPostRepository {}
