//! Post entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use blog_core::domain::{EntityRef, Post, PostDraft};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub photo: Option<String>,
    pub creator_id: i32,
    pub theme_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::theme::Entity",
        from = "Column::ThemeId",
        to = "super::theme::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Theme,
}

impl Related<super::theme::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Theme.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            photo: model.photo,
            creator: EntityRef::from(model.creator_id),
            theme: EntityRef::from(model.theme_id),
            created_at: model.created_at.into(),
        }
    }
}

/// New row; id from the sequence, creation time from the server clock.
impl From<PostDraft> for ActiveModel {
    fn from(draft: PostDraft) -> Self {
        Self {
            id: NotSet,
            title: Set(draft.title().to_string()),
            description: Set(draft.description().to_string()),
            photo: Set(draft.photo().map(str::to_string)),
            creator_id: Set(draft.creator_id()),
            theme_id: Set(draft.theme_id()),
            created_at: Set(Utc::now().into()),
        }
    }
}

/// Full replacement of an existing row. `created_at` is left untouched.
impl From<(i32, PostDraft)> for ActiveModel {
    fn from((id, draft): (i32, PostDraft)) -> Self {
        Self {
            id: Set(id),
            created_at: NotSet,
            ..Self::from(draft)
        }
    }
}
