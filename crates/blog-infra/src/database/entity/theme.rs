//! Theme entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use blog_core::domain::{Theme, ThemeDraft};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "themes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Theme {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
        }
    }
}

/// New row; the id comes from the sequence.
impl From<ThemeDraft> for ActiveModel {
    fn from(draft: ThemeDraft) -> Self {
        Self {
            id: NotSet,
            description: Set(draft.description().to_string()),
        }
    }
}

/// Full replacement of an existing row.
impl From<(i32, ThemeDraft)> for ActiveModel {
    fn from((id, draft): (i32, ThemeDraft)) -> Self {
        Self {
            id: Set(id),
            ..Self::from(draft)
        }
    }
}
