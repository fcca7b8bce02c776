use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, SqlErr,
};

use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;

/// Name of an entity as it appears in error messages.
pub trait EntityLabel {
    const LABEL: &'static str;
}

/// Generic PostgreSQL repository implementation.
///
/// Repositories for different entities share one connection pool.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Sort a driver error into the repository taxonomy.
pub(crate) fn classify(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => return RepoError::Constraint(detail),
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            return RepoError::InvalidReference(detail);
        }
        _ => {}
    }

    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

#[async_trait]
impl<E, T, D, ID> BaseRepository<T, D, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait + EntityLabel,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E>
        + ActiveModelBehavior
        + From<D>
        + From<(ID, D)>
        + Send
        + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Display + Copy + 'static,
    T: From<E::Model> + Send + Sync + 'static,
    D: Send + 'static,
{
    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        let rows = E::find().all(self.db.as_ref()).await.map_err(classify)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(self.db.as_ref()).await.map_err(classify)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, draft: D) -> Result<T, RepoError> {
        let active_model = <E::ActiveModel as From<D>>::from(draft);
        let model = active_model.insert(self.db.as_ref()).await.map_err(classify)?;

        tracing::debug!(entity = E::LABEL, "Row inserted");
        Ok(model.into())
    }

    async fn update(&self, id: ID, draft: D) -> Result<T, RepoError> {
        let active_model = <E::ActiveModel as From<(ID, D)>>::from((id, draft));

        match active_model.update(self.db.as_ref()).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => Err(RepoError::not_found(E::LABEL, id)),
            Err(e) => Err(classify(e)),
        }
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(classify)?;

        if result.rows_affected == 0 {
            return Err(RepoError::not_found(E::LABEL, id));
        }

        Ok(())
    }
}
