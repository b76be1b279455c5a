//! Generic repository over a single SeaORM entity.
//!
//! `BaseRepository` provides the CRUD primitives every domain repository
//! needs — insert, lookup by id, offset/limit pages, filter-set lookup,
//! update, delete — parameterized by the entity type so each domain crate
//! only adds its own typed composition on top.

use std::marker::PhantomData;

use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, QueryFilter, QuerySelect, Value,
};

/// Reusable CRUD primitives for one entity type.
///
/// # Example
///
/// ```ignore
/// use database::BaseRepository;
///
/// struct PgProductRepository {
///     base: BaseRepository<products::Entity>,
/// }
/// ```
pub struct BaseRepository<E>
where
    E: EntityTrait,
{
    db: DatabaseConnection,
    entity: PhantomData<E>,
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }

    /// The underlying connection, for queries the primitives do not cover.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Insert a new row and return the stored model.
    pub async fn insert<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.insert(&self.db).await
    }

    /// Look up a row by primary key. A miss is `Ok(None)`, not an error.
    pub async fn find_by_id<K>(&self, id: K) -> Result<Option<E::Model>, DbErr>
    where
        K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        E::find_by_id(id).one(&self.db).await
    }

    /// Return a page of rows in the store's default order.
    ///
    /// An empty page is a valid, non-error outcome.
    pub async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<E::Model>, DbErr> {
        E::find().offset(skip).limit(limit).all(&self.db).await
    }

    /// Return the first row matching every given column filter.
    ///
    /// String values compare case-insensitively (`LOWER(col) = LOWER(value)`);
    /// all other values compare by plain equality.
    pub async fn find_one_by_params(
        &self,
        params: Vec<(E::Column, Value)>,
    ) -> Result<Option<E::Model>, DbErr> {
        let mut query = E::find();

        for (column, value) in params {
            query = match value {
                Value::String(Some(s)) => query.filter(
                    Expr::expr(Func::lower(Expr::col(column))).eq(s.to_lowercase()),
                ),
                other => query.filter(column.eq(other)),
            };
        }

        query.one(&self.db).await
    }

    /// Persist the set fields of an existing row and return the refreshed model.
    pub async fn update<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.update(&self.db).await
    }

    /// Delete a row by primary key, returning the number of affected rows.
    pub async fn delete_by_id<K>(&self, id: K) -> Result<u64, DbErr>
    where
        K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        Ok(E::delete_by_id(id).exec(&self.db).await?.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    mod widget {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
        #[sea_orm(table_name = "widgets")]
        pub struct Model {
            #[sea_orm(primary_key, auto_increment = false)]
            pub id: String,
            pub name: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    fn sample(id: &str, name: &str) -> widget::Model {
        widget::Model {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_returns_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample("w1", "gear")]])
            .into_connection();

        let repo = BaseRepository::<widget::Entity>::new(db);
        let found = repo.find_by_id("w1").await.unwrap();
        assert_eq!(found.unwrap().name, "gear");
    }

    #[tokio::test]
    async fn test_find_by_id_miss_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<widget::Model>::new()])
            .into_connection();

        let repo = BaseRepository::<widget::Entity>::new(db);
        let found = repo.find_by_id("missing").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_page_applies_offset_and_limit() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample("w2", "cog")]])
            .into_connection();

        let repo = BaseRepository::<widget::Entity>::new(db.clone());
        let page = repo.find_page(1, 1).await.unwrap();
        assert_eq!(page.len(), 1);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("LIMIT"), "expected LIMIT in {log}");
        assert!(log.contains("OFFSET"), "expected OFFSET in {log}");
    }

    #[tokio::test]
    async fn test_find_one_by_params_lowercases_string_filters() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<widget::Model>::new()])
            .into_connection();

        let repo = BaseRepository::<widget::Entity>::new(db.clone());
        let found = repo
            .find_one_by_params(vec![(widget::Column::Name, "GEAR".into())])
            .await
            .unwrap();
        assert!(found.is_none());

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("LOWER"), "expected LOWER() filter in {log}");
        assert!(log.contains("gear"), "expected lowercased value in {log}");
    }

    #[tokio::test]
    async fn test_delete_by_id_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = BaseRepository::<widget::Entity>::new(db);
        let affected = repo.delete_by_id("w1").await.unwrap();
        assert_eq!(affected, 1);
    }
}
