use async_trait::async_trait;
use diesel::prelude::*;

use crate::db::models::label::{Label, NewLabel};
use crate::db::{DbPool, with_conn};

use super::{LabelStore, StoreError};

#[derive(Clone)]
pub struct PgLabelRepo {
    pool: DbPool,
}

impl PgLabelRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LabelStore for PgLabelRepo {
    async fn find_by_id(&self, label_id: i64) -> Result<Label, StoreError> {
        with_conn(&self.pool, move |conn| {
            use crate::schema::labels::dsl::*;
            let label = labels
                .filter(id.eq(label_id))
                .select(Label::as_select())
                .first(conn)?;
            Ok(label)
        })
        .await
    }

    async fn find_all_by_repository(&self, repository_id: i64) -> Result<Vec<Label>, StoreError> {
        with_conn(&self.pool, move |conn| {
            use crate::schema::labels::dsl::*;
            let results = labels
                .filter(repo_id.eq(repository_id))
                .order(name.asc())
                .select(Label::as_select())
                .load(conn)?;
            Ok(results)
        })
        .await
    }

    async fn insert(&self, new_label: NewLabel) -> Result<i64, StoreError> {
        with_conn(&self.pool, move |conn| {
            use crate::schema::labels;
            let assigned = diesel::insert_into(labels::table)
                .values(&new_label)
                .returning(labels::id)
                .get_result::<i64>(conn)?;
            Ok(assigned)
        })
        .await
    }

    async fn update(&self, label: &Label) -> Result<(), StoreError> {
        let label = label.clone();
        with_conn(&self.pool, move |conn| {
            use crate::schema::labels::dsl::*;
            let rows = diesel::update(
                labels
                    .filter(id.eq(label.id))
                    .filter(repo_id.eq(label.repository_id)),
            )
            .set((name.eq(&label.name), color.eq(&label.color)))
            .execute(conn)?;
            if rows == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
        .await
    }

    async fn delete_by_repository_and_id(
        &self,
        repository_id: i64,
        label_id: i64,
    ) -> Result<bool, StoreError> {
        with_conn(&self.pool, move |conn| {
            use crate::schema::labels::dsl::*;
            let rows = diesel::delete(
                labels
                    .filter(repo_id.eq(repository_id))
                    .filter(id.eq(label_id)),
            )
            .execute(conn)?;
            Ok(rows > 0)
        })
        .await
    }
}
