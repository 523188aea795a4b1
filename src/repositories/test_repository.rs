use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

#[cfg(test)]
use mockall::automock;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Test,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TestRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Test>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Test>>;
    async fn insert(&self, test: Test) -> AppResult<Test>;
    /// Inserts the whole batch in one write; returns the number inserted.
    async fn insert_many(&self, tests: Vec<Test>) -> AppResult<usize>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoTestRepository {
    collection: Collection<Test>,
}

impl MongoTestRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.tests(),
        }
    }
}

#[async_trait]
impl TestRepository for MongoTestRepository {
    async fn find_all(&self) -> AppResult<Vec<Test>> {
        let cursor = self.collection.find(doc! {}).await?;
        let tests: Vec<Test> = cursor.try_collect().await?;
        Ok(tests)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Test>> {
        let test = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(test)
    }

    async fn insert(&self, test: Test) -> AppResult<Test> {
        self.collection.insert_one(&test).await?;
        Ok(test)
    }

    async fn insert_many(&self, tests: Vec<Test>) -> AppResult<usize> {
        if tests.is_empty() {
            return Ok(0);
        }

        let result = self.collection.insert_many(&tests).await?;
        Ok(result.inserted_ids.len())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Test with id '{}'", id)));
        }

        Ok(())
    }
}
