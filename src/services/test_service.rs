use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Test,
        dto::request::{CreateTestRequest, SubmitTestRequest},
    },
    repositories::TestRepository,
    services::{
        scoring::{self, Score},
        sheet_import,
    },
};

pub struct TestService {
    repository: Arc<dyn TestRepository>,
}

impl TestService {
    pub fn new(repository: Arc<dyn TestRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_tests(&self) -> AppResult<Vec<Test>> {
        self.repository.find_all().await
    }

    pub async fn get_test(&self, id: &str) -> AppResult<Test> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test with id '{}'", id)))
    }

    pub async fn create_test(&self, request: CreateTestRequest) -> AppResult<Test> {
        request.validate()?;

        let test = self.repository.insert(Test::from_request(request)).await?;
        log::info!(
            "Created test {} '{}' with {} questions",
            test.id,
            test.subject,
            test.questions.len()
        );
        Ok(test)
    }

    pub async fn delete_test(&self, id: &str) -> AppResult<()> {
        self.repository.delete(id).await?;
        log::info!("Deleted test {}", id);
        Ok(())
    }

    /// Imports every row of an uploaded workbook as one batch.
    pub async fn import_workbook(&self, bytes: Vec<u8>) -> AppResult<usize> {
        let tests: Vec<Test> = sheet_import::parse_workbook(bytes)?
            .into_iter()
            .map(Test::from_request)
            .collect();

        let inserted = self.repository.insert_many(tests).await?;
        log::info!("Imported {} tests from spreadsheet", inserted);
        Ok(inserted)
    }

    pub async fn submit(&self, request: SubmitTestRequest) -> AppResult<Score> {
        request.validate()?;

        let test = self.get_test(&request.test_id).await?;
        let score = scoring::score(&test, &request.answers);

        log::info!(
            "Graded submission for test {}: {}/{} ({})",
            test.id,
            score.correct,
            score.total,
            score
        );
        Ok(score)
    }
}
