#![allow(dead_code, unused_macros)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::RwLock;

use exam_portal_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Role, Test, User},
    repositories::{TestRepository, UserRepository},
};

/// Builds an actix test service over the real router.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .configure(exam_portal_server::handlers::configure_routes),
        )
        .await
    };
}

pub struct InMemoryUserRepository {
    users_by_username: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users_by_username: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users_by_username.write().await;

        if users.contains_key(&user.username) {
            return Err(AppError::AlreadyExists(format!(
                "User '{}'",
                user.username
            )));
        }

        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users_by_username.read().await;
        Ok(users.get(username).cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct InMemoryTestRepository {
    tests: Arc<RwLock<HashMap<String, Test>>>,
}

impl InMemoryTestRepository {
    pub fn new() -> Self {
        Self {
            tests: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.tests.read().await.len()
    }
}

#[async_trait]
impl TestRepository for InMemoryTestRepository {
    async fn find_all(&self) -> AppResult<Vec<Test>> {
        let tests = self.tests.read().await;
        let mut items: Vec<_> = tests.values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Test>> {
        let tests = self.tests.read().await;
        Ok(tests.get(id).cloned())
    }

    async fn insert(&self, test: Test) -> AppResult<Test> {
        let mut tests = self.tests.write().await;
        if tests.contains_key(&test.id) {
            return Err(AppError::AlreadyExists(format!("Test with id '{}'", test.id)));
        }

        tests.insert(test.id.clone(), test.clone());
        Ok(test)
    }

    async fn insert_many(&self, batch: Vec<Test>) -> AppResult<usize> {
        let mut tests = self.tests.write().await;
        if batch.iter().any(|t| tests.contains_key(&t.id)) {
            return Err(AppError::AlreadyExists("duplicate test id in batch".to_string()));
        }

        let count = batch.len();
        for test in batch {
            tests.insert(test.id.clone(), test);
        }
        Ok(count)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut tests = self.tests.write().await;
        if tests.remove(id).is_none() {
            return Err(AppError::NotFound(format!("Test with id '{}'", id)));
        }
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        app_env: "test".to_string(),
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "online-tests-test".to_string(),
        users_collection: "users".to_string(),
        tests_collection: "tests".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 3000,
        jwt_secret: SecretString::from("integration_test_secret".to_string()),
        jwt_expiration_hours: 1,
        cors_allowed_origin: "http://localhost:3000".to_string(),
        upload_max_bytes: 64 * 1024,
    }
}

pub fn test_state() -> (AppState, Arc<InMemoryTestRepository>) {
    let tests = Arc::new(InMemoryTestRepository::new());
    let state = AppState::from_repositories(
        test_config(),
        Arc::new(InMemoryUserRepository::new()),
        tests.clone(),
    );
    (state, tests)
}

pub fn bearer(state: &AppState, role: Role) -> String {
    let token = state
        .jwt_service
        .issue(&format!("{}-id", role.as_str().to_lowercase()), role)
        .expect("token should be issued");
    format!("Bearer {}", token)
}

pub fn two_question_test_body() -> serde_json::Value {
    serde_json::json!({
        "subject": "General Knowledge",
        "duration": 10,
        "questions": [
            {
                "text": "Capital of France?",
                "options": ["Paris", "Rome", "Madrid", "Berlin"],
                "correctAnswer": 0
            },
            {
                "text": "2 + 2?",
                "options": ["3", "4", "5", "6"],
                "correctAnswer": 1
            }
        ],
        "availableFor": ["Student"]
    })
}
