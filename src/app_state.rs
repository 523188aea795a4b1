use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoTestRepository, MongoUserRepository, TestRepository, UserRepository,
    },
    services::{test_service::TestService, user_service::UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub test_service: Arc<TestService>,
    pub jwt_service: Arc<JwtService>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let test_repository = Arc::new(MongoTestRepository::new(&db));

        let mut state = Self::from_repositories(config, user_repository, test_repository);
        state.db = Some(db);
        Ok(state)
    }

    /// Wires services over the given stores without opening a database connection.
    pub fn from_repositories(
        config: Config,
        user_repository: Arc<dyn UserRepository>,
        test_repository: Arc<dyn TestRepository>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        Self {
            user_service: Arc::new(UserService::new(user_repository, jwt_service.clone())),
            test_service: Arc::new(TestService::new(test_repository)),
            jwt_service,
            db: None,
            config: Arc::new(config),
        }
    }
}
