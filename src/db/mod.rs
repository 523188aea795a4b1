use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::{Test, User},
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the application database and the collections it owns.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
    users_collection: String,
    tests_collection: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_options(client_options(config).await?)?;

        let database = Self {
            client,
            db_name: config.mongo_db_name.clone(),
            users_collection: config.users_collection.clone(),
            tests_collection: config.tests_collection.clone(),
        };
        database.ping().await?;

        log::info!(
            "Connected to MongoDB database '{}' (users: '{}', tests: '{}')",
            database.db_name,
            database.users_collection,
            database.tests_collection
        );
        Ok(database)
    }

    pub fn users(&self) -> Collection<User> {
        self.collection(&self.users_collection)
    }

    pub fn tests(&self) -> Collection<Test> {
        self.collection(&self.tests_collection)
    }

    fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.client.database(&self.db_name).collection(name)
    }

    /// Round-trips a `ping` to the server; used by readiness checks.
    pub async fn ping(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

async fn client_options(config: &Config) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;

    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.max_pool_size = Some(10);
    options.min_pool_size = Some(2);
    options.connect_timeout = Some(CONNECT_TIMEOUT);
    options.server_selection_timeout = Some(CONNECT_TIMEOUT);

    Ok(options)
}
