//! Document store access.
//!
//! MongoDB is the source of truth; everything above this module talks to the
//! [`store::TagStore`] trait.

pub mod store;

#[cfg(test)]
pub mod memory;
mod mongo;

pub use mongo::MongoStore;

use mongodb::Client;

use crate::config::Config;
use crate::errors::AppError;

/// Connect to MongoDB and prepare the collections and indexes.
pub async fn init_database(config: &Config) -> Result<MongoStore, AppError> {
    let client = Client::with_uri_str(&config.mongo_uri).await?;
    let db = client.database(&config.db_name);

    let store = MongoStore::new(&db);
    store.ensure_indexes().await?;

    Ok(store)
}
