//! MongoDB implementation of TrackedUserRepository

use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Collection, Database};
use serde_json::Value;
use tracing::{debug, instrument};

use tracker_core::{RepoResult, Snowflake, TrackedUserRepository};

use super::error::map_db_error;
use crate::pool;

/// Fields the bot has used for the Discord id across schema revisions
const ID_FIELDS: [&str; 2] = ["user_id", "id"];

/// MongoDB implementation of TrackedUserRepository
#[derive(Clone)]
pub struct MongoTrackedUserRepository {
    database: Database,
    collection: Collection<Document>,
}

impl MongoTrackedUserRepository {
    /// Create a repository over the named collection
    pub fn new(database: Database, collection: &str) -> Self {
        let collection = database.collection::<Document>(collection);
        Self {
            database,
            collection,
        }
    }
}

/// Match the id under either field name, stored as a string or a `Long`
pub fn user_id_filter(user_id: Snowflake) -> Document {
    let as_string = user_id.to_string();
    let mut clauses: Vec<Document> = Vec::with_capacity(ID_FIELDS.len() * 2);

    for field in ID_FIELDS {
        let mut by_string = Document::new();
        by_string.insert(field, as_string.as_str());
        clauses.push(by_string);

        if let Some(as_long) = user_id.to_i64() {
            let mut by_long = Document::new();
            by_long.insert(field, as_long);
            clauses.push(by_long);
        }
    }

    doc! { "$or": clauses }
}

/// Render a stored document as relaxed extended JSON
pub fn to_extended_json(document: Document) -> Value {
    Bson::Document(document).into_relaxed_extjson()
}

#[async_trait]
impl TrackedUserRepository for MongoTrackedUserRepository {
    #[instrument(skip(self))]
    async fn find_by_user_id(&self, user_id: Snowflake) -> RepoResult<Option<Value>> {
        let found = self
            .collection
            .find_one(user_id_filter(user_id))
            .await
            .map_err(map_db_error)?;

        debug!(found = found.is_some(), "tracked user lookup");
        Ok(found.map(to_extended_json))
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        pool::ping(&self.database).await
    }
}
