use std::future::Future;

use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Collection};

use crate::errors::StoreError;
use crate::models::StoredMessage;

const DATABASE: &str = "studyvault";
const COLLECTION: &str = "messages";

/// Append-only gateway to the document store. The relay is generic over this
/// so it can run against an in-memory fake in tests.
pub trait MessageStore: Send + Sync {
    fn append(
        &self,
        record: StoredMessage,
    ) -> impl Future<Output = Result<ObjectId, StoreError>> + Send;
}

/// One MongoDB connection for the process lifetime. A failed connect is not
/// fatal: the gateway comes up disconnected and every `append` fails with
/// `StoreError::Unavailable` until the process is restarted.
pub struct MongoStore {
    collection: Option<Collection<StoredMessage>>,
}

impl MongoStore {
    pub async fn connect(url: &str) -> Self {
        match Self::try_connect(url).await {
            Ok(collection) => {
                log::info!("connected to MongoDB at {url}");
                Self {
                    collection: Some(collection),
                }
            }
            Err(e) => {
                log::error!(
                    "cannot reach MongoDB at {url}: {e}; every received message will be dropped"
                );
                Self { collection: None }
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.collection.is_some()
    }

    async fn try_connect(url: &str) -> Result<Collection<StoredMessage>, mongodb::error::Error> {
        let client = Client::with_uri_str(url).await?;
        let database = client.database(DATABASE);
        // with_uri_str does not touch the network, so ping to find out now
        // whether the store is actually there
        database.run_command(doc! { "ping": 1 }).await?;
        Ok(database.collection(COLLECTION))
    }
}

impl MessageStore for MongoStore {
    async fn append(&self, record: StoredMessage) -> Result<ObjectId, StoreError> {
        let Some(collection) = &self.collection else {
            return Err(StoreError::Unavailable);
        };
        let result = collection.insert_one(record).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or(StoreError::Unacknowledged)
    }
}
