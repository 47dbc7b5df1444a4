//! Databases module.
//!
//! Databases contain collections, collections contain documents. Document
//! operations are generic over the payload type, see
//! [`Document`](models::Document).
//!
//! # Examples
//!
//! ```rust,no_run
//! # use appwrite_sdk::Client;
//! # async fn run(client: Client) -> appwrite_sdk::core::Result<()> {
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct Settings {
//!     theme: String,
//! }
//!
//! let databases = client.databases()?;
//! let settings = Settings { theme: "dark".into() };
//! let doc = databases
//!     .create_document("main", "settings", "unique()", &settings, &[])
//!     .await?;
//! println!("created {}", doc.id);
//! # Ok(())
//! # }
//! ```

pub mod models;


use crate::core::call::{Call, Endpoint};
use crate::core::transport::Transport;
use crate::Service;
use models::{
    Collection, CollectionList, CreateCollectionRequest, CreateDatabaseRequest,
    CreateDocumentRequest, Database, DatabaseList, Document, DocumentList, UpdateDocumentRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

const DATABASE: &str = "databases/{databaseId}";
const COLLECTIONS: &str = "databases/{databaseId}/collections";
const COLLECTION: &str = "databases/{databaseId}/collections/{collectionId}";
const DOCUMENTS: &str = "databases/{databaseId}/collections/{collectionId}/documents";
const DOCUMENT: &str =
    "databases/{databaseId}/collections/{collectionId}/documents/{documentId}";

#[derive(Clone)]
pub struct Databases {
    transport: Transport,
}

impl Service for Databases {
    fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }
}

impl Databases {
    pub fn create_database(&self, database_id: &str, name: &str) -> Call<Database> {
        let body = CreateDatabaseRequest { database_id, name };
        self.transport.json(Endpoint::post("databases").json(&body))
    }

    pub fn list_databases(&self) -> Call<DatabaseList> {
        self.transport.json(Endpoint::get("databases"))
    }

    pub fn get_database(&self, database_id: &str) -> Call<Database> {
        self.transport
            .json(Endpoint::get(DATABASE).path_param("databaseId", database_id))
    }

    /// Deletes the database with all its collections and documents.
    pub fn delete_database(&self, database_id: &str) -> Call<()> {
        self.transport
            .empty(Endpoint::delete(DATABASE).path_param("databaseId", database_id))
    }

    /// Creates a collection. `permissions` use the API's permission strings,
    /// e.g. `read("any")`.
    pub fn create_collection(
        &self,
        database_id: &str,
        collection_id: &str,
        name: &str,
        permissions: &[String],
    ) -> Call<Collection> {
        let body = CreateCollectionRequest {
            collection_id,
            name,
            permissions,
        };
        self.transport.json(
            Endpoint::post(COLLECTIONS)
                .path_param("databaseId", database_id)
                .json(&body),
        )
    }

    pub fn list_collections(&self, database_id: &str) -> Call<CollectionList> {
        self.transport
            .json(Endpoint::get(COLLECTIONS).path_param("databaseId", database_id))
    }

    pub fn get_collection(&self, database_id: &str, collection_id: &str) -> Call<Collection> {
        self.transport.json(
            Endpoint::get(COLLECTION)
                .path_param("databaseId", database_id)
                .path_param("collectionId", collection_id),
        )
    }

    pub fn delete_collection(&self, database_id: &str, collection_id: &str) -> Call<()> {
        self.transport.empty(
            Endpoint::delete(COLLECTION)
                .path_param("databaseId", database_id)
                .path_param("collectionId", collection_id),
        )
    }

    /// Creates a document holding `data`. The response is decoded back into
    /// the same payload type.
    pub fn create_document<T>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &T,
        permissions: &[String],
    ) -> Call<Document<T>>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
    {
        let body = CreateDocumentRequest {
            document_id,
            data,
            permissions,
        };
        self.transport.json(
            Endpoint::post(DOCUMENTS)
                .path_param("databaseId", database_id)
                .path_param("collectionId", collection_id)
                .json(&body),
        )
    }

    /// Lists documents, filtered by query strings such as
    /// `{"method":"equal","attribute":"theme","values":["dark"]}`.
    pub fn list_documents<T>(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[String],
    ) -> Call<DocumentList<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.transport.json(
            Endpoint::get(DOCUMENTS)
                .path_param("databaseId", database_id)
                .path_param("collectionId", collection_id)
                .query_list("queries", queries),
        )
    }

    pub fn get_document<T>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Call<Document<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.transport.json(document(database_id, collection_id, document_id, Endpoint::get))
    }

    /// Patches a document. Only the attributes present in `data` change;
    /// permissions are left alone when `None`.
    pub fn update_document<T, U>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &U,
        permissions: Option<&[String]>,
    ) -> Call<Document<T>>
    where
        T: DeserializeOwned + Send + 'static,
        U: Serialize + ?Sized,
    {
        let body = UpdateDocumentRequest { data, permissions };
        self.transport.json(
            document(database_id, collection_id, document_id, Endpoint::patch).json(&body),
        )
    }

    pub fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Call<()> {
        self.transport
            .empty(document(database_id, collection_id, document_id, Endpoint::delete))
    }
}

fn document(
    database_id: &str,
    collection_id: &str,
    document_id: &str,
    method: fn(&'static str) -> Endpoint,
) -> Endpoint {
    method(DOCUMENT)
        .path_param("databaseId", database_id)
        .path_param("collectionId", collection_id)
        .path_param("documentId", document_id)
}
