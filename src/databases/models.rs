use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "$permissions", default)]
    pub permissions: Vec<String>,
    pub database_id: String,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub document_security: bool,
    #[serde(default)]
    pub attributes: Vec<Map<String, Value>>,
    #[serde(default)]
    pub indexes: Vec<Map<String, Value>>,
}

/// A stored document: `$`-prefixed system fields plus the application
/// payload `T`, which sits next to them in the JSON object.
///
/// `T` defaults to a JSON map. Typed payloads work with any serde type whose
/// fields do not start with `$`:
///
/// ```rust
/// # use appwrite_sdk::databases::models::Document;
/// #[derive(serde::Deserialize)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// let doc: Document<Person> = serde_json::from_value(serde_json::json!({
///     "$id": "d1",
///     "$collectionId": "people",
///     "$databaseId": "main",
///     "$createdAt": "2024-01-01T00:00:00.000+00:00",
///     "$updatedAt": "2024-01-01T00:00:00.000+00:00",
///     "$permissions": [],
///     "name": "John Doe",
///     "age": 30
/// }))
/// .unwrap();
/// assert_eq!(doc.data.age, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T = Map<String, Value>> {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collectionId")]
    pub collection_id: String,
    #[serde(rename = "$databaseId")]
    pub database_id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "$permissions", default)]
    pub permissions: Vec<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Document<T> {
    pub fn into_data(self) -> T {
        self.data
    }

    /// Replaces the payload, keeping the system fields.
    pub fn map_data<U>(self, f: impl FnOnce(T) -> U) -> Document<U> {
        Document {
            id: self.id,
            collection_id: self.collection_id,
            database_id: self.database_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            permissions: self.permissions,
            data: f(self.data),
        }
    }
}

impl Document<Map<String, Value>> {
    /// Interprets an untyped payload as `U`.
    pub fn decode<U: DeserializeOwned>(&self) -> Result<U, serde_json::Error> {
        serde_json::from_value(Value::Object(self.data.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseList {
    pub total: u64,
    pub databases: Vec<Database>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionList {
    pub total: u64,
    pub collections: Vec<Collection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentList<T = Map<String, Value>> {
    pub total: u64,
    pub documents: Vec<Document<T>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateDatabaseRequest<'a> {
    pub(crate) database_id: &'a str,
    pub(crate) name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateCollectionRequest<'a> {
    pub(crate) collection_id: &'a str,
    pub(crate) name: &'a str,
    pub(crate) permissions: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateDocumentRequest<'a, T: ?Sized> {
    pub(crate) document_id: &'a str,
    pub(crate) data: &'a T,
    pub(crate) permissions: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateDocumentRequest<'a, T: ?Sized> {
    pub(crate) data: &'a T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) permissions: Option<&'a [String]>,
}
