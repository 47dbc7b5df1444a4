use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "$permissions", default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub file_security: bool,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub maximum_file_size: u64,
    #[serde(default)]
    pub allowed_file_extensions: Vec<String>,
    #[serde(default)]
    pub compression: String,
    #[serde(default)]
    pub encryption: bool,
    #[serde(default)]
    pub antivirus: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    #[serde(rename = "$id")]
    pub id: String,
    pub bucket_id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "$permissions", default)]
    pub permissions: Vec<String>,
    pub name: String,
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub size_original: u64,
    #[serde(default)]
    pub chunks_total: u32,
    #[serde(default)]
    pub chunks_uploaded: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketList {
    pub total: u64,
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileList {
    pub total: u64,
    pub files: Vec<File>,
}

/// Parameters for [`Storage::create_bucket`](super::Storage::create_bucket).
/// Unset options take the server defaults.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBucket {
    pub bucket_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_security: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_file_extensions: Option<Vec<String>>,
    /// `none`, `gzip` or `zstd`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antivirus: Option<bool>,
}

impl CreateBucket {
    pub fn new(bucket_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Image transformation applied by
/// [`Storage::get_file_preview`](super::Storage::get_file_preview).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// `center`, `top-left`, `top`, ...
    pub gravity: Option<String>,
    /// 0 to 100.
    pub quality: Option<u8>,
    pub border_width: Option<u32>,
    /// Hex color without the leading `#`.
    pub border_color: Option<String>,
    pub border_radius: Option<u32>,
    /// 0.0 to 1.0.
    pub opacity: Option<f64>,
    /// -360 to 360.
    pub rotation: Option<i32>,
    pub background: Option<String>,
    /// `jpg`, `png`, `webp`, `gif`, ...
    pub output: Option<String>,
}
