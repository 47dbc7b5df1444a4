//! Storage module.
//!
//! Buckets and the files stored in them. Uploads are sent as multipart
//! forms; downloads and previews come back as raw bytes.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use appwrite_sdk::{Client, InputFile};
//! # async fn run(client: Client) -> appwrite_sdk::core::Result<()> {
//! let storage = client.storage()?;
//!
//! let upload = InputFile::from_bytes("hello.txt", b"Hello, World!".to_vec())
//!     .with_mime_type("text/plain");
//! let file = storage.create_file("uploads", "unique()", upload, &[]).await?;
//!
//! let content = storage.download_file("uploads", &file.id).await?;
//! assert_eq!(&content[..], b"Hello, World!");
//! # Ok(())
//! # }
//! ```

pub mod models;


use crate::core::call::{Call, Endpoint, InputFile};
use crate::core::transport::Transport;
use crate::Service;
use bytes::Bytes;
use models::{Bucket, BucketList, CreateBucket, File, FileList, PreviewOptions};

const BUCKET: &str = "storage/buckets/{bucketId}";
const FILES: &str = "storage/buckets/{bucketId}/files";
const FILE: &str = "storage/buckets/{bucketId}/files/{fileId}";

#[derive(Clone)]
pub struct Storage {
    transport: Transport,
}

impl Service for Storage {
    fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }
}

impl Storage {
    pub fn create_bucket(&self, bucket: &CreateBucket) -> Call<Bucket> {
        self.transport
            .json(Endpoint::post("storage/buckets").json(bucket))
    }

    pub fn list_buckets(&self) -> Call<BucketList> {
        self.transport.json(Endpoint::get("storage/buckets"))
    }

    pub fn get_bucket(&self, bucket_id: &str) -> Call<Bucket> {
        self.transport
            .json(Endpoint::get(BUCKET).path_param("bucketId", bucket_id))
    }

    pub fn delete_bucket(&self, bucket_id: &str) -> Call<()> {
        self.transport
            .empty(Endpoint::delete(BUCKET).path_param("bucketId", bucket_id))
    }

    /// Uploads `file` in a single multipart request.
    pub fn create_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        file: InputFile,
        permissions: &[String],
    ) -> Call<File> {
        let mut endpoint = Endpoint::post(FILES)
            .path_param("bucketId", bucket_id)
            .text_part("fileId", file_id)
            .file_part("file", file);
        for permission in permissions {
            endpoint = endpoint.text_part("permissions[]", permission);
        }
        self.transport.json(endpoint)
    }

    pub fn list_files(&self, bucket_id: &str) -> Call<FileList> {
        self.transport
            .json(Endpoint::get(FILES).path_param("bucketId", bucket_id))
    }

    pub fn get_file(&self, bucket_id: &str, file_id: &str) -> Call<File> {
        self.transport.json(file(Endpoint::get(FILE), bucket_id, file_id))
    }

    pub fn delete_file(&self, bucket_id: &str, file_id: &str) -> Call<()> {
        self.transport
            .empty(file(Endpoint::delete(FILE), bucket_id, file_id))
    }

    /// Downloads the file content. Use
    /// [`Call::execute_stream`] on the result to avoid buffering large files.
    pub fn download_file(&self, bucket_id: &str, file_id: &str) -> Call<Bytes> {
        self.transport.bytes(file(
            Endpoint::get("storage/buckets/{bucketId}/files/{fileId}/download"),
            bucket_id,
            file_id,
        ))
    }

    /// Renders an image preview of the file.
    pub fn get_file_preview(
        &self,
        bucket_id: &str,
        file_id: &str,
        options: &PreviewOptions,
    ) -> Call<Bytes> {
        let endpoint = file(
            Endpoint::get("storage/buckets/{bucketId}/files/{fileId}/preview"),
            bucket_id,
            file_id,
        )
        .query_opt("width", options.width)
        .query_opt("height", options.height)
        .query_opt("gravity", options.gravity.as_deref())
        .query_opt("quality", options.quality)
        .query_opt("borderWidth", options.border_width)
        .query_opt("borderColor", options.border_color.as_deref())
        .query_opt("borderRadius", options.border_radius)
        .query_opt("opacity", options.opacity)
        .query_opt("rotation", options.rotation)
        .query_opt("background", options.background.as_deref())
        .query_opt("output", options.output.as_deref());

        self.transport.bytes(endpoint)
    }
}

fn file(endpoint: Endpoint, bucket_id: &str, file_id: &str) -> Endpoint {
    endpoint
        .path_param("bucketId", bucket_id)
        .path_param("fileId", file_id)
}
