//! Response decoders selected per endpoint.
//!
//! Decoding is lenient about framing only: a UTF-8 byte-order mark and
//! surrounding whitespace are ignored. Anything serde_json rejects is an
//! [`Error::Deserialization`].

use crate::core::{Error, Result};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Longest body excerpt kept on a decode failure.
const MAX_ERROR_BODY_LEN: usize = 1024;

/// Signature shared by all decoders so a call can carry one as a plain `fn`.
pub type Decoder<T> = fn(Bytes) -> Result<T>;

pub fn decode_json<T: DeserializeOwned>(body: Bytes) -> Result<T> {
    let trimmed = trim_framing(&body);
    serde_json::from_slice(trimmed).map_err(|source| Error::Deserialization {
        source,
        body: excerpt(trimmed),
    })
}

/// For endpoints that answer `204 No Content` or a body nobody reads.
pub fn decode_empty(_body: Bytes) -> Result<()> {
    Ok(())
}

pub fn decode_bytes(body: Bytes) -> Result<Bytes> {
    Ok(body)
}

pub(crate) fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| Error::Serialization(e.to_string()))
}

fn trim_framing(body: &[u8]) -> &[u8] {
    let body = body.strip_prefix(BOM).unwrap_or(body);
    body.trim_ascii()
}

fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= MAX_ERROR_BODY_LEN {
        return text.into_owned();
    }
    let mut end = MAX_ERROR_BODY_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated)", &text[..end])
}
