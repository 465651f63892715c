use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

use crate::storage::error::{buffer_too_small, response_retrieval_error, StorageResult};
use crate::storage::handle::ResponseHandle;

/// Fixed fields every upload response may carry.
///
/// Each field is read on its own: a member of another JSON type is treated as absent
/// without affecting the other.
#[derive(Clone, Debug, Default, Deserialize)]
struct FixedFields {
    #[serde(default, deserialize_with = "string_or_absent")]
    hash: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    key: Option<String>,
}

fn string_or_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// A fully received upload response: status line, headers and body bytes.
#[derive(Clone, Debug)]
pub struct ResponsePayload {
    pub status: u16,
    pub headers: HashMap<String, String>,
    body: Vec<u8>,
    fixed: FixedFields,
}

impl ResponsePayload {
    /// Builds a payload and extracts the fixed `hash` and `key` fields from the body.
    ///
    /// Bodies that are not a JSON object with string `hash`/`key` members simply yield no
    /// fixed fields; the raw body stays available through [`ResponseHandle::fetch_json_body`].
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        let fixed = if body.is_empty() {
            FixedFields::default()
        } else {
            serde_json::from_slice(&body).unwrap_or_default()
        };
        Self {
            status,
            headers,
            body,
            fixed,
        }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded lossily, for error reports.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl ResponseHandle for ResponsePayload {
    fn fetch_hash(&self, buffer: &mut [u8]) -> StorageResult<usize> {
        let hash = match self.fixed.hash.as_deref() {
            Some(hash) => hash.as_bytes(),
            None => return Ok(0),
        };
        let capacity = buffer.len();
        let target = buffer
            .get_mut(..hash.len())
            .ok_or_else(|| buffer_too_small(hash.len(), capacity))?;
        target.copy_from_slice(hash);
        Ok(hash.len())
    }

    fn fetch_key(&self) -> Option<&str> {
        self.fixed.key.as_deref()
    }

    fn fetch_json_body(&self) -> StorageResult<Option<&str>> {
        if self.body.is_empty() {
            return Ok(None);
        }
        std::str::from_utf8(&self.body).map(Some).map_err(|err| {
            response_retrieval_error(format!("upload response body is not UTF-8: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::error::StorageErrorCode;

    fn payload(body: &str) -> ResponsePayload {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        ResponsePayload::new(200, headers, body)
    }

    #[test]
    fn extracts_fixed_fields() {
        let payload = payload(r#"{"hash":"FmDZwqadA4-ib_15hYfQpb7UXUYR","key":"photos/cat.png"}"#);
        let mut buffer = [0u8; 64];
        let written = payload.fetch_hash(&mut buffer).unwrap();
        assert_eq!(&buffer[..written], b"FmDZwqadA4-ib_15hYfQpb7UXUYR");
        assert_eq!(payload.fetch_key(), Some("photos/cat.png"));
        assert_eq!(payload.header("content-type"), Some("application/json"));
    }

    #[test]
    fn missing_fields_are_absent() {
        let payload = payload(r#"{"persistentId":"z1.abc"}"#);
        let mut buffer = [0u8; 8];
        assert_eq!(payload.fetch_hash(&mut buffer).unwrap(), 0);
        assert_eq!(payload.fetch_key(), None);
        assert_eq!(
            payload.fetch_json_body().unwrap(),
            Some(r#"{"persistentId":"z1.abc"}"#)
        );
    }

    #[test]
    fn null_key_is_absent() {
        let payload = payload(r#"{"hash":"abc","key":null}"#);
        assert_eq!(payload.fetch_key(), None);
    }

    #[test]
    fn mistyped_key_keeps_hash() {
        let payload = payload(r#"{"hash":"FmDZwqadA4-ib_15hYfQpb7UXUYR","key":12345}"#);
        let mut buffer = [0u8; 64];
        let written = payload.fetch_hash(&mut buffer).unwrap();
        assert_eq!(&buffer[..written], b"FmDZwqadA4-ib_15hYfQpb7UXUYR");
        assert_eq!(payload.fetch_key(), None);
    }

    #[test]
    fn mistyped_hash_keeps_key() {
        let payload = payload(r#"{"hash":["not","text"],"key":"photos/cat.png"}"#);
        let mut buffer = [0u8; 64];
        assert_eq!(payload.fetch_hash(&mut buffer).unwrap(), 0);
        assert_eq!(payload.fetch_key(), Some("photos/cat.png"));
    }

    #[test]
    fn hash_larger_than_buffer_fails() {
        let payload = payload(r#"{"hash":"abcdef"}"#);
        let mut buffer = [0u8; 4];
        let err = payload.fetch_hash(&mut buffer).unwrap_err();
        assert_eq!(err.code, StorageErrorCode::BufferTooSmall);
    }

    #[test]
    fn empty_body_has_no_json() {
        let payload = ResponsePayload::new(200, HashMap::new(), Vec::new());
        assert_eq!(payload.fetch_json_body().unwrap(), None);
    }

    #[test]
    fn non_utf8_body_is_a_retrieval_error() {
        let payload = ResponsePayload::new(200, HashMap::new(), vec![0xff, 0xfe, 0x7b]);
        let err = payload.fetch_json_body().unwrap_err();
        assert_eq!(err.code, StorageErrorCode::ResponseRetrievalError);
    }
}
