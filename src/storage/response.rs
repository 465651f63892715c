use once_cell::sync::OnceCell;
use serde_json::{Map, Value};
use std::fmt;

use crate::storage::constants::MAX_HASH_BUFFER_CAPACITY;
use crate::storage::error::{buffer_too_small, invalid_handle, invalid_response, StorageResult};
use crate::storage::handle::ResponseHandle;
use crate::storage::logger::LOGGER;
use crate::storage::options::UploadResponseOptions;

/// Read-only view over the response of a completed upload.
///
/// The fixed `hash` and `key` fields and the JSON body are fetched from the underlying
/// handle on first access and cached for the lifetime of the view. Fields added by the
/// upload policy's return body are looked up by name with [`UploadResponse::get`]; the
/// body is parsed at most once.
///
/// Values are built by the uploader (see [`complete_upload`](crate::storage::complete_upload)).
pub struct UploadResponse {
    handle: Box<dyn ResponseHandle>,
    hash_buffer_capacity: usize,
    hash: OnceCell<Option<Vec<u8>>>,
    key: OnceCell<Option<String>>,
    json: OnceCell<Option<String>>,
    parsed_json: OnceCell<Option<Map<String, Value>>>,
}

impl UploadResponse {
    pub(crate) fn from_handle(
        handle: Option<Box<dyn ResponseHandle>>,
        options: &UploadResponseOptions,
    ) -> StorageResult<Self> {
        let handle = handle.ok_or_else(invalid_handle)?;
        Ok(Self {
            handle,
            hash_buffer_capacity: options.hash_buffer_capacity().min(MAX_HASH_BUFFER_CAPACITY),
            hash: OnceCell::new(),
            key: OnceCell::new(),
            json: OnceCell::new(),
            parsed_json: OnceCell::new(),
        })
    }

    /// Content hash reported by the service, or `None` if it sent none.
    pub fn hash(&self) -> StorageResult<Option<&[u8]>> {
        self.hash
            .get_or_try_init(|| -> StorageResult<_> {
                let mut buffer = vec![0u8; self.hash_buffer_capacity];
                let written = self.handle.fetch_hash(&mut buffer)?;
                if written > buffer.len() {
                    return Err(buffer_too_small(written, buffer.len()));
                }
                LOGGER.debug(format!("upload response hash resolved ({written} bytes)"));
                if written == 0 {
                    return Ok(None);
                }
                buffer.truncate(written);
                Ok(Some(buffer))
            })
            .map(Option::as_deref)
    }

    /// The hash as text. Qiniu hashes are URL-safe base64 etags.
    pub fn hash_str(&self) -> StorageResult<Option<&str>> {
        match self.hash()? {
            Some(bytes) => std::str::from_utf8(bytes)
                .map(Some)
                .map_err(|err| invalid_response(format!("upload response hash is not UTF-8: {err}"))),
            None => Ok(None),
        }
    }

    /// Key assigned to the uploaded object.
    pub fn key(&self) -> Option<&str> {
        self.key
            .get_or_init(|| {
                let key = self.handle.fetch_key().map(str::to_owned);
                LOGGER.debug(format!(
                    "upload response key resolved (present: {})",
                    key.is_some()
                ));
                key
            })
            .as_deref()
    }

    /// Raw JSON body of the response.
    ///
    /// A failed retrieval is returned as an error and is not cached, so a later call asks
    /// the handle again.
    pub fn raw_json(&self) -> StorageResult<Option<&str>> {
        self.json
            .get_or_try_init(|| match self.handle.fetch_json_body() {
                Ok(body) => {
                    LOGGER.debug(format!(
                        "upload response body resolved (present: {})",
                        body.is_some()
                    ));
                    Ok(body.map(str::to_owned))
                }
                Err(err) => {
                    LOGGER.warn(format!("failed to read upload response body: {}", err.code_str()));
                    Err(err)
                }
            })
            .map(Option::as_deref)
    }

    /// All fields of the parsed JSON body, or `None` when the response has no body.
    pub fn fields(&self) -> StorageResult<Option<&Map<String, Value>>> {
        self.parsed_json
            .get_or_try_init(|| -> StorageResult<_> {
                let Some(raw) = self.raw_json()? else {
                    return Ok(None);
                };
                match serde_json::from_str::<Value>(raw) {
                    Ok(Value::Object(map)) => {
                        LOGGER.debug(format!("upload response body parsed ({} fields)", map.len()));
                        Ok(Some(map))
                    }
                    Ok(_) => Err(invalid_response("upload response body is not a JSON object")),
                    Err(err) => Err(invalid_response(format!(
                        "upload response body is not valid JSON: {err}"
                    ))),
                }
            })
            .map(Option::as_ref)
    }

    /// Looks up a field of the JSON body by name.
    ///
    /// `Ok(None)` means the field (or the whole body) is absent. A field holding JSON
    /// `null` is returned as `Some(&Value::Null)`.
    pub fn get(&self, name: &str) -> StorageResult<Option<&Value>> {
        Ok(self.fields()?.and_then(|fields| fields.get(name)))
    }

    /// Whether the JSON body has a field called `name`, even if it holds `null`.
    pub fn contains(&self, name: &str) -> StorageResult<bool> {
        Ok(self.get(name)?.is_some())
    }

    /// String field of the JSON body; `None` if absent or not a string.
    pub fn get_str(&self, name: &str) -> StorageResult<Option<&str>> {
        Ok(self.get(name)?.and_then(Value::as_str))
    }

    /// Integer field of the JSON body that fits in `i64`.
    pub fn get_i64(&self, name: &str) -> StorageResult<Option<i64>> {
        Ok(self.get(name)?.and_then(Value::as_i64))
    }

    /// Non-negative integer field of the JSON body that fits in `u64`.
    pub fn get_u64(&self, name: &str) -> StorageResult<Option<u64>> {
        Ok(self.get(name)?.and_then(Value::as_u64))
    }

    /// Numeric field of the JSON body as `f64`.
    pub fn get_f64(&self, name: &str) -> StorageResult<Option<f64>> {
        Ok(self.get(name)?.and_then(Value::as_f64))
    }

    /// Boolean field of the JSON body.
    pub fn get_bool(&self, name: &str) -> StorageResult<Option<bool>> {
        Ok(self.get(name)?.and_then(Value::as_bool))
    }

    /// The parsed body as a JSON object, or `Value::Null` when there is no body.
    pub fn to_value(&self) -> StorageResult<Value> {
        Ok(self
            .fields()?
            .map(|fields| Value::Object(fields.clone()))
            .unwrap_or(Value::Null))
    }
}

impl fmt::Debug for UploadResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadResponse").finish_non_exhaustive()
    }
}
