use crate::storage::constants::{
    DEFAULT_HASH_BUFFER_CAPACITY, DEFAULT_SUCCESS_CODES, MAX_HASH_BUFFER_CAPACITY,
};
use crate::storage::error::{invalid_argument, StorageResult};

/// Configuration applied when turning a completed upload into an [`UploadResponse`](crate::storage::UploadResponse).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadResponseOptions {
    hash_buffer_capacity: usize,
    /// HTTP status codes that mark an upload as completed.
    pub success_codes: Vec<u16>,
}

impl Default for UploadResponseOptions {
    fn default() -> Self {
        Self {
            hash_buffer_capacity: DEFAULT_HASH_BUFFER_CAPACITY,
            success_codes: DEFAULT_SUCCESS_CODES.to_vec(),
        }
    }
}

impl UploadResponseOptions {
    /// Sets the capacity of the buffer the response hash is copied into.
    ///
    /// Accepts `1..=MAX_HASH_BUFFER_CAPACITY`.
    pub fn with_hash_buffer_capacity(mut self, capacity: usize) -> StorageResult<Self> {
        if capacity == 0 || capacity > MAX_HASH_BUFFER_CAPACITY {
            return Err(invalid_argument(format!(
                "hash buffer capacity must be between 1 and {MAX_HASH_BUFFER_CAPACITY}, got {capacity}"
            )));
        }
        self.hash_buffer_capacity = capacity;
        Ok(self)
    }

    pub fn hash_buffer_capacity(&self) -> usize {
        self.hash_buffer_capacity
    }

    pub fn with_success_codes(mut self, codes: Vec<u16>) -> Self {
        self.success_codes = codes;
        self
    }

    pub fn is_success(&self, status: u16) -> bool {
        self.success_codes.contains(&status)
    }
}
