use std::sync::atomic::{AtomicUsize, Ordering};

use crate::storage::{buffer_too_small, response_retrieval_error, ResponseHandle, StorageResult};

/// A [`ResponseHandle`] with fixed contents that counts how often each field is fetched.
///
/// Body reads can be scripted to fail a number of times before succeeding.
#[derive(Debug, Default)]
pub struct ScriptedHandle {
    hash: Vec<u8>,
    reported_hash_len: Option<usize>,
    key: Option<String>,
    body: Option<String>,
    failing_body_reads: AtomicUsize,
    hash_calls: AtomicUsize,
    key_calls: AtomicUsize,
    body_calls: AtomicUsize,
}

impl ScriptedHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hash(mut self, hash: impl Into<Vec<u8>>) -> Self {
        self.hash = hash.into();
        self
    }

    /// Makes `fetch_hash` report `len` bytes written regardless of what it copied.
    pub fn reporting_hash_len(mut self, len: usize) -> Self {
        self.reported_hash_len = Some(len);
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn failing_body_reads(self, count: usize) -> Self {
        self.failing_body_reads.store(count, Ordering::SeqCst);
        self
    }

    pub fn hash_calls(&self) -> usize {
        self.hash_calls.load(Ordering::SeqCst)
    }

    pub fn key_calls(&self) -> usize {
        self.key_calls.load(Ordering::SeqCst)
    }

    pub fn body_calls(&self) -> usize {
        self.body_calls.load(Ordering::SeqCst)
    }
}

impl ResponseHandle for ScriptedHandle {
    fn fetch_hash(&self, buffer: &mut [u8]) -> StorageResult<usize> {
        self.hash_calls.fetch_add(1, Ordering::SeqCst);
        if self.hash.len() > buffer.len() {
            return Err(buffer_too_small(self.hash.len(), buffer.len()));
        }
        buffer[..self.hash.len()].copy_from_slice(&self.hash);
        Ok(self.reported_hash_len.unwrap_or(self.hash.len()))
    }

    fn fetch_key(&self) -> Option<&str> {
        self.key_calls.fetch_add(1, Ordering::SeqCst);
        self.key.as_deref()
    }

    fn fetch_json_body(&self) -> StorageResult<Option<&str>> {
        self.body_calls.fetch_add(1, Ordering::SeqCst);
        let failed = self
            .failing_body_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failed {
            return Err(response_retrieval_error("scripted body read failure"));
        }
        Ok(self.body.as_deref())
    }
}
