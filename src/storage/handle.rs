use crate::storage::error::StorageResult;

/// Read access to the record produced by a completed upload.
///
/// Implementations are supplied by whatever performed the upload; the response view only
/// reads from them and never releases them.
pub trait ResponseHandle: Send + Sync {
    /// Copies the content hash into `buffer` and returns the number of bytes written.
    ///
    /// Returns `Ok(0)` when the service supplied no hash. Fails with
    /// [`StorageErrorCode::BufferTooSmall`](crate::storage::StorageErrorCode::BufferTooSmall)
    /// when the hash does not fit.
    fn fetch_hash(&self, buffer: &mut [u8]) -> StorageResult<usize>;

    /// Key assigned to the uploaded object, if the service returned one.
    fn fetch_key(&self) -> Option<&str>;

    /// The JSON body returned by the upload.
    ///
    /// `Ok(None)` means no body was returned; `Err` means the body exists but could not be read.
    fn fetch_json_body(&self) -> StorageResult<Option<&str>>;
}

impl<H> ResponseHandle for Box<H>
where
    H: ResponseHandle + ?Sized,
{
    fn fetch_hash(&self, buffer: &mut [u8]) -> StorageResult<usize> {
        (**self).fetch_hash(buffer)
    }

    fn fetch_key(&self) -> Option<&str> {
        (**self).fetch_key()
    }

    fn fetch_json_body(&self) -> StorageResult<Option<&str>> {
        (**self).fetch_json_body()
    }
}

impl<H> ResponseHandle for std::sync::Arc<H>
where
    H: ResponseHandle + ?Sized,
{
    fn fetch_hash(&self, buffer: &mut [u8]) -> StorageResult<usize> {
        (**self).fetch_hash(buffer)
    }

    fn fetch_key(&self) -> Option<&str> {
        (**self).fetch_key()
    }

    fn fetch_json_body(&self) -> StorageResult<Option<&str>> {
        (**self).fetch_json_body()
    }
}
