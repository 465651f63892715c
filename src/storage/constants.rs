/// Default capacity of the buffer a response hash is copied into.
///
/// Exceeds every currently defined hash output: a hex-encoded SHA-512 digest is 128 bytes
/// and a Qiniu etag is 28 bytes.
pub const DEFAULT_HASH_BUFFER_CAPACITY: usize = 256;

/// Largest hash buffer an [`UploadResponseOptions`](crate::storage::UploadResponseOptions) accepts.
pub const MAX_HASH_BUFFER_CAPACITY: usize = 4096;

pub const DEFAULT_SUCCESS_CODES: [u16; 1] = [200];
