//! Upload response model for Qiniu object storage.
//!
//! An upload produces a [`ResponsePayload`]; [`complete_upload`] checks its status and wraps
//! it in an [`UploadResponse`], which resolves the content hash, the object key and any
//! policy-defined JSON fields lazily and caches each of them.
mod constants;
mod error;
mod handle;
mod logger;
mod options;
mod payload;
mod response;
mod uploader;

#[doc(inline)]
pub use constants::{DEFAULT_HASH_BUFFER_CAPACITY, DEFAULT_SUCCESS_CODES, MAX_HASH_BUFFER_CAPACITY};

#[doc(inline)]
pub use error::{
    buffer_too_small, invalid_argument, invalid_handle, invalid_response,
    response_retrieval_error, StorageError, StorageErrorCode, StorageResult,
};

#[doc(inline)]
pub use handle::ResponseHandle;

#[doc(inline)]
pub use options::UploadResponseOptions;

#[doc(inline)]
pub use payload::ResponsePayload;

#[doc(inline)]
pub use response::UploadResponse;

#[doc(inline)]
pub use uploader::{complete_upload, complete_upload_with_handle};
