use serde_json::Value;

use crate::storage::error::{invalid_response, StorageResult};
use crate::storage::handle::ResponseHandle;
use crate::storage::logger::LOGGER;
use crate::storage::options::UploadResponseOptions;
use crate::storage::payload::ResponsePayload;
use crate::storage::response::UploadResponse;

/// Turns the payload of a finished upload request into an [`UploadResponse`].
///
/// Fails with `storage/invalid-response` when the status is not one of
/// `options.success_codes`; the error carries the status and the service's error message.
pub fn complete_upload(
    payload: ResponsePayload,
    options: &UploadResponseOptions,
) -> StorageResult<UploadResponse> {
    if !options.is_success(payload.status) {
        LOGGER.warn(format!(
            "upload finished with unexpected status {}",
            payload.status
        ));
        return Err(invalid_response("upload did not complete successfully")
            .with_status(payload.status)
            .with_server_response(server_error_message(&payload)));
    }
    complete_upload_with_handle(Some(payload), options)
}

/// Builds an [`UploadResponse`] over a custom handle.
///
/// `None` fails with `storage/invalid-handle`.
pub fn complete_upload_with_handle<H>(
    handle: Option<H>,
    options: &UploadResponseOptions,
) -> StorageResult<UploadResponse>
where
    H: ResponseHandle + 'static,
{
    UploadResponse::from_handle(
        handle.map(|handle| Box::new(handle) as Box<dyn ResponseHandle>),
        options,
    )
}

/// Error bodies look like `{"error": "..."}`; anything else is reported verbatim.
fn server_error_message(payload: &ResponsePayload) -> String {
    serde_json::from_slice::<Value>(payload.body())
        .ok()
        .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| payload.body_text())
}
