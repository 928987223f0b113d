use gloo_net::http::Request;
use labbook_core::{BookingAck, BookingRecord, SubmitError};

/// Post `record` to `endpoint` once and read the JSON acknowledgement.
///
/// The HTTP status is not inspected: any JSON body is an acknowledgement,
/// anything else is a transport failure.
///
/// # Errors
/// Returns [`SubmitError::Transport`] when the request cannot be built or sent,
/// and [`SubmitError::Malformed`] when the body is not an acknowledgement.
#[allow(clippy::future_not_send)] // gloo futures wrap `JsFuture`, which is not `Send`.
pub async fn submit_booking(
    endpoint: &str,
    record: &BookingRecord,
) -> Result<BookingAck, SubmitError> {
    let response = Request::post(endpoint)
        .json(record)
        .map_err(|e| SubmitError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| SubmitError::Transport(e.to_string()))?;

    log::debug!("booking {} answered with HTTP {}", record.id, response.status());
    response
        .json::<BookingAck>()
        .await
        .map_err(|e| SubmitError::Malformed(e.to_string()))
}
