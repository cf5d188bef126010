//! Response classification.

use reqwest::StatusCode;

use super::ClientError;

/// Map a response status to success (the body) or a typed error carrying
/// the body verbatim.
pub fn classify(status: StatusCode, body: String) -> Result<String, ClientError> {
    match status.as_u16() {
        200 => Ok(body),
        400 => Err(ClientError::BadEventState(body)),
        401 => Err(ClientError::Authorization(body)),
        403 => Err(ClientError::AppInactive(body)),
        404 => Err(ClientError::AppTokenNotFound(body)),
        413 => Err(ClientError::RequestSizeTooLarge(body)),
        451 => Err(ClientError::DeviceOptedOut(body)),
        500 => Err(ClientError::InternalServerError(body)),
        _ => Err(ClientError::Api { status, body }),
    }
}
