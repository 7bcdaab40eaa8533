use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;

/// Serialize `body` as a JSON response with the given status.
pub fn json_response<T: Serialize>(status: u16, body: &T) -> ResultResp {
    let bytes = serde_json::to_vec(body)
        .map_err(|e| ServerError::Internal(format!("response serialization failed: {e}")))?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(bytes))
        .map_err(|e| ServerError::Internal(format!("response build failed: {e}")))
}
