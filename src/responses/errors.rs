use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

pub use crate::errors::ResultResp;

/// Upstream statuses we can't pass through become a plain 502.
const BAD_GATEWAY: u16 = 502;

/// Convert a ServerError into a JSON error response
pub fn error_to_response(err: ServerError) -> Response {
    match err {
        ServerError::NotFound => json_error_response(404, json!({ "error": "Not Found" })),

        ServerError::MethodNotAllowed => {
            json_error_response(405, json!({ "error": "Method Not Allowed" }))
        }

        ServerError::BadRequest(msg) => json_error_response(400, json!({ "error": msg })),

        ServerError::Unauthorized => json_error_response(401, json!({ "error": "Unauthorized" })),

        ServerError::Misconfigured(msg) => {
            tracing::error!(msg = msg.as_str(), "service misconfigured");
            json_error_response(500, json!({ "error": "Service is not configured" }))
        }

        ServerError::Upstream { status, details } => {
            tracing::warn!(status, details = details.as_str(), "listings API request failed");
            let status = if (400..=599).contains(&status) {
                status
            } else {
                BAD_GATEWAY
            };
            json_error_response(
                status,
                json!({ "error": "Listings API request failed", "details": details }),
            )
        }

        ServerError::Internal(msg) => {
            tracing::error!(msg = msg.as_str(), "internal error");
            json_error_response(500, json!({ "error": "Internal Server Error" }))
        }
    }
}

fn json_error_response(status: u16, body: serde_json::Value) -> Response {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
