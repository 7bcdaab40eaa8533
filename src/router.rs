use crate::errors::ServerError;
use crate::responses::{error_to_response, json_response, ResultResp};
use crate::routes;
use crate::state::AppState;
use astra::{Request, Response};
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;

/// Request bodies past this size are cut off and will fail to parse.
pub const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Entry point for each server worker: routes the request, renders any
/// error as a JSON response and logs one line per request.
pub fn serve_request(req: Request, state: &AppState) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let resp = match handle(req, state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    };

    tracing::info!(%method, %path, status = resp.status().as_u16(), "request");
    resp
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    match (method.as_str(), path.as_str()) {
        ("GET", "/health") => json_response(200, &json!({ "status": "ok" })),

        ("POST", "/api/rent-comps") => routes::comps::rent_comps(req, state),

        ("POST", "/api/track-usage") => routes::usage::track_usage(req, state),
        ("GET", "/api/track-usage") => routes::usage::list_usage(req, state),

        (_, "/health" | "/api/rent-comps" | "/api/track-usage") => {
            Err(ServerError::MethodNotAllowed)
        }
        _ => Err(ServerError::NotFound),
    }
}

pub fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

pub fn header_value(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Reads the request body as UTF-8, up to `MAX_BODY_BYTES`.
pub fn read_body(req: Request) -> Result<String, ServerError> {
    let mut body = String::new();
    req.into_body()
        .reader()
        .take(MAX_BODY_BYTES)
        .read_to_string(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable request body: {e}")))?;
    Ok(body)
}
