use crate::auth::admin::{require_admin, ADMIN_KEY_HEADER};
use crate::responses::{json_response, ResultResp};
use crate::router::{header_value, parse_query, read_body};
use crate::state::AppState;
use crate::usage::{NewUsageEvent, UsageFilter};
use astra::Request;
use serde_json::json;

/// POST /api/track-usage
pub fn track_usage(req: Request, state: &AppState) -> ResultResp {
    let user_agent = header_value(&req, "user-agent");
    let body = read_body(req)?;

    let new = NewUsageEvent::from_json_body(&body)?;
    let event = state.usage.record(new, user_agent)?;

    tracing::debug!(id = %event.id, tool = %event.tool, event = %event.event, "usage recorded");

    json_response(200, &json!({ "success": true, "id": event.id }))
}

/// GET /api/track-usage, admin only.
pub fn list_usage(req: Request, state: &AppState) -> ResultResp {
    let params = parse_query(&req);
    let provided = header_value(&req, ADMIN_KEY_HEADER).or_else(|| params.get("key").cloned());

    require_admin(provided.as_deref(), state.admin_key.as_deref())?;

    let filter = UsageFilter::from_query(&params)?;
    let events = state.usage.query(&filter)?;

    json_response(200, &json!({ "count": events.len(), "events": events }))
}
