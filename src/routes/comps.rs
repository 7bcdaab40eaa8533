use crate::comps::QueryCriteria;
use crate::responses::{json_response, ResultResp};
use crate::router::read_body;
use crate::state::AppState;
use astra::Request;

/// POST /api/rent-comps
pub fn rent_comps(req: Request, state: &AppState) -> ResultResp {
    state.listings.ensure_configured()?;

    let body = read_body(req)?;
    let criteria = QueryCriteria::from_json_body(&body)?;
    let summary = state.listings.estimate(&criteria)?;

    tracing::info!(
        zip = %criteria.zip,
        comps = summary.comps_count,
        "rent comps computed"
    );

    json_response(200, &summary)
}
