use crate::auth::token::secrets_match;
use crate::errors::ServerError;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Shared-secret gate for admin reads. No configured key means nobody gets in.
pub fn require_admin(provided: Option<&str>, expected: Option<&str>) -> Result<(), ServerError> {
    let Some(expected) = expected else {
        tracing::warn!("admin request rejected: ADMIN_KEY is not configured");
        return Err(ServerError::Unauthorized);
    };

    match provided.map(str::trim).filter(|p| !p.is_empty()) {
        Some(provided) if secrets_match(provided, expected) => Ok(()),
        _ => Err(ServerError::Unauthorized),
    }
}
