use crate::error::ApiError;
use actix_web::HttpRequest;
use barber_reminders_infra::ReminderContext;
use barber_reminders_utils::secrets_match;

pub const INTERNAL_KEY_HEADER: &str = "x-internal-key";

/// The key is read from the `x-internal-key` header, or from an
/// `Authorization: Bearer <key>` header which is what most cron callers send
fn parse_internal_key(req: &HttpRequest) -> Option<&str> {
    if let Some(key) = req
        .headers()
        .get(INTERNAL_KEY_HEADER)
        .and_then(|key| key.to_str().ok())
    {
        return Some(key.trim());
    }

    req.headers()
        .get("authorization")
        .and_then(|auth| auth.to_str().ok())
        .and_then(|auth| auth.trim().strip_prefix("Bearer "))
        .map(|key| key.trim())
}

/// Only the services of the platform itself are allowed to call the protected routes
pub fn protect_internal_route(req: &HttpRequest, ctx: &ReminderContext) -> Result<(), ApiError> {
    match parse_internal_key(req) {
        Some(key) if secrets_match(&ctx.config.internal_api_key, key) => Ok(()),
        Some(_) => Err(ApiError::Unauthorized(
            "Invalid internal api key provided".into(),
        )),
        None => Err(ApiError::Unauthorized(format!(
            "Unable to find the internal api key. Use the `{}` header or a bearer token",
            INTERNAL_KEY_HEADER
        ))),
    }
}
