use crate::error::DillError;
use actix_web::HttpRequest;
use dill_reminders_infra::DillContext;

/// Only callers presenting the configured secret in the `x-api-key` header
/// are let through
pub fn protect_route(req: &HttpRequest, ctx: &DillContext) -> Result<(), DillError> {
    let api_key = match req.headers().get("x-api-key") {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(DillError::Unauthorized(
                    "Malformed api key provided".to_string(),
                ))
            }
        },
        None => {
            return Err(DillError::Unauthorized(
                "Unable to find api-key in x-api-key header".to_string(),
            ))
        }
    };

    if api_key != ctx.config.api_secret_key {
        return Err(DillError::Unauthorized(
            "Invalid api-key provided in x-api-key header".to_string(),
        ));
    }

    Ok(())
}
