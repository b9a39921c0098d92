use crate::error::TaskGuideError;
use actix_web::HttpRequest;
use taskguide_infra::TaskGuideContext;

pub const REMINDER_KEY_HEADER: &str = "taskguide-reminder-key";

/// Only lets through requests that know the secret for triggering reminders
pub fn protect_reminder_route(
    req: &HttpRequest,
    ctx: &TaskGuideContext,
) -> Result<(), TaskGuideError> {
    let key = req
        .headers()
        .get(REMINDER_KEY_HEADER)
        .and_then(|key| key.to_str().ok());

    match key {
        Some(key) if key == ctx.config.reminder_trigger_secret => Ok(()),
        Some(_) => Err(TaskGuideError::Unauthorized(format!(
            "Invalid value provided in the `{}` header",
            REMINDER_KEY_HEADER
        ))),
        None => Err(TaskGuideError::Unauthorized(format!(
            "Missing the `{}` header",
            REMINDER_KEY_HEADER
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn rejects_requests_without_valid_reminder_key() {
        let mut ctx = TaskGuideContext::create_inmemory();
        ctx.config.reminder_trigger_secret = "secret".into();

        let req = TestRequest::default()
            .insert_header((REMINDER_KEY_HEADER, "secret"))
            .to_http_request();
        assert!(protect_reminder_route(&req, &ctx).is_ok());

        let req = TestRequest::default()
            .insert_header((REMINDER_KEY_HEADER, "wrong"))
            .to_http_request();
        assert!(protect_reminder_route(&req, &ctx).is_err());

        let req = TestRequest::default().to_http_request();
        assert!(protect_reminder_route(&req, &ctx).is_err());
    }
}
