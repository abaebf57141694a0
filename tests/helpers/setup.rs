use barber_reminders_api::Application;
use barber_reminders_infra::{Config, InMemoryMessagingGateway, ReminderContext, StaticTimeSys};
use barber_reminders_sdk::ReminderSDK;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

pub const INTERNAL_API_KEY: &str = "test-internal-key";

pub struct TestApp {
    pub config: Config,
    pub ctx: ReminderContext,
    pub gateway: Arc<InMemoryMessagingGateway>,
}

/// The frozen local time the application runs at
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 10)
        .and_then(|date| date.and_hms_opt(14, 2, 0))
        .expect("Valid date")
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, ReminderSDK, String) {
    let mut ctx = ReminderContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.internal_api_key = INTERNAL_API_KEY.into();
    ctx.config.send_reminders_job_enabled = false;
    ctx.config.timezone = chrono_tz::Tz::UTC;
    ctx.sys = Arc::new(StaticTimeSys::at_local(&ctx.config.timezone, now()));
    let gateway = Arc::new(InMemoryMessagingGateway::new());
    ctx.gateway = gateway.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        ctx,
        gateway,
    };
    let sdk = ReminderSDK::new(address.clone(), INTERNAL_API_KEY);
    (app, sdk, address)
}
