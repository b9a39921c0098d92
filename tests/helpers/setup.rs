use std::sync::Arc;
use taskguide_api::Application;
use taskguide_infra::{Config, InMemoryNotifier, StaticTimeSys, TaskGuideContext};
use taskguide_sdk::TaskGuideSDK;

pub const HOUR: i64 = 1000 * 60 * 60;
// Tue Apr 01 2025 00:00:00 UTC
pub const NOW: i64 = 1_743_465_600_000;

pub struct TestApp {
    pub config: Config,
    pub address: String,
    pub sys: Arc<StaticTimeSys>,
    pub notifier: Arc<InMemoryNotifier>,
}

impl TestApp {
    /// Sdk that is allowed to trigger reminders
    pub fn reminder_sdk(&self) -> TaskGuideSDK {
        TaskGuideSDK::with_reminder_key(
            self.address.clone(),
            self.config.reminder_trigger_secret.clone(),
        )
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, TaskGuideSDK) {
    let sys = Arc::new(StaticTimeSys::new(NOW));
    let notifier = Arc::new(InMemoryNotifier::new());

    let mut ctx = TaskGuideContext::create_inmemory();
    ctx.config.port = 0; // Random port
    // Reminders are triggered by the tests themselves
    ctx.config.reminder_job_enabled = false;
    ctx.sys = sys.clone();
    ctx.notifier = notifier.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx)
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
        address: address.clone(),
        sys,
        notifier,
    };
    let sdk = TaskGuideSDK::new(address);
    (app, sdk)
}
