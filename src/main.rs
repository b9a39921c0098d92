mod telemetry;

use taskguide_api::Application;
use taskguide_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("taskguide_server".into(), "info".into());
    init_subscriber(subscriber)?;

    info!("Running database migrations");
    run_migration().await?;

    let context = setup_context().await?;

    let app = Application::new(context).await?;
    info!("TaskGuide server listening on port: {}", app.port());
    app.start().await?;

    Ok(())
}
