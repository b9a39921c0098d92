mod error;
mod job_schedulers;
mod reminder;
mod shared;
mod statistics;
mod status;
mod task;
mod user;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use job_schedulers::{TaskRemindersJob, TaskRemindersJobHandle};
use std::net::TcpListener;
use std::time::Duration;
use taskguide_infra::TaskGuideContext;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use reminder::send_task_reminders::SendTaskRemindersUseCase;
pub use shared::auth::REMINDER_KEY_HEADER;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    reminder::configure_routes(cfg);
    statistics::configure_routes(cfg);
    status::configure_routes(cfg);
    task::configure_routes(cfg);
    user::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    reminders_job: Option<TaskRemindersJobHandle>,
}

impl Application {
    pub async fn new(context: TaskGuideContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let reminders_job = Application::start_job_schedulers(context);

        Ok(Self {
            server,
            port,
            reminders_job,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: TaskGuideContext) -> Option<TaskRemindersJobHandle> {
        if !context.config.reminder_job_enabled {
            info!("Task reminders job is disabled");
            return None;
        }
        let interval = Duration::from_secs(context.config.reminder_job_interval_secs);
        Some(TaskRemindersJob::new(context, interval).start())
    }

    async fn configure_server(context: TaskGuideContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        if let Some(job) = self.reminders_job {
            job.stop();
            job.stopped().await;
        }
        res
    }
}
