use crate::{reminder::send_task_reminders::SendTaskRemindersUseCase, shared::usecase::execute};
use actix_web::rt::task::JoinHandle;
use std::time::Duration;
use taskguide_infra::TaskGuideContext;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

const DEFAULT_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Periodically sends the deadline reminders that are due.
///
/// The first run happens right away when started and the next ones every
/// `interval` after that. Runs never overlap, a slow run pushes the next one back.
pub struct TaskRemindersJob {
    ctx: TaskGuideContext,
    interval: Duration,
}

/// Controls a started `TaskRemindersJob`
pub struct TaskRemindersJobHandle {
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

impl TaskRemindersJobHandle {
    /// Stops the job. A run that is in progress is allowed to finish.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Waits until the job has stopped
    pub async fn stopped(self) {
        if let Err(e) = self.join.await {
            error!("Task reminders job ended abnormally: {:?}", e);
        }
    }
}

impl TaskRemindersJob {
    pub fn new(ctx: TaskGuideContext, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            warn!(
                "Task reminders job can not run with an empty interval, using {} seconds instead",
                DEFAULT_INTERVAL.as_secs()
            );
            DEFAULT_INTERVAL
        } else {
            interval
        };
        Self { ctx, interval }
    }

    pub fn start(self) -> TaskRemindersJobHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let join = actix_web::rt::spawn(async move { self.run(token).await });

        TaskRemindersJobHandle { cancel, join }
    }

    async fn run(self, cancel: CancellationToken) {
        info!(
            "Task reminders job started with an interval of {} seconds",
            self.interval.as_secs_f64()
        );
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            // A failing or panicking run must not take the job down with it
            let ctx = self.ctx.clone();
            let run = actix_web::rt::spawn(async move { send_reminders(ctx).await });
            if let Err(e) = run.await {
                error!("Task reminders job run panicked: {:?}", e);
            }
        }

        info!("Task reminders job stopped");
    }
}

async fn send_reminders(ctx: TaskGuideContext) {
    let usecase = SendTaskRemindersUseCase {
        now: ctx.sys.get_timestamp_millis(),
    };

    // Errors are logged by `execute`
    if let Ok(res) = execute(usecase, &ctx).await {
        info!(
            "Task reminders job run done. Sent: {}, failed: {}",
            res.sent, res.failed
        );
    }
}
