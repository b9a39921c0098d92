pub mod send_task_reminders;

use actix_web::web;
use send_task_reminders::send_task_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/send",
        web::post().to(send_task_reminders_controller),
    );
}
