mod get_statistics;

use actix_web::web;
use get_statistics::get_statistics_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user/{user_id}/statistics",
        web::get().to(get_statistics_controller),
    );
}
