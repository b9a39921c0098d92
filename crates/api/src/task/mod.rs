mod complete_task;
mod create_task;
mod delete_task;
mod get_task;
mod get_task_calendar;
mod get_tasks;
mod subscribers;
mod update_task;

use actix_web::web;
use complete_task::complete_task_controller;
use create_task::create_task_controller;
use delete_task::delete_task_controller;
use get_task::get_task_controller;
use get_task_calendar::get_task_calendar_controller;
use get_tasks::get_tasks_controller;
use update_task::update_task_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/user/{user_id}/tasks", web::post().to(create_task_controller));
    cfg.route("/user/{user_id}/tasks", web::get().to(get_tasks_controller));
    // Registered before `{task_id}` so that it is not parsed as an id
    cfg.route(
        "/user/{user_id}/tasks/calendar",
        web::get().to(get_task_calendar_controller),
    );
    cfg.route(
        "/user/{user_id}/tasks/{task_id}",
        web::get().to(get_task_controller),
    );
    cfg.route(
        "/user/{user_id}/tasks/{task_id}",
        web::put().to(update_task_controller),
    );
    cfg.route(
        "/user/{user_id}/tasks/{task_id}",
        web::delete().to(delete_task_controller),
    );
    cfg.route(
        "/user/{user_id}/tasks/{task_id}/complete",
        web::post().to(complete_task_controller),
    );
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use taskguide_domain::{Task, User};
    use taskguide_infra::TaskGuideContext;

    pub const HOUR: i64 = 1000 * 60 * 60;

    pub async fn insert_user(ctx: &TaskGuideContext) -> User {
        let user = User::new("johnny_b".into(), "johnny@example.com".into(), 0).unwrap();
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    pub async fn insert_task(ctx: &TaskGuideContext, user: &User, deadline: i64) -> Task {
        let task = Task::new(user.id.clone(), "Title".into(), deadline, deadline - HOUR).unwrap();
        ctx.repos.tasks.insert(&task).await.unwrap();
        task
    }
}
