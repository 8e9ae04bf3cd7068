mod candidates;
mod delivery;
mod drain_manual;
mod get_reminder;
mod request_manual_reminder;
mod run_dispatch;

use actix_web::web;
use drain_manual::drain_manual_reminders_controller;
use get_reminder::get_reminder_controller;
use request_manual_reminder::request_manual_reminder_controller;
use run_dispatch::run_dispatch_controller;

pub use candidates::fetch_all_assignments;
pub use run_dispatch::RunDispatchUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/dispatch",
        web::post().to(run_dispatch_controller),
    );
    cfg.route(
        "/reminders/manual",
        web::post().to(request_manual_reminder_controller),
    );
    cfg.route(
        "/reminders/manual/drain",
        web::post().to(drain_manual_reminders_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
}
