mod send_daily_summaries;

use actix_web::web;
use send_daily_summaries::send_daily_summaries_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/summaries/send",
        web::post().to(send_daily_summaries_controller),
    );
}
