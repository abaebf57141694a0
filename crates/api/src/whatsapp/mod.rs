mod get_settings;
mod get_status;
mod update_settings;

use actix_web::web;
use get_settings::get_settings_controller;
use get_status::get_status_controller;
use update_settings::update_settings_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/whatsapp/{barbershopId}/settings",
        web::get().to(get_settings_controller),
    );
    cfg.route(
        "/whatsapp/{barbershopId}/settings",
        web::put().to(update_settings_controller),
    );
    cfg.route(
        "/whatsapp/{barbershopId}/status",
        web::get().to(get_status_controller),
    );
}
