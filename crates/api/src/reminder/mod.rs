mod send_reminder;
mod send_reminders;

use actix_web::web;
use send_reminder::send_reminder_controller;
use send_reminders::send_reminders_controller;
pub use send_reminders::{AppointmentOutcome, SendRemindersUseCase, SweepReport};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/cron/send-reminders",
        web::get().to(send_reminders_controller),
    );
    cfg.route("/reminders/send", web::post().to(send_reminder_controller));
}
