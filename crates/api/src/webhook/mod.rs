use actix_web::{web, HttpResponse};
use barber_reminders_api_structs::receive_evolution_webhook::{APIResponse, RequestBody};
use tracing::info;

/// Events from the gateway are only logged
async fn receive_evolution_webhook_controller(body: web::Json<RequestBody>) -> HttpResponse {
    info!(
        "Evolution webhook received. Event: {}, instance: {}",
        body.event.as_deref().unwrap_or("unknown"),
        body.instance.as_deref().unwrap_or("unknown")
    );

    HttpResponse::Ok().json(APIResponse { success: true })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/webhook/evolution",
        web::post().to(receive_evolution_webhook_controller),
    );
}
