use crate::error::ApiError;
use crate::shared::{
    auth::protect_internal_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use barber_reminders_api_structs::get_connection_status::{APIResponse, PathParams};
use barber_reminders_domain::WhatsappConnection;
use barber_reminders_infra::ReminderContext;

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::StorageError => ApiError::InternalError,
    }
}

pub async fn get_status_controller(
    http_req: HttpRequest,
    ctx: web::Data<ReminderContext>,
    path: web::Path<PathParams>,
) -> Result<HttpResponse, ApiError> {
    protect_internal_route(&http_req, &ctx)?;

    let usecase = GetStatusUseCase {
        barbershop_id: path.barbershop_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|connection| HttpResponse::Ok().json(APIResponse::new(connection)))
        .map_err(handle_error)
}

/// Asks the gateway for the state of the barbershop instance and stores it
#[derive(Debug)]
struct GetStatusUseCase {
    pub barbershop_id: String,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetStatusUseCase {
    type Response = WhatsappConnection;

    type Errors = UseCaseError;

    const NAME: &'static str = "GetStatus";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Errors> {
        let mut tenant = ctx
            .repos
            .tenants
            .get_or_create(&self.barbershop_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let connection = ctx.gateway.check_connection(&tenant.instance_name()).await;
        tenant.update_connection(&connection);
        ctx.repos
            .tenants
            .save(&tenant)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(connection)
    }
}
