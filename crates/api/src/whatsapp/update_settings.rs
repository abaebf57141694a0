use crate::error::ApiError;
use crate::shared::{
    auth::protect_internal_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use barber_reminders_api_structs::dtos::TenantConfigDTO;
use barber_reminders_api_structs::update_settings::{APIResponse, PathParams, RequestBody};
use barber_reminders_domain::{SettingsError, TenantConfig, WhatsappSettings};
use barber_reminders_infra::ReminderContext;

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::InvalidSettings(err) => ApiError::BadClientData(format!(
            "Bad reminder settings provided. Error message: {}",
            err
        )),
        UseCaseError::StorageError => ApiError::InternalError,
    }
}

pub async fn update_settings_controller(
    http_req: HttpRequest,
    ctx: web::Data<ReminderContext>,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, ApiError> {
    protect_internal_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdateSettingsUseCase {
        barbershop_id: path.barbershop_id.clone(),
        settings: WhatsappSettings {
            message_template: body.message_template,
            reminders: body.reminders,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|tenant| {
            HttpResponse::Ok().json(APIResponse {
                success: true,
                config: TenantConfigDTO::new(tenant),
            })
        })
        .map_err(handle_error)
}

#[derive(Debug)]
struct UpdateSettingsUseCase {
    pub barbershop_id: String,
    pub settings: WhatsappSettings,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidSettings(SettingsError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateSettingsUseCase {
    type Response = TenantConfig;

    type Errors = UseCaseError;

    const NAME: &'static str = "UpdateSettings";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Errors> {
        self.settings
            .validate()
            .map_err(UseCaseError::InvalidSettings)?;

        let mut tenant = ctx
            .repos
            .tenants
            .get_or_create(&self.barbershop_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        tenant.set_settings(self.settings.clone());

        ctx.repos
            .tenants
            .save(&tenant)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok(tenant)
    }
}
