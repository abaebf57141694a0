use crate::error::ApiError;
use crate::shared::{
    auth::protect_internal_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use barber_reminders_api_structs::get_settings::{APIResponse, PathParams};
use barber_reminders_domain::WhatsappSettings;
use barber_reminders_infra::ReminderContext;

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::StorageError => ApiError::InternalError,
    }
}

pub async fn get_settings_controller(
    http_req: HttpRequest,
    ctx: web::Data<ReminderContext>,
    path: web::Path<PathParams>,
) -> Result<HttpResponse, ApiError> {
    protect_internal_route(&http_req, &ctx)?;

    let usecase = GetSettingsUseCase {
        barbershop_id: path.barbershop_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse::new(settings)))
        .map_err(handle_error)
}

/// Settings of the barbershop, which is created with the defaults on first access
#[derive(Debug)]
struct GetSettingsUseCase {
    pub barbershop_id: String,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSettingsUseCase {
    type Response = WhatsappSettings;

    type Errors = UseCaseError;

    const NAME: &'static str = "GetSettings";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .tenants
            .get_or_create(&self.barbershop_id)
            .await
            .map(|tenant| tenant.settings())
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn it_creates_barbershop_with_default_settings() {
        let ctx = ReminderContext::create_inmemory();
        let mut usecase = GetSettingsUseCase {
            barbershop_id: "7".into(),
        };

        let settings = usecase.execute(&ctx).await.unwrap();
        assert_eq!(settings, WhatsappSettings::default());
        assert!(ctx.repos.tenants.find("7").await.unwrap().is_some());
    }
}
