use crate::error::ApiError;
use crate::shared::{
    auth::protect_internal_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use barber_reminders_api_structs::send_reminder::{APIResponse, RequestBody};
use barber_reminders_domain::phone_digits;
use barber_reminders_infra::ReminderContext;
use tracing::info;

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::MissingField(field) => {
            ApiError::BadClientData(format!("The field `{}` is required", field))
        }
        UseCaseError::InvalidPhoneNumber => {
            ApiError::BadClientData("The phone number must contain digits".into())
        }
        UseCaseError::NotConnected(instance_name) => ApiError::ServiceUnavailable(format!(
            "WhatsApp instance: {} is not connected",
            instance_name
        )),
        UseCaseError::SendFailed => ApiError::InternalError,
    }
}

pub async fn send_reminder_controller(
    http_req: HttpRequest,
    ctx: web::Data<ReminderContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, ApiError> {
    protect_internal_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = SendReminderUseCase {
        barbershop_id: body.barbershop_id,
        instance_name: body.instance_name,
        phone_number: body.phone_number,
        message: body.message,
    };

    execute(usecase, &ctx)
        .await
        .map(|_| {
            HttpResponse::Ok().json(APIResponse {
                success: true,
                message: "Message sent".into(),
            })
        })
        .map_err(handle_error)
}

/// Sends a single message right away, outside of the reminder rules
#[derive(Debug)]
pub struct SendReminderUseCase {
    pub barbershop_id: String,
    pub instance_name: String,
    pub phone_number: String,
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingField(&'static str),
    InvalidPhoneNumber,
    NotConnected(String),
    SendFailed,
}

impl SendReminderUseCase {
    fn validate(&self) -> Result<(), UseCaseError> {
        let fields = [
            ("barbershopId", &self.barbershop_id),
            ("instanceName", &self.instance_name),
            ("phoneNumber", &self.phone_number),
            ("message", &self.message),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(UseCaseError::MissingField(*field)),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendReminderUseCase {
    type Response = ();

    type Errors = UseCaseError;

    const NAME: &'static str = "SendReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Errors> {
        self.validate()?;
        if phone_digits(&self.phone_number).is_empty() {
            return Err(UseCaseError::InvalidPhoneNumber);
        }

        let connection = ctx.gateway.check_connection(&self.instance_name).await;
        if !connection.is_connected() {
            return Err(UseCaseError::NotConnected(self.instance_name.clone()));
        }

        ctx.gateway
            .send_text(&self.instance_name, &self.phone_number, &self.message)
            .await
            .map_err(|_| UseCaseError::SendFailed)?;

        info!(
            "Message sent for barbershop: {} with instance: {}",
            self.barbershop_id, self.instance_name
        );
        Ok(())
    }
}
