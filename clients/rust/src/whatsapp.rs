use crate::{APIResponse, BaseClient};
use barber_reminders_api_structs::*;
use barber_reminders_domain::ReminderRule;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct WhatsappClient {
    base: Arc<BaseClient>,
}

pub struct UpdateSettingsInput {
    pub barbershop_id: String,
    pub message_template: String,
    pub reminders: Vec<ReminderRule>,
}

impl WhatsappClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_settings(
        &self,
        barbershop_id: &str,
    ) -> APIResponse<get_settings::APIResponse> {
        self.base
            .get(
                format!("whatsapp/{}/settings", barbershop_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn update_settings(
        &self,
        input: UpdateSettingsInput,
    ) -> APIResponse<update_settings::APIResponse> {
        let body = update_settings::RequestBody {
            message_template: input.message_template,
            reminders: input.reminders,
        };
        self.base
            .put(
                body,
                format!("whatsapp/{}/settings", input.barbershop_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn get_status(
        &self,
        barbershop_id: &str,
    ) -> APIResponse<get_connection_status::APIResponse> {
        self.base
            .get(format!("whatsapp/{}/status", barbershop_id), StatusCode::OK)
            .await
    }
}
