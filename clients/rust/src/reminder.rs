use crate::{APIResponse, BaseClient};
use barber_reminders_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct SendReminderInput {
    pub barbershop_id: String,
    pub instance_name: String,
    pub phone_number: String,
    pub message: String,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Runs one reminders sweep, the same as the scheduled job does
    pub async fn send_due(&self) -> APIResponse<send_reminders::APIResponse> {
        self.base
            .get("cron/send-reminders".into(), StatusCode::OK)
            .await
    }

    pub async fn send(&self, input: SendReminderInput) -> APIResponse<send_reminder::APIResponse> {
        let body = send_reminder::RequestBody {
            barbershop_id: input.barbershop_id,
            instance_name: input.instance_name,
            phone_number: input.phone_number,
            message: input.message,
        };
        self.base
            .post(body, "reminders/send".into(), StatusCode::OK)
            .await
    }

    pub async fn notify_webhook(
        &self,
        body: receive_evolution_webhook::RequestBody,
    ) -> APIResponse<receive_evolution_webhook::APIResponse> {
        self.base
            .post(body, "webhook/evolution".into(), StatusCode::OK)
            .await
    }
}
