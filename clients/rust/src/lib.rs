mod base;
mod reminder;
mod status;
mod whatsapp;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use barber_reminders_api_structs::dtos::*;
pub use barber_reminders_api_structs::receive_evolution_webhook::RequestBody as EvolutionWebhookEvent;
pub use barber_reminders_domain::{ConnectionStatus, ReminderRule, ReminderUnit};
use reminder::ReminderClient;
pub use reminder::SendReminderInput;
pub use reqwest::StatusCode;
use status::StatusClient;
use std::sync::Arc;
use whatsapp::WhatsappClient;
pub use whatsapp::UpdateSettingsInput;

/// Barbershop Reminders Server SDK
///
/// The SDK contains methods for interacting with the reminders server API.
#[derive(Clone)]
pub struct ReminderSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub whatsapp: WhatsappClient,
}

impl ReminderSDK {
    pub fn new<T: Into<String>>(address: String, internal_api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_internal_api_key(internal_api_key.into());
        let base = Arc::new(base);
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let whatsapp = WhatsappClient::new(base);

        Self {
            reminder,
            status,
            whatsapp,
        }
    }
}
