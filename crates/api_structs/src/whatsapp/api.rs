use crate::dtos::{TenantConfigDTO, WhatsappConnectionDTO, WhatsappSettingsDTO};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarbershopPathParams {
    pub barbershop_id: String,
}

pub mod get_settings {
    use super::*;

    pub type PathParams = BarbershopPathParams;

    pub type APIResponse = WhatsappSettingsDTO;
}

pub mod update_settings {
    use super::*;
    use barber_reminders_domain::ReminderRule;

    pub type PathParams = BarbershopPathParams;

    #[derive(Debug, Deserialize, Serialize, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub message_template: String,
        pub reminders: Vec<ReminderRule>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub config: TenantConfigDTO,
    }
}

pub mod get_connection_status {
    use super::*;

    pub type PathParams = BarbershopPathParams;

    pub type APIResponse = WhatsappConnectionDTO;
}
