use barber_reminders_domain::{
    ConnectionStatus, ReminderRule, TenantConfig, WhatsappConnection, WhatsappSettings,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappSettingsDTO {
    pub message_template: String,
    pub reminders: Vec<ReminderRule>,
}

impl WhatsappSettingsDTO {
    pub fn new(settings: WhatsappSettings) -> Self {
        Self {
            message_template: settings.message_template,
            reminders: settings.reminders,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TenantConfigDTO {
    pub barbershop_id: String,
    pub connection_status: ConnectionStatus,
    pub phone_number: Option<String>,
    pub qr_code_url: Option<String>,
    pub message_template: String,
    pub reminders: Vec<ReminderRule>,
}

impl TenantConfigDTO {
    pub fn new(tenant: TenantConfig) -> Self {
        Self {
            barbershop_id: tenant.tenant_id,
            connection_status: tenant.connection_status,
            phone_number: tenant.phone_number,
            qr_code_url: tenant.qr_code_url,
            message_template: tenant.message_template,
            reminders: tenant.reminders,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappConnectionDTO {
    pub status: ConnectionStatus,
    pub phone_number: Option<String>,
    pub qr_code_url: Option<String>,
}

impl WhatsappConnectionDTO {
    pub fn new(connection: WhatsappConnection) -> Self {
        Self {
            status: connection.status,
            phone_number: connection.phone_number,
            qr_code_url: connection.qr_code_url,
        }
    }
}
