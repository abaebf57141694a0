use crate::{
    connection::{ConnectionStatus, WhatsappConnection},
    reminder::{InvalidReminderRuleError, ReminderRule},
    shared::entity::Entity,
};
use thiserror::Error;

pub const DEFAULT_MESSAGE_TEMPLATE: &str = "Hi {{name}} 👋\nYour appointment is booked for {{date}} at {{time}} at {{shopName}}.\nIf anything comes up just let us know 😉";

/// Reminder settings a barbershop can change
#[derive(Debug, Clone, PartialEq)]
pub struct WhatsappSettings {
    pub message_template: String,
    pub reminders: Vec<ReminderRule>,
}

#[derive(Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("The message template can not be empty")]
    EmptyTemplate,
    #[error("Reminder number {index} is invalid: {source}")]
    InvalidReminder {
        index: usize,
        source: InvalidReminderRuleError,
    },
}

impl WhatsappSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.message_template.trim().is_empty() {
            return Err(SettingsError::EmptyTemplate);
        }
        for (index, rule) in self.reminders.iter().enumerate() {
            rule.validate()
                .map_err(|source| SettingsError::InvalidReminder { index, source })?;
        }
        Ok(())
    }
}

impl Default for WhatsappSettings {
    fn default() -> Self {
        Self {
            message_template: DEFAULT_MESSAGE_TEMPLATE.into(),
            reminders: vec![ReminderRule::default()],
        }
    }
}

/// A `TenantConfig` holds the WhatsApp configuration of a single barbershop.
///
/// It is created with default settings the first time a barbershop is
/// looked up.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantConfig {
    pub tenant_id: String,
    /// Last known state of the WhatsApp instance
    pub connection_status: ConnectionStatus,
    pub phone_number: Option<String>,
    pub qr_code_url: Option<String>,
    pub message_template: String,
    /// Ordered list of when to notify customers before their appointments
    pub reminders: Vec<ReminderRule>,
}

impl TenantConfig {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        let settings = WhatsappSettings::default();
        Self {
            tenant_id: tenant_id.into(),
            connection_status: ConnectionStatus::Disconnected,
            phone_number: None,
            qr_code_url: None,
            message_template: settings.message_template,
            reminders: settings.reminders,
        }
    }

    /// Name of the messaging gateway instance bound to this barbershop
    pub fn instance_name(&self) -> String {
        instance_name(&self.tenant_id)
    }

    pub fn settings(&self) -> WhatsappSettings {
        WhatsappSettings {
            message_template: self.message_template.clone(),
            reminders: self.reminders.clone(),
        }
    }

    pub fn set_settings(&mut self, settings: WhatsappSettings) {
        self.message_template = settings.message_template;
        self.reminders = settings.reminders;
    }

    /// Stores the latest observed connection. A previously known phone number is kept
    /// if the gateway did not report one, and the QR code is only kept while it is
    /// still waiting to be scanned.
    pub fn update_connection(&mut self, connection: &WhatsappConnection) {
        self.connection_status = connection.status;
        if let Some(phone_number) = &connection.phone_number {
            self.phone_number = Some(phone_number.clone());
        }
        if let Some(qr_code_url) = &connection.qr_code_url {
            self.qr_code_url = Some(qr_code_url.clone());
        } else if connection.status != ConnectionStatus::QrCodePending {
            self.qr_code_url = None;
        }
    }
}

impl Entity<String> for TenantConfig {
    fn id(&self) -> String {
        self.tenant_id.clone()
    }
}

pub fn instance_name(tenant_id: &str) -> String {
    format!("barbershop-{}", tenant_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::ReminderUnit;

    #[test]
    fn new_tenants_get_default_settings() {
        let tenant = TenantConfig::new("7");
        assert_eq!(tenant.connection_status, ConnectionStatus::Disconnected);
        assert_eq!(tenant.message_template, DEFAULT_MESSAGE_TEMPLATE);
        assert_eq!(
            tenant.reminders,
            vec![ReminderRule::new(24, ReminderUnit::Hours)]
        );
        assert_eq!(tenant.instance_name(), "barbershop-7");
    }

    #[test]
    fn it_validates_settings() {
        let mut settings = WhatsappSettings::default();
        assert!(settings.validate().is_ok());

        settings.reminders = Vec::new();
        assert!(settings.validate().is_ok());

        settings.reminders = vec![
            ReminderRule::new(1, ReminderUnit::Days),
            ReminderRule::new(0, ReminderUnit::Hours),
        ];
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InvalidReminder {
                index: 1,
                source: InvalidReminderRuleError::NotPositive
            })
        );

        settings.reminders = Vec::new();
        settings.message_template = "  ".into();
        assert_eq!(settings.validate(), Err(SettingsError::EmptyTemplate));
    }

    #[test]
    fn qr_code_is_cleared_once_no_longer_pending() {
        let mut tenant = TenantConfig::new("1");
        tenant.update_connection(&WhatsappConnection {
            status: ConnectionStatus::QrCodePending,
            phone_number: None,
            qr_code_url: Some("data:image/png;base64,abc".into()),
        });
        assert_eq!(tenant.qr_code_url.as_deref(), Some("data:image/png;base64,abc"));

        tenant.update_connection(&WhatsappConnection::with_status(
            ConnectionStatus::QrCodePending,
        ));
        assert!(tenant.qr_code_url.is_some());

        tenant.update_connection(&WhatsappConnection::connected("5511999999999".into()));
        assert_eq!(tenant.connection_status, ConnectionStatus::Connected);
        assert_eq!(tenant.phone_number.as_deref(), Some("5511999999999"));
        assert!(tenant.qr_code_url.is_none());

        tenant.update_connection(&WhatsappConnection::with_status(
            ConnectionStatus::Disconnected,
        ));
        assert_eq!(tenant.phone_number.as_deref(), Some("5511999999999"));
    }
}
