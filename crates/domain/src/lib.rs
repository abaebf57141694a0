mod appointment;
mod connection;
mod message;
mod reminder;
mod shared;
mod tenant;

pub use appointment::{phone_digits, today_key, Appointment, AppointmentError};
pub use connection::{ConnectionStatus, WhatsappConnection};
pub use message::render;
pub use reminder::{
    due_rule, is_due, trigger_time, InvalidReminderRuleError, ReminderRule, ReminderUnit,
    REMINDER_WINDOW_TOLERANCE_MINUTES,
};
pub use shared::entity::Entity;
pub use tenant::{
    instance_name, SettingsError, TenantConfig, WhatsappSettings, DEFAULT_MESSAGE_TEMPLATE,
};
