use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How far past its trigger time a reminder is still considered due.
/// The send reminders job must run at least once within this window
/// or reminders will be missed.
pub const REMINDER_WINDOW_TOLERANCE_MINUTES: i64 = 5;

/// Upper bound for how long before an appointment a reminder can be configured
const MAX_REMINDER_OFFSET_MINUTES: i64 = 366 * 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderUnit {
    Minutes,
    Hours,
    Days,
}

impl ReminderUnit {
    fn minutes(&self) -> i64 {
        match self {
            Self::Minutes => 1,
            Self::Hours => 60,
            Self::Days => 24 * 60,
        }
    }
}

/// A `ReminderRule` is a barbershop setting saying that customers should be
/// notified `value` `unit`s before their appointment starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRule {
    pub value: u32,
    pub unit: ReminderUnit,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidReminderRuleError {
    #[error("Reminder value must be a positive integer")]
    NotPositive,
    #[error("Reminder offset of {0} minutes is longer than a year")]
    TooLong(i64),
}

impl ReminderRule {
    pub fn new(value: u32, unit: ReminderUnit) -> Self {
        Self { value, unit }
    }

    fn offset_minutes(&self) -> i64 {
        i64::from(self.value) * self.unit.minutes()
    }

    pub fn offset(&self) -> Option<Duration> {
        Duration::try_minutes(self.offset_minutes())
    }

    pub fn validate(&self) -> Result<(), InvalidReminderRuleError> {
        if self.value == 0 {
            return Err(InvalidReminderRuleError::NotPositive);
        }
        let minutes = self.offset_minutes();
        if minutes > MAX_REMINDER_OFFSET_MINUTES {
            return Err(InvalidReminderRuleError::TooLong(minutes));
        }
        Ok(())
    }
}

impl Default for ReminderRule {
    fn default() -> Self {
        Self::new(24, ReminderUnit::Hours)
    }
}

/// The local time at which a reminder for an appointment at `appointment_at` should go out.
/// `None` if the offset moves the timestamp out of the representable range.
pub fn trigger_time(appointment_at: NaiveDateTime, rule: &ReminderRule) -> Option<NaiveDateTime> {
    rule.offset()
        .and_then(|offset| appointment_at.checked_sub_signed(offset))
}

/// Finds the first rule whose trigger time has passed, but by no more than
/// `REMINDER_WINDOW_TOLERANCE_MINUTES`.
///
/// This is stateless: it keeps returning the same rule for every call inside
/// the window. Avoiding duplicate sends is the job of the appointment's
/// `reminder_sent_at` marker.
pub fn due_rule<'a>(
    appointment_at: NaiveDateTime,
    rules: &'a [ReminderRule],
    now: NaiveDateTime,
) -> Option<&'a ReminderRule> {
    let tolerance = Duration::minutes(REMINDER_WINDOW_TOLERANCE_MINUTES);
    rules.iter().find(|rule| match trigger_time(appointment_at, rule) {
        Some(trigger) => trigger <= now && now - trigger <= tolerance,
        None => false,
    })
}

pub fn is_due(appointment_at: NaiveDateTime, rules: &[ReminderRule], now: NaiveDateTime) -> bool {
    due_rule(appointment_at, rules, now).is_some()
}
