use crate::shared::entity::Entity;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Statuses written by the booking system for appointments that will not take place
const CANCELLED_STATUSES: [&str; 2] = ["cancelled", "cancelado"];

/// An `Appointment` is a booking made by a customer at a barbershop.
///
/// Appointments are owned by the booking system. The only thing this service
/// ever writes is `reminder_sent_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    /// The barbershop (tenant) the appointment was booked at
    pub tenant_id: String,
    /// Local calendar date formatted as `YYYY-MM-DD`
    pub date: String,
    /// Local time of day formatted as `HH:MM` or `HH:MM:SS`
    pub time: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_name: String,
    pub staff_name: String,
    pub shop_name: Option<String>,
    /// Set once a reminder has been dispatched. An appointment with this set
    /// will never get another reminder.
    pub reminder_sent_at: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

#[derive(Error, Debug, PartialEq)]
pub enum AppointmentError {
    #[error("Appointment date: `{0}` is malformed, expected YYYY-MM-DD")]
    MalformedDate(String),
    #[error("Appointment time: `{0}` is malformed, expected HH:MM")]
    MalformedTime(String),
    #[error("Appointment has no customer phone number")]
    MissingPhone,
}

impl Appointment {
    pub fn is_cancelled(&self) -> bool {
        match &self.status {
            Some(status) => CANCELLED_STATUSES
                .iter()
                .any(|cancelled| status.trim().eq_ignore_ascii_case(cancelled)),
            None => false,
        }
    }

    pub fn reminder_sent(&self) -> bool {
        self.reminder_sent_at.is_some()
    }

    /// Whether this appointment should still be looked at by the reminders job
    /// on the given local `today`
    pub fn is_pending(&self, today: NaiveDate) -> bool {
        !self.reminder_sent()
            && !self.is_cancelled()
            && self.date.trim() >= today_key(today).as_str()
    }

    pub fn scheduled_date(&self) -> Result<NaiveDate, AppointmentError> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| AppointmentError::MalformedDate(self.date.clone()))
    }

    pub fn scheduled_time(&self) -> Result<NaiveTime, AppointmentError> {
        let time = self.time.trim();
        NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .map_err(|_| AppointmentError::MalformedTime(self.time.clone()))
    }

    /// Combined local wall clock date time of the appointment
    pub fn scheduled_at(&self) -> Result<NaiveDateTime, AppointmentError> {
        Ok(self.scheduled_date()?.and_time(self.scheduled_time()?))
    }

    /// The customer phone number with everything except digits stripped
    pub fn phone_digits(&self) -> Result<String, AppointmentError> {
        let digits = phone_digits(&self.customer_phone);
        if digits.is_empty() {
            return Err(AppointmentError::MissingPhone);
        }
        Ok(digits)
    }
}

impl Entity<i64> for Appointment {
    fn id(&self) -> i64 {
        self.id
    }
}

pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// The date format used by storage, which also orders correctly as a string
pub fn today_key(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment() -> Appointment {
        Appointment {
            id: 1,
            tenant_id: "42".into(),
            date: "2024-01-10".into(),
            time: "15:00".into(),
            customer_name: "Joao".into(),
            customer_phone: "+55 (11) 98765-4321".into(),
            service_name: "Haircut".into(),
            staff_name: "Pedro".into(),
            shop_name: None,
            reminder_sent_at: None,
            status: None,
        }
    }

    #[test]
    fn it_combines_date_and_time() {
        let mut a = appointment();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        assert_eq!(a.scheduled_at(), Ok(expected));

        a.time = "15:00:00".into();
        assert_eq!(a.scheduled_at(), Ok(expected));
    }

    #[test]
    fn padded_date_of_today_is_pending() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let mut a = appointment();
        a.date = " 2024-01-10 ".into();
        assert!(a.scheduled_at().is_ok());
        assert!(a.is_pending(today));

        a.date = " 2024-01-09".into();
        assert!(!a.is_pending(today));
    }

    #[test]
    fn it_rejects_malformed_date_and_time() {
        let mut a = appointment();
        a.date = "10/01/2024".into();
        assert_eq!(
            a.scheduled_at(),
            Err(AppointmentError::MalformedDate("10/01/2024".into()))
        );

        let mut a = appointment();
        a.time = "25:00".into();
        assert_eq!(
            a.scheduled_at(),
            Err(AppointmentError::MalformedTime("25:00".into()))
        );

        let mut a = appointment();
        a.date = "".into();
        assert!(a.scheduled_at().is_err());
    }

    #[test]
    fn it_strips_phone_numbers_to_digits() {
        let mut a = appointment();
        assert_eq!(a.phone_digits(), Ok("5511987654321".to_string()));

        a.customer_phone = " - ".into();
        assert_eq!(a.phone_digits(), Err(AppointmentError::MissingPhone));
    }

    #[test]
    fn it_detects_cancelled_appointments() {
        let mut a = appointment();
        assert!(!a.is_cancelled());
        for status in ["cancelled", "Cancelado", " CANCELLED "] {
            a.status = Some(status.into());
            assert!(a.is_cancelled());
        }
        a.status = Some("confirmed".into());
        assert!(!a.is_cancelled());
    }

    #[test]
    fn pending_excludes_sent_cancelled_and_past() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let a = appointment();
        assert!(a.is_pending(today));

        let mut past = appointment();
        past.date = "2024-01-09".into();
        assert!(!past.is_pending(today));

        let mut sent = appointment();
        sent.reminder_sent_at = Some(Utc::now());
        assert!(!sent.is_pending(today));

        let mut cancelled = appointment();
        cancelled.status = Some("cancelled".into());
        assert!(!cancelled.is_pending(today));
    }
}
