use super::IAppointmentRepo;
use crate::repos::shared::inmemory_repo::*;
use barber_reminders_domain::Appointment;
use chrono::{DateTime, NaiveDate, Utc};

pub struct InMemoryAppointmentRepo {
    appointments: std::sync::Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentRepo {
    pub fn new() -> Self {
        Self {
            appointments: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for InMemoryAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        insert(appointment, &self.appointments);
        Ok(())
    }

    async fn find(&self, appointment_id: i64) -> Option<Appointment> {
        find(&appointment_id, &self.appointments)
    }

    async fn find_pending(
        &self,
        tenant_id: &str,
        today: NaiveDate,
    ) -> anyhow::Result<Vec<Appointment>> {
        let res = find_by(&self.appointments, |a| {
            a.tenant_id == tenant_id && a.is_pending(today)
        });
        Ok(res)
    }

    async fn mark_reminder_sent(
        &self,
        appointment_id: i64,
        sent_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let marked = update_one(&appointment_id, &self.appointments, |a| {
            if a.reminder_sent_at.is_some() {
                return false;
            }
            a.reminder_sent_at = Some(sent_at);
            true
        });
        Ok(marked.unwrap_or(false))
    }
}
