mod inmemory;
mod postgres;

use barber_reminders_domain::Appointment;
use chrono::{DateTime, NaiveDate, Utc};
pub use inmemory::InMemoryAppointmentRepo;
pub use postgres::PostgresAppointmentRepo;

#[async_trait::async_trait]
pub trait IAppointmentRepo: Send + Sync {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()>;
    async fn find(&self, appointment_id: i64) -> Option<Appointment>;
    /// Appointments of the barbershop without a reminder sent yet, that are not
    /// cancelled and are scheduled on `today` or later
    async fn find_pending(
        &self,
        tenant_id: &str,
        today: NaiveDate,
    ) -> anyhow::Result<Vec<Appointment>>;
    /// Sets `reminder_sent_at` only if it is not already set.
    /// Returns `false` if the appointment was already marked (or does not exist).
    async fn mark_reminder_sent(
        &self,
        appointment_id: i64,
        sent_at: DateTime<Utc>,
    ) -> anyhow::Result<bool>;
}

#[cfg(test)]
mod tests {
    use crate::ReminderContext;
    use barber_reminders_domain::Appointment;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn appointment(id: i64, tenant_id: &str, date: &str) -> Appointment {
        Appointment {
            id,
            tenant_id: tenant_id.into(),
            date: date.into(),
            time: "10:00".into(),
            customer_name: "Carlos".into(),
            customer_phone: "5511988887777".into(),
            service_name: "Haircut".into(),
            staff_name: "Leo".into(),
            shop_name: None,
            reminder_sent_at: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn find_pending_filters_tenant_date_status_and_marker() {
        let ctx = ReminderContext::create_inmemory();
        let repo = &ctx.repos.appointments;
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        let upcoming = appointment(1, "a", "2024-01-11");
        let today_appointment = appointment(2, "a", "2024-01-10");
        let past = appointment(3, "a", "2024-01-09");
        let other_tenant = appointment(4, "b", "2024-01-11");
        let mut cancelled = appointment(5, "a", "2024-01-11");
        cancelled.status = Some("cancelled".into());
        let mut sent = appointment(6, "a", "2024-01-11");
        sent.reminder_sent_at = Some(Utc::now());

        for a in [&upcoming, &today_appointment, &past, &other_tenant, &cancelled, &sent] {
            repo.insert(a).await.unwrap();
        }

        let mut ids = repo
            .find_pending("a", today)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect::<Vec<_>>();
        ids.sort();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn mark_reminder_sent_only_succeeds_once() {
        let ctx = ReminderContext::create_inmemory();
        let repo = &ctx.repos.appointments;
        repo.insert(&appointment(1, "a", "2024-01-11")).await.unwrap();

        let first = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 1, 10, 9, 1, 0).unwrap();
        assert!(repo.mark_reminder_sent(1, first).await.unwrap());
        assert!(!repo.mark_reminder_sent(1, second).await.unwrap());
        assert!(!repo.mark_reminder_sent(999, second).await.unwrap());

        let stored = repo.find(1).await.unwrap();
        assert_eq!(stored.reminder_sent_at, Some(first));
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert!(repo.find_pending("a", today).await.unwrap().is_empty());
    }
}
