use super::IAppointmentRepo;
use barber_reminders_domain::{today_key, Appointment};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AppointmentRaw {
    appointment_id: i64,
    tenant_id: String,
    appointment_date: String,
    appointment_time: String,
    customer_name: Option<String>,
    customer_phone: Option<String>,
    service_name: Option<String>,
    staff_name: Option<String>,
    shop_name: Option<String>,
    reminder_sent_at: Option<DateTime<Utc>>,
    status: Option<String>,
}

impl From<AppointmentRaw> for Appointment {
    fn from(e: AppointmentRaw) -> Self {
        Self {
            id: e.appointment_id,
            tenant_id: e.tenant_id,
            date: e.appointment_date,
            time: e.appointment_time,
            customer_name: e.customer_name.unwrap_or_default(),
            customer_phone: e.customer_phone.unwrap_or_default(),
            service_name: e.service_name.unwrap_or_default(),
            staff_name: e.staff_name.unwrap_or_default(),
            shop_name: e.shop_name,
            reminder_sent_at: e.reminder_sent_at,
            status: e.status,
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for PostgresAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO appointments
            (appointment_id, tenant_id, appointment_date, appointment_time, customer_name,
             customer_phone, service_name, staff_name, shop_name, reminder_sent_at, status)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(appointment.id)
        .bind(&appointment.tenant_id)
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(&appointment.customer_name)
        .bind(&appointment.customer_phone)
        .bind(&appointment.service_name)
        .bind(&appointment.staff_name)
        .bind(&appointment.shop_name)
        .bind(appointment.reminder_sent_at)
        .bind(&appointment.status)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert appointment: {:?}. DB returned error: {:?}",
                appointment, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, appointment_id: i64) -> Option<Appointment> {
        let res: Option<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.appointment_id = $1
            "#,
        )
        .bind(appointment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find appointment with id: {} failed. DB returned error: {:?}",
                appointment_id, e
            );
            e
        })
        .ok()?;

        res.map(|appointment| appointment.into())
    }

    async fn find_pending(
        &self,
        tenant_id: &str,
        today: NaiveDate,
    ) -> anyhow::Result<Vec<Appointment>> {
        // Dates are stored as YYYY-MM-DD so they compare correctly as text
        let appointments: Vec<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.tenant_id = $1
                AND a.reminder_sent_at IS NULL
                AND (a.status IS NULL OR LOWER(TRIM(a.status)) NOT IN ('cancelled', 'cancelado'))
                AND TRIM(a.appointment_date) >= $2
            ORDER BY a.appointment_date, a.appointment_time
            "#,
        )
        .bind(tenant_id)
        .bind(today_key(today))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find pending appointments for tenant: {} failed. DB returned error: {:?}",
                tenant_id, e
            );
            e
        })?;

        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    async fn mark_reminder_sent(
        &self,
        appointment_id: i64,
        sent_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE appointments
            SET reminder_sent_at = $2
            WHERE appointment_id = $1 AND reminder_sent_at IS NULL
            "#,
        )
        .bind(appointment_id)
        .bind(sent_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to mark reminder sent for appointment: {}. DB returned error: {:?}",
                appointment_id, e
            );
            e
        })?;

        Ok(res.rows_affected() == 1)
    }
}
