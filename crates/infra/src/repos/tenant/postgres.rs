use super::ITenantRepo;
use barber_reminders_domain::{ConnectionStatus, ReminderRule, TenantConfig};
use sqlx::{types::Json, FromRow, PgPool};
use tracing::{error, warn};

pub struct PostgresTenantRepo {
    pool: PgPool,
}

impl PostgresTenantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TenantConfigRaw {
    tenant_id: String,
    connection_status: String,
    phone_number: Option<String>,
    qr_code_url: Option<String>,
    message_template: String,
    reminders: Json<Vec<ReminderRule>>,
}

#[derive(Debug, FromRow)]
struct TenantIdRaw {
    tenant_id: String,
}

impl From<TenantConfigRaw> for TenantConfig {
    fn from(e: TenantConfigRaw) -> Self {
        let connection_status = ConnectionStatus::parse(&e.connection_status).unwrap_or_else(|| {
            warn!(
                "Unknown connection status: {} stored for tenant: {}",
                e.connection_status, e.tenant_id
            );
            ConnectionStatus::Disconnected
        });
        Self {
            tenant_id: e.tenant_id,
            connection_status,
            phone_number: e.phone_number,
            qr_code_url: e.qr_code_url,
            message_template: e.message_template,
            reminders: e.reminders.0,
        }
    }
}

#[async_trait::async_trait]
impl ITenantRepo for PostgresTenantRepo {
    async fn insert(&self, tenant: &TenantConfig) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tenant_configs
            (tenant_id, connection_status, phone_number, qr_code_url, message_template, reminders)
            VALUES($1, $2, $3, $4, $5, $6)
            ON CONFLICT (tenant_id) DO NOTHING
            "#,
        )
        .bind(&tenant.tenant_id)
        .bind(tenant.connection_status.as_str())
        .bind(&tenant.phone_number)
        .bind(&tenant.qr_code_url)
        .bind(&tenant.message_template)
        .bind(Json(&tenant.reminders))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert tenant config: {:?}. DB returned error: {:?}",
                tenant, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, tenant: &TenantConfig) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tenant_configs
            (tenant_id, connection_status, phone_number, qr_code_url, message_template, reminders)
            VALUES($1, $2, $3, $4, $5, $6)
            ON CONFLICT (tenant_id) DO UPDATE SET
                connection_status = EXCLUDED.connection_status,
                phone_number = EXCLUDED.phone_number,
                qr_code_url = EXCLUDED.qr_code_url,
                message_template = EXCLUDED.message_template,
                reminders = EXCLUDED.reminders
            "#,
        )
        .bind(&tenant.tenant_id)
        .bind(tenant.connection_status.as_str())
        .bind(&tenant.phone_number)
        .bind(&tenant.qr_code_url)
        .bind(&tenant.message_template)
        .bind(Json(&tenant.reminders))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save tenant config: {:?}. DB returned error: {:?}",
                tenant, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, tenant_id: &str) -> anyhow::Result<Option<TenantConfig>> {
        let res: Option<TenantConfigRaw> = sqlx::query_as(
            r#"
            SELECT * FROM tenant_configs AS t
            WHERE t.tenant_id = $1
            "#,
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find tenant config with id: {} failed. DB returned error: {:?}",
                tenant_id, e
            );
            e
        })?;

        Ok(res.map(|tenant| tenant.into()))
    }

    async fn find_all_ids(&self) -> anyhow::Result<Vec<String>> {
        let ids: Vec<TenantIdRaw> = sqlx::query_as(
            r#"
            SELECT t.tenant_id FROM tenant_configs AS t
            ORDER BY t.tenant_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Listing tenant ids failed. DB returned error: {:?}", e);
            e
        })?;

        Ok(ids.into_iter().map(|raw| raw.tenant_id).collect())
    }
}
