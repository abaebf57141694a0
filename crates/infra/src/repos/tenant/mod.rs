mod inmemory;
mod postgres;

use barber_reminders_domain::TenantConfig;
pub use inmemory::InMemoryTenantRepo;
pub use postgres::PostgresTenantRepo;

/// Registry of barbershops and their WhatsApp reminder settings
#[async_trait::async_trait]
pub trait ITenantRepo: Send + Sync {
    /// Inserts the tenant unless one with the same id already exists
    async fn insert(&self, tenant: &TenantConfig) -> anyhow::Result<()>;
    async fn save(&self, tenant: &TenantConfig) -> anyhow::Result<()>;
    /// `Ok(None)` only if the tenant does not exist, a failed read is an error
    async fn find(&self, tenant_id: &str) -> anyhow::Result<Option<TenantConfig>>;
    async fn find_all_ids(&self) -> anyhow::Result<Vec<String>>;

    /// Finds the tenant or creates it with the default settings
    async fn get_or_create(&self, tenant_id: &str) -> anyhow::Result<TenantConfig> {
        if let Some(tenant) = self.find(tenant_id).await? {
            return Ok(tenant);
        }
        let tenant = TenantConfig::new(tenant_id);
        self.insert(&tenant).await?;
        // Someone else might have created it in the meantime
        Ok(self.find(tenant_id).await?.unwrap_or(tenant))
    }
}
