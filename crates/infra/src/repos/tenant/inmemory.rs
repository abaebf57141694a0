use super::ITenantRepo;
use crate::repos::shared::inmemory_repo::*;
use barber_reminders_domain::{Entity, TenantConfig};

pub struct InMemoryTenantRepo {
    tenants: std::sync::Mutex<Vec<TenantConfig>>,
}

impl InMemoryTenantRepo {
    pub fn new() -> Self {
        Self {
            tenants: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ITenantRepo for InMemoryTenantRepo {
    async fn insert(&self, tenant: &TenantConfig) -> anyhow::Result<()> {
        if find(&tenant.id(), &self.tenants).is_none() {
            insert(tenant, &self.tenants);
        }
        Ok(())
    }

    async fn save(&self, tenant: &TenantConfig) -> anyhow::Result<()> {
        upsert(tenant, &self.tenants);
        Ok(())
    }

    async fn find(&self, tenant_id: &str) -> anyhow::Result<Option<TenantConfig>> {
        Ok(find(&tenant_id.to_string(), &self.tenants))
    }

    async fn find_all_ids(&self) -> anyhow::Result<Vec<String>> {
        let res = find_by(&self.tenants, |_| true)
            .into_iter()
            .map(|tenant| tenant.tenant_id)
            .collect();
        Ok(res)
    }
}
