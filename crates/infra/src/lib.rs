mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, EvolutionConfig};
pub use repos::{IAppointmentRepo, ITenantRepo, Repos};
pub use services::evolution::{
    EvolutionRestApi, GatewayError, IMessagingGateway, InMemoryMessagingGateway, SentMessage,
};
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::warn;

#[derive(Clone)]
pub struct ReminderContext {
    pub repos: Repos,
    pub gateway: Arc<dyn IMessagingGateway>,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl ReminderContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string).await?,
            None => {
                warn!("DATABASE_URL is not set. Using in-memory storage, all data is lost on restart.");
                Repos::create_inmemory()
            }
        };
        let config = Config::new();
        Ok(Self {
            repos,
            gateway: Arc::new(EvolutionRestApi::new(config.evolution.clone())),
            config,
            sys: Arc::new(RealSys {}),
        })
    }

    /// Context with in-memory storage and messaging gateway
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            gateway: Arc::new(InMemoryMessagingGateway::new()),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<ReminderContext> {
    ReminderContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .ok()
        .filter(|connection_string| !connection_string.trim().is_empty())
}
