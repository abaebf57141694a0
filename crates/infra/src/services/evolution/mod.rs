mod api;
mod inmemory;

pub use api::EvolutionRestApi;
use barber_reminders_domain::WhatsappConnection;
pub use inmemory::{InMemoryMessagingGateway, SentMessage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("EVOLUTION_API_URL and EVOLUTION_API_KEY must be configured")]
    NotConfigured,
    #[error("Request to the Evolution API failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Evolution API error: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("Message to {0} was rejected")]
    Rejected(String),
}

/// The WhatsApp messaging gateway, one instance per barbershop
#[async_trait::async_trait]
pub trait IMessagingGateway: Send + Sync {
    /// Fails if the gateway credentials are missing
    fn check_config(&self) -> Result<(), GatewayError>;

    /// Never fails, any error talking to the gateway is reported as disconnected
    async fn check_connection(&self, instance_name: &str) -> WhatsappConnection;

    async fn send_text(
        &self,
        instance_name: &str,
        phone_number: &str,
        text: &str,
    ) -> Result<(), GatewayError>;
}
