use super::{GatewayError, IMessagingGateway};
use crate::config::EvolutionConfig;
use barber_reminders_domain::{phone_digits, ConnectionStatus, WhatsappConnection};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, warn};

const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct EvolutionInstance {
    #[serde(default, alias = "name")]
    instance_name: Option<String>,
    #[serde(default, alias = "connectionStatus")]
    state: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendTextBody<'a> {
    number: String,
    text: &'a str,
}

/// Maps the instance listing of the Evolution API to the connection state of a single instance
fn connection_from_instances(instances: &[EvolutionInstance], instance_name: &str) -> WhatsappConnection {
    let instance = match instances
        .iter()
        .find(|inst| inst.instance_name.as_deref() == Some(instance_name))
    {
        Some(instance) => instance,
        None => return WhatsappConnection::with_status(ConnectionStatus::Disconnected),
    };

    match (instance.state.as_deref(), &instance.phone_number) {
        (Some("open"), Some(phone_number)) if !phone_number.is_empty() => {
            WhatsappConnection::connected(phone_number.clone())
        }
        (Some("close"), _) => WhatsappConnection::with_status(ConnectionStatus::Disconnected),
        _ => WhatsappConnection::with_status(ConnectionStatus::Loading),
    }
}

/// Anything that is not a list is treated as no instances, and entries
/// that can not be read are skipped
fn parse_instances(body: Value) -> Vec<EvolutionInstance> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

pub struct EvolutionRestApi {
    client: Client,
    config: Option<EvolutionConfig>,
}

impl EvolutionRestApi {
    pub fn new(config: Option<EvolutionConfig>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                warn!("Unable to build http client with timeout: {:?}", e);
                Client::new()
            });

        Self { client, config }
    }

    fn config(&self) -> Result<&EvolutionConfig, GatewayError> {
        self.config.as_ref().ok_or(GatewayError::NotConfigured)
    }

    fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder, GatewayError> {
        let config = self.config()?;
        let url = format!("{}{}", config.url, endpoint);
        Ok(self
            .client
            .request(method, url)
            .header("apikey", config.api_key.clone()))
    }

    async fn check_response(res: Response) -> Result<Response, GatewayError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch_instances(&self) -> Result<Vec<EvolutionInstance>, GatewayError> {
        let res = self
            .request(Method::GET, "/instance/fetchInstances")?
            .send()
            .await?;
        let body = Self::check_response(res).await?.json::<Value>().await?;
        Ok(parse_instances(body))
    }
}

#[async_trait::async_trait]
impl IMessagingGateway for EvolutionRestApi {
    fn check_config(&self) -> Result<(), GatewayError> {
        self.config().map(|_| ())
    }

    async fn check_connection(&self, instance_name: &str) -> WhatsappConnection {
        match self.fetch_instances().await {
            Ok(instances) => connection_from_instances(&instances, instance_name),
            Err(e) => {
                error!(
                    "Error checking connection of instance: {}. Error: {}",
                    instance_name, e
                );
                WhatsappConnection::with_status(ConnectionStatus::Disconnected)
            }
        }
    }

    async fn send_text(
        &self,
        instance_name: &str,
        phone_number: &str,
        text: &str,
    ) -> Result<(), GatewayError> {
        let number = phone_digits(phone_number);
        if number.is_empty() {
            return Err(GatewayError::Rejected(phone_number.to_string()));
        }

        let res = self
            .request(Method::POST, &format!("/message/sendText/{}", instance_name))?
            .json(&SendTextBody { number, text })
            .send()
            .await?;
        Self::check_response(res).await?;
        Ok(())
    }
}
