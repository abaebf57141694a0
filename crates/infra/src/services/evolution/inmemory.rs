use super::{GatewayError, IMessagingGateway};
use barber_reminders_domain::{phone_digits, ConnectionStatus, WhatsappConnection};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub instance_name: String,
    pub phone_number: String,
    pub text: String,
}

#[derive(Default)]
struct GatewayState {
    connections: HashMap<String, WhatsappConnection>,
    // Scripted answers consumed one per connection check before falling back to `connections`
    scripted: HashMap<String, VecDeque<WhatsappConnection>>,
    failing_phones: HashSet<String>,
    sent: Vec<SentMessage>,
}

/// Gateway that keeps everything in memory. Instances are disconnected until
/// told otherwise.
pub struct InMemoryMessagingGateway {
    configured: bool,
    state: Mutex<GatewayState>,
}

impl InMemoryMessagingGateway {
    pub fn new() -> Self {
        Self {
            configured: true,
            state: Mutex::new(GatewayState::default()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            state: Mutex::new(GatewayState::default()),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut GatewayState) -> R) -> R {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut state)
    }

    pub fn set_connection(&self, instance_name: &str, connection: WhatsappConnection) {
        self.with_state(|state| {
            state
                .connections
                .insert(instance_name.to_string(), connection);
        });
    }

    /// The next connection checks for the instance answer with `sequence`
    /// in order, afterwards the connection set by `set_connection` is used
    pub fn set_connection_sequence(&self, instance_name: &str, sequence: Vec<WhatsappConnection>) {
        self.with_state(|state| {
            state
                .scripted
                .insert(instance_name.to_string(), sequence.into_iter().collect());
        });
    }

    pub fn fail_sends_to(&self, phone_number: &str) {
        self.with_state(|state| {
            state.failing_phones.insert(phone_digits(phone_number));
        });
    }

    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.with_state(|state| state.sent.clone())
    }
}

impl Default for InMemoryMessagingGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMessagingGateway for InMemoryMessagingGateway {
    fn check_config(&self) -> Result<(), GatewayError> {
        if self.configured {
            Ok(())
        } else {
            Err(GatewayError::NotConfigured)
        }
    }

    async fn check_connection(&self, instance_name: &str) -> WhatsappConnection {
        if !self.configured {
            return WhatsappConnection::with_status(ConnectionStatus::Disconnected);
        }
        self.with_state(|state| {
            if let Some(next) = state
                .scripted
                .get_mut(instance_name)
                .and_then(|sequence| sequence.pop_front())
            {
                return next;
            }
            state
                .connections
                .get(instance_name)
                .cloned()
                .unwrap_or_default()
        })
    }

    async fn send_text(
        &self,
        instance_name: &str,
        phone_number: &str,
        text: &str,
    ) -> Result<(), GatewayError> {
        self.check_config()?;
        let number = phone_digits(phone_number);
        self.with_state(|state| {
            if number.is_empty() || state.failing_phones.contains(&number) {
                return Err(GatewayError::Rejected(phone_number.to_string()));
            }
            state.sent.push(SentMessage {
                instance_name: instance_name.to_string(),
                phone_number: number,
                text: text.to_string(),
            });
            Ok(())
        })
    }
}
