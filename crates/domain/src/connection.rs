use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// State of the WhatsApp instance bound to a barbershop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    QrCodePending,
    Loading,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::QrCodePending => "qr_code_pending",
            Self::Loading => "loading",
        }
    }

    pub fn parse(status: &str) -> Option<Self> {
        match status {
            "connected" => Some(Self::Connected),
            "disconnected" => Some(Self::Disconnected),
            "qr_code_pending" => Some(Self::QrCodePending),
            "loading" => Some(Self::Loading),
            _ => None,
        }
    }
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self::Disconnected
    }
}

impl Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of asking the messaging gateway about an instance
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WhatsappConnection {
    pub status: ConnectionStatus,
    pub phone_number: Option<String>,
    pub qr_code_url: Option<String>,
}

impl WhatsappConnection {
    pub fn connected(phone_number: String) -> Self {
        Self {
            status: ConnectionStatus::Connected,
            phone_number: Some(phone_number),
            qr_code_url: None,
        }
    }

    pub fn with_status(status: ConnectionStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }
}
