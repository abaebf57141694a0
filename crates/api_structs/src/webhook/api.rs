use serde::{Deserialize, Serialize};

pub mod receive_evolution_webhook {
    use super::*;

    /// Only the fields needed for logging, the rest of the payload is ignored
    #[derive(Debug, Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub event: Option<String>,
        #[serde(default)]
        pub instance: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
    }
}
