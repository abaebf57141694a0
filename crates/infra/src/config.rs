use barber_reminders_utils::create_random_secret;
use chrono_tz::Tz;
use tracing::{info, warn};

/// Credentials for the Evolution API WhatsApp gateway
#[derive(Debug, Clone)]
pub struct EvolutionConfig {
    /// Base url without a trailing slash
    pub url: String,
    pub api_key: String,
}

impl EvolutionConfig {
    /// Returns `None` if either value is missing or the url is not a valid http(s) url
    pub fn new(url: Option<String>, api_key: Option<String>) -> Option<Self> {
        let url = url?.trim().trim_end_matches('/').to_string();
        let api_key = api_key?.trim().to_string();
        if url.is_empty() || api_key.is_empty() {
            return None;
        }
        match url::Url::parse(&url) {
            Ok(parsed) if ["http", "https"].contains(&parsed.scheme()) => {
                Some(Self { url, api_key })
            }
            _ => {
                warn!("The given EVOLUTION_API_URL: {} is not a valid http(s) url.", url);
                None
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Shared secret needed by the protected routes, e.g. the cron trigger
    pub internal_api_key: String,
    /// `None` when the gateway credentials are not set. Reminder sweeps
    /// will then fail with a configuration error.
    pub evolution: Option<EvolutionConfig>,
    /// Timezone the appointment dates and times are stored in
    pub timezone: Tz,
    /// How often the send reminders job runs. Should not exceed the
    /// reminder window tolerance or reminders can be missed.
    pub send_reminders_interval_secs: u64,
    pub send_reminders_job_enabled: bool,
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T
where
    T: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => match value.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let internal_api_key = match std::env::var("INTERNAL_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                info!("Did not find INTERNAL_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(32);
                info!("Internal api key was generated and set to: {}", key);
                key
            }
        };

        let evolution = EvolutionConfig::new(
            std::env::var("EVOLUTION_API_URL").ok(),
            std::env::var("EVOLUTION_API_KEY").ok(),
        );
        if evolution.is_none() {
            warn!("EVOLUTION_API_URL and EVOLUTION_API_KEY are not configured. No reminders will be sent.");
        }

        let timezone = parse_env("TIMEZONE", Tz::UTC);
        let send_reminders_interval_secs = parse_env("SEND_REMINDERS_INTERVAL_SECS", 60u64).max(1);
        let tolerance_secs = barber_reminders_domain::REMINDER_WINDOW_TOLERANCE_MINUTES as u64 * 60;
        if send_reminders_interval_secs > tolerance_secs {
            warn!(
                "SEND_REMINDERS_INTERVAL_SECS: {} is longer than the reminder window of {} seconds. Some reminders will be missed.",
                send_reminders_interval_secs, tolerance_secs
            );
        }

        Self {
            port: parse_env("PORT", 5000),
            internal_api_key,
            evolution,
            timezone,
            send_reminders_interval_secs,
            send_reminders_job_enabled: parse_env("SEND_REMINDERS_JOB_ENABLED", true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
