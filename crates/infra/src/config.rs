use dill_reminders_domain::TriggerConfig;
use dill_reminders_utils::create_random_secret;
use std::str::FromStr;
use tracing::{info, warn};

const DEFAULT_TRIGGERS: &str = "24h,2h";
const DEFAULT_TOLERANCE_MINUTES: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret expected in the `x-api-key` header of protected routes
    pub api_secret_key: String,
    /// Port for the application to run on
    pub port: usize,
    /// Sender identity of every outbound message. Dispatching refuses to
    /// run without it.
    pub from_inbox: Option<String>,
    /// Trigger windows used by the periodic dispatch job and by dispatch
    /// requests that do not provide their own
    pub triggers: Vec<TriggerConfig>,
    /// Interval of the periodic dispatch job. `0` disables the job.
    pub dispatch_interval_secs: u64,
    /// Maximum number of upcoming assignments listed in a daily summary
    pub summary_top_n: usize,
    pub mail: MailConfig,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    /// When absent outbound mail is only recorded in memory
    pub agentmail_api_key: Option<String>,
    pub agentmail_base_url: String,
    /// A send that takes longer than this is a delivery failure
    pub send_timeout_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        let api_secret_key = match std::env::var("REMINDERS_API_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find REMINDERS_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(30);
                info!("Api key for the reminders api was generated and set to: {}", key);
                key
            }
        };

        let port = parse_or_default("PORT", std::env::var("PORT").ok(), 5000);

        let from_inbox = non_empty_var("FROM_INBOX");
        if from_inbox.is_none() {
            warn!("Did not find FROM_INBOX environment variable. Reminders will not be dispatched until it is provided.");
        }

        let tolerance_minutes = parse_or_default(
            "REMINDER_TOLERANCE_MINUTES",
            std::env::var("REMINDER_TOLERANCE_MINUTES").ok(),
            DEFAULT_TOLERANCE_MINUTES,
        );
        let triggers = parse_triggers(
            &std::env::var("REMINDER_TRIGGERS").unwrap_or_else(|_| DEFAULT_TRIGGERS.into()),
            tolerance_minutes,
        );

        let dispatch_interval_secs = parse_or_default(
            "REMINDER_DISPATCH_INTERVAL_SECS",
            std::env::var("REMINDER_DISPATCH_INTERVAL_SECS").ok(),
            60,
        );
        let summary_top_n = parse_or_default("SUMMARY_TOP_N", std::env::var("SUMMARY_TOP_N").ok(), 5);

        let agentmail_api_key = non_empty_var("AGENTMAIL_API_KEY");
        if agentmail_api_key.is_none() {
            warn!("Did not find AGENTMAIL_API_KEY environment variable. Outbound mail will only be recorded in memory.");
        }
        let mail = MailConfig {
            agentmail_api_key,
            agentmail_base_url: std::env::var("AGENTMAIL_BASE_URL")
                .unwrap_or_else(|_| "https://api.agentmail.to".into()),
            send_timeout_secs: parse_or_default(
                "MAIL_SEND_TIMEOUT_SECS",
                std::env::var("MAIL_SEND_TIMEOUT_SECS").ok(),
                30,
            ),
        };

        Self {
            api_secret_key,
            port,
            from_inbox,
            triggers,
            dispatch_interval_secs,
            summary_top_n,
            mail,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_or_default<T: FromStr + std::fmt::Display>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, raw, default
                );
                default
            }
        },
    }
}

/// Malformed trigger tokens are skipped with a warning
fn parse_triggers(tokens: &str, tolerance_minutes: f64) -> Vec<TriggerConfig> {
    let (triggers, errors) = TriggerConfig::parse_list(tokens, tolerance_minutes);
    for e in errors {
        warn!("Ignoring configured reminder trigger. Error: {}", e);
    }
    if triggers.is_empty() {
        warn!("No valid reminder triggers are configured.");
    }
    triggers
}
