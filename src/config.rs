use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub http: HttpConfig,
    pub twilio: TwilioConfig,
    pub zendesk: ZendeskConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8093,
        }
    }
}

/// Optional shared token checked on the ticket-system webhook routes.
/// Absent token disables the check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub token: Option<String>,
}

/// Upper bound for every outbound collaborator call. An unbounded wait
/// on an external system is a defect, so this is not optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: 30 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilioConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// Our own number, the `From` of every reply.
    pub from_number: String,
    /// Content template SID; replies use template variables when set.
    pub content_template_sid: Option<String>,
    pub api_base_url: String,
    pub inbound_path: String,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            from_number: String::new(),
            content_template_sid: None,
            api_base_url: "https://api.twilio.com".to_string(),
            inbound_path: "/v1/channels/twilio/inbound".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZendeskConfig {
    pub api_base_url: String,
    pub email: Option<String>,
    pub api_token: Option<String>,
}

impl Default for ZendeskConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://example.zendesk.com".to_string(),
            email: None,
            api_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub endpoint: Option<String>,
    pub deployment: String,
    pub api_version: String,
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            deployment: "model-router".to_string(),
            api_version: "2024-12-01-preview".to_string(),
            api_key: None,
        }
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn resolve_config_path() -> PathBuf {
    env::var("TICKET_BRIDGE_CONFIG")
        .ok()
        .map(PathBuf::from)
        .unwrap_or_else(|| expand_tilde("~/.ticket-bridge/ticket-bridge.json"))
}

pub fn load_config() -> Config {
    let config_path = resolve_config_path();

    let mut cfg = Config::default();

    if config_path.exists() {
        if let Ok(raw) = fs::read_to_string(&config_path) {
            if let Ok(file_cfg) = serde_json::from_str::<Config>(&raw) {
                cfg = file_cfg;
            }
        }
    }

    // Override from environment
    if let Ok(token) = env::var("TICKET_BRIDGE_TOKEN") {
        if !token.trim().is_empty() {
            cfg.auth.token = Some(token);
        }
    }

    if let Ok(sid) = env::var("TICKET_BRIDGE_TWILIO_ACCOUNT_SID") {
        if !sid.trim().is_empty() {
            cfg.twilio.account_sid = Some(sid);
        }
    }

    if let Ok(token) = env::var("TICKET_BRIDGE_TWILIO_AUTH_TOKEN") {
        if !token.trim().is_empty() {
            cfg.twilio.auth_token = Some(token);
        }
    }

    if let Ok(number) = env::var("TICKET_BRIDGE_TWILIO_FROM_NUMBER") {
        if !number.trim().is_empty() {
            cfg.twilio.from_number = number;
        }
    }

    if let Ok(sid) = env::var("TICKET_BRIDGE_TWILIO_CONTENT_SID") {
        if !sid.trim().is_empty() {
            cfg.twilio.content_template_sid = Some(sid);
        }
    }

    if let Ok(url) = env::var("TICKET_BRIDGE_ZENDESK_BASE_URL") {
        if !url.trim().is_empty() {
            cfg.zendesk.api_base_url = url;
        }
    }

    if let Ok(email) = env::var("TICKET_BRIDGE_ZENDESK_EMAIL") {
        if !email.trim().is_empty() {
            cfg.zendesk.email = Some(email);
        }
    }

    if let Ok(token) = env::var("TICKET_BRIDGE_ZENDESK_API_TOKEN") {
        if !token.trim().is_empty() {
            cfg.zendesk.api_token = Some(token);
        }
    }

    if let Ok(endpoint) = env::var("TICKET_BRIDGE_LLM_ENDPOINT") {
        if !endpoint.trim().is_empty() {
            cfg.llm.endpoint = Some(endpoint);
        }
    }

    if let Ok(key) = env::var("TICKET_BRIDGE_LLM_API_KEY") {
        if !key.trim().is_empty() {
            cfg.llm.api_key = Some(key);
        }
    }

    cfg
}
