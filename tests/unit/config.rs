use std::path::PathBuf;
use ticket_bridge::config::{
    expand_tilde, resolve_config_path, Config, HttpConfig, LlmConfig, TwilioConfig, ZendeskConfig,
};

#[test]
fn test_expand_tilde_with_home() {
    let path = expand_tilde("~/test/file.txt");
    assert!(path.to_string_lossy().contains("test/file.txt"));
    assert!(!path.to_string_lossy().starts_with("~"));
}

#[test]
fn test_expand_tilde_absolute_untouched() {
    assert_eq!(
        expand_tilde("/etc/ticket-bridge.json"),
        PathBuf::from("/etc/ticket-bridge.json")
    );
}

#[test]
fn test_resolve_config_path_env_override() {
    std::env::set_var("TICKET_BRIDGE_CONFIG", "/custom/path/config.json");
    let path = resolve_config_path();
    assert_eq!(path, PathBuf::from("/custom/path/config.json"));
    std::env::remove_var("TICKET_BRIDGE_CONFIG");
}

#[test]
fn test_config_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.port, 8093);
    assert!(cfg.auth.token.is_none());
    assert_eq!(cfg.http.timeout_seconds, 30);
}

#[test]
fn test_timeout_is_always_configured() {
    // Outbound calls must be bounded; the default config already carries
    // a nonzero timeout.
    assert!(HttpConfig::default().timeout_seconds > 0);
}

#[test]
fn test_twilio_defaults() {
    let twilio = TwilioConfig::default();
    assert!(twilio.account_sid.is_none());
    assert!(twilio.auth_token.is_none());
    assert!(twilio.content_template_sid.is_none());
    assert_eq!(twilio.api_base_url, "https://api.twilio.com");
    assert_eq!(twilio.inbound_path, "/v1/channels/twilio/inbound");
}

#[test]
fn test_zendesk_defaults() {
    let zendesk = ZendeskConfig::default();
    assert!(zendesk.email.is_none());
    assert!(zendesk.api_token.is_none());
}

#[test]
fn test_llm_defaults() {
    let llm = LlmConfig::default();
    assert!(llm.endpoint.is_none());
    assert!(llm.api_key.is_none());
    assert_eq!(llm.deployment, "model-router");
}

#[test]
fn test_config_round_trips_through_json() {
    let mut cfg = Config::default();
    cfg.auth.token = Some("secret".to_string());
    cfg.twilio.content_template_sid = Some("HXtest".to_string());

    let raw = serde_json::to_string(&cfg).unwrap();
    let parsed: Config = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.auth.token.as_deref(), Some("secret"));
    assert_eq!(parsed.twilio.content_template_sid.as_deref(), Some("HXtest"));
    assert_eq!(parsed.server.port, cfg.server.port);
}
