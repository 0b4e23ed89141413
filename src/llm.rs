use crate::channels::zendesk::TicketComment;
use crate::config::LlmConfig;
use crate::error::BridgeError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Categorization {
    pub category: String,
    pub confidence: f64,
}

/// Structured output of the solved-ticket conversation analysis. Every
/// field is optional so a partially filled model reply still parses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketAnalysis {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub satisfaction_likelihood: Option<String>,
    #[serde(default)]
    pub agent_empathy_score: Option<u8>,
    #[serde(default)]
    pub clarity_score: Option<u8>,
    #[serde(default)]
    pub resolution_confidence: Option<String>,
    #[serde(default)]
    pub pain_points: Vec<String>,
    #[serde(default)]
    pub frustration_signals: Vec<String>,
    #[serde(default)]
    pub action_recommendations: Vec<String>,
}

const CATEGORIZER_SYSTEM_PROMPT: &str = "You are a support ticket categorizer. \
Given a ticket subject and description, respond with a JSON object containing \
\"category\" (a short lowercase label such as billing, login, outage, general) \
and \"confidence\" (a number between 0 and 1). Respond with the JSON object only.";

const ANALYST_SYSTEM_PROMPT: &str = "You are a support quality analyst AI. You will \
be given a list of ticket comments, each with plain_body, created_at, and author_id. \
There are two participants: a Requester (customer) and a Support Engineer (agent). \
Identify each participant's role from tone and context, then analyze the customer \
experience. Respond with a JSON object containing: summary, sentiment (Positive, \
Neutral, Negative), satisfaction_likelihood (High, Medium, Low), pain_points, \
agent_empathy_score (1-5), clarity_score (1-5), resolution_confidence, \
frustration_signals, and action_recommendations. Respond with the JSON object only.";

/// Classifies a new ticket into a category tag.
pub async fn categorize_ticket(
    client: &Client,
    cfg: &LlmConfig,
    subject: &str,
    description: &str,
) -> Result<Categorization, BridgeError> {
    let user = format!("Subject: {}\n\nDescription: {}", subject, description);
    let content = chat(client, cfg, CATEGORIZER_SYSTEM_PROMPT, &user).await?;
    serde_json::from_str(&content)
        .map_err(|err| BridgeError::Llm(format!("unparseable categorization: {}", err)))
}

/// Runs the support-quality analysis over a solved ticket's public
/// comments.
pub async fn analyze_comments(
    client: &Client,
    cfg: &LlmConfig,
    comments: &[TicketComment],
) -> Result<TicketAnalysis, BridgeError> {
    let comments_json =
        serde_json::to_string(comments).map_err(|err| BridgeError::Llm(err.to_string()))?;
    let user = format!("Here is the conversation data in json {}", comments_json);
    let content = chat(client, cfg, ANALYST_SYSTEM_PROMPT, &user).await?;
    serde_json::from_str(&content)
        .map_err(|err| BridgeError::Llm(format!("unparseable analysis: {}", err)))
}

async fn chat(
    client: &Client,
    cfg: &LlmConfig,
    system: &str,
    user: &str,
) -> Result<String, BridgeError> {
    let endpoint = cfg
        .endpoint
        .as_deref()
        .ok_or_else(|| BridgeError::Llm("llm endpoint not configured".to_string()))?;
    let api_key = cfg
        .api_key
        .as_deref()
        .ok_or_else(|| BridgeError::Llm("llm api key not configured".to_string()))?;

    let url = format!(
        "{}/openai/deployments/{}/chat/completions?api-version={}",
        endpoint.trim_end_matches('/'),
        cfg.deployment,
        cfg.api_version
    );

    let payload = json!({
        "messages": [
            {"role": "system", "content": system},
            {"role": "user", "content": user},
        ],
        "max_tokens": 8192,
        "temperature": 0.7,
        "top_p": 0.95,
    });

    let resp = client
        .post(&url)
        .header("api-key", api_key)
        .json(&payload)
        .send()
        .await
        .map_err(|err| BridgeError::Llm(err.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(BridgeError::Llm(format!("{} {}", status, body)));
    }

    let value: Value = resp
        .json()
        .await
        .map_err(|err| BridgeError::Llm(err.to_string()))?;
    value
        .pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| BridgeError::Llm("empty completion".to_string()))
}
