use crate::config::ZendeskConfig;
use crate::error::BridgeError;
use crate::llm::{Categorization, TicketAnalysis};
use crate::types::DerivedTicket;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Public ticket comment projected down to the fields the analysis
/// prompt consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketComment {
    pub plain_body: String,
    pub created_at: String,
    pub author_id: i64,
}

fn credentials(cfg: &ZendeskConfig) -> Result<(String, String), BridgeError> {
    match (cfg.email.as_deref(), cfg.api_token.as_deref()) {
        (Some(email), Some(token)) => Ok((format!("{}/token", email), token.to_string())),
        _ => Err(BridgeError::TicketSystem(
            "zendesk credentials missing".to_string(),
        )),
    }
}

/// Creates a ticket and returns the id assigned by the ticket system.
pub async fn create_ticket(
    client: &Client,
    cfg: &ZendeskConfig,
    ticket: &DerivedTicket,
) -> Result<u64, BridgeError> {
    let (user, token) = credentials(cfg)?;
    let url = format!("{}/api/v2/tickets.json", cfg.api_base_url);

    let resp = client
        .post(&url)
        .basic_auth(user, Some(token))
        .json(&json!({ "ticket": ticket }))
        .send()
        .await
        .map_err(|err| BridgeError::TicketSystem(err.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(BridgeError::TicketSystem(format!("{} {}", status, body)));
    }

    let value: Value = resp
        .json()
        .await
        .map_err(|err| BridgeError::TicketSystem(err.to_string()))?;
    value
        .pointer("/ticket/id")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| BridgeError::TicketSystem("ticket id missing in response".to_string()))
}

/// Generic ticket update, shared by the tag and analysis writers.
pub async fn update_ticket(
    client: &Client,
    cfg: &ZendeskConfig,
    ticket_id: u64,
    update: Value,
) -> Result<(), BridgeError> {
    let (user, token) = credentials(cfg)?;
    let url = format!("{}/api/v2/tickets/{}.json", cfg.api_base_url, ticket_id);

    let resp = client
        .put(&url)
        .basic_auth(user, Some(token))
        .json(&update)
        .send()
        .await
        .map_err(|err| BridgeError::TicketSystem(err.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(BridgeError::TicketSystem(format!("{} {}", status, body)));
    }
    Ok(())
}

/// Tags a ticket with its categorization and leaves a private comment
/// recording the confidence.
pub async fn update_ticket_tags(
    client: &Client,
    cfg: &ZendeskConfig,
    ticket_id: u64,
    categorization: &Categorization,
) -> Result<(), BridgeError> {
    let update = json!({
        "ticket": {
            "tags": [format!("auto_categorized_{}", categorization.category)],
            "comment": {
                "body": format!(
                    "Ticket automatically categorized as '{}' with {:.2}% confidence.",
                    categorization.category,
                    categorization.confidence * 100.0
                ),
                "public": false
            }
        }
    });
    update_ticket(client, cfg, ticket_id, update).await
}

/// Posts the solved-ticket analysis as a private comment.
pub async fn update_ticket_with_analysis(
    client: &Client,
    cfg: &ZendeskConfig,
    ticket_id: u64,
    analysis: &TicketAnalysis,
) -> Result<(), BridgeError> {
    let update = json!({
        "ticket": {
            "comment": {
                "body": format_analysis_comment(analysis),
                "public": false
            }
        }
    });
    update_ticket(client, cfg, ticket_id, update).await
}

/// Fetches a ticket's comments and keeps only the public ones.
pub async fn list_public_comments(
    client: &Client,
    cfg: &ZendeskConfig,
    ticket_id: u64,
) -> Result<Vec<TicketComment>, BridgeError> {
    let (user, token) = credentials(cfg)?;
    let url = format!("{}/api/v2/tickets/{}/comments.json", cfg.api_base_url, ticket_id);

    let resp = client
        .get(&url)
        .basic_auth(user, Some(token))
        .send()
        .await
        .map_err(|err| BridgeError::TicketSystem(err.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(BridgeError::TicketSystem(format!("{} {}", status, body)));
    }

    let value: Value = resp
        .json()
        .await
        .map_err(|err| BridgeError::TicketSystem(err.to_string()))?;

    let mut out = Vec::new();
    if let Some(comments) = value.get("comments").and_then(|v| v.as_array()) {
        for comment in comments {
            if !comment.get("public").and_then(|v| v.as_bool()).unwrap_or(false) {
                continue;
            }
            out.push(TicketComment {
                plain_body: comment
                    .get("plain_body")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                created_at: comment
                    .get("created_at")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                author_id: comment.get("author_id").and_then(|v| v.as_i64()).unwrap_or_default(),
            });
        }
    }
    Ok(out)
}

/// Renders the analysis into the private comment body. Sections with no
/// data are skipped.
pub fn format_analysis_comment(analysis: &TicketAnalysis) -> String {
    let mut lines = vec!["AI Analysis Report".to_string(), String::new()];

    if let Some(summary) = &analysis.summary {
        lines.push(format!("Summary: {}", summary));
        lines.push(String::new());
    }
    if let Some(sentiment) = &analysis.sentiment {
        lines.push(format!("Sentiment: {}", sentiment));
    }
    if let Some(likelihood) = &analysis.satisfaction_likelihood {
        lines.push(format!("Satisfaction likelihood: {}", likelihood));
    }
    if let Some(score) = analysis.agent_empathy_score {
        lines.push(format!("Agent empathy score: {}/5", score));
    }
    if let Some(score) = analysis.clarity_score {
        lines.push(format!("Clarity score: {}/5", score));
    }

    if !analysis.pain_points.is_empty() {
        lines.push(String::new());
        lines.push("Pain points:".to_string());
        for point in &analysis.pain_points {
            lines.push(format!("- {}", point));
        }
    }
    if !analysis.frustration_signals.is_empty() {
        lines.push(String::new());
        lines.push("Frustration signals:".to_string());
        for signal in &analysis.frustration_signals {
            lines.push(format!("- {}", signal));
        }
    }
    if !analysis.action_recommendations.is_empty() {
        lines.push(String::new());
        lines.push("Action recommendations:".to_string());
        for recommendation in &analysis.action_recommendations {
            lines.push(format!("- {}", recommendation));
        }
    }
    if let Some(confidence) = &analysis.resolution_confidence {
        lines.push(String::new());
        lines.push(format!("Resolution confidence: {}", confidence));
    }

    lines.join("\n")
}
