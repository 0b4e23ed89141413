use crate::config::TwilioConfig;
use crate::error::BridgeError;
use crate::types::{Channel, InboundMessage, OutboundReply};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

const WHATSAPP_PREFIX: &str = "whatsapp:";

/// Raw form parameters of an inbound message webhook. All fields
/// optional so missing ones surface as `MalformedPayload` instead of an
/// extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TwilioInboundForm {
    #[serde(rename = "From")]
    pub from: Option<String>,
    #[serde(rename = "To")]
    pub to: Option<String>,
    #[serde(rename = "Body")]
    pub body: Option<String>,
    #[serde(rename = "MessageSid")]
    pub message_sid: Option<String>,
}

/// Normalizes the provider form payload into an `InboundMessage`.
/// A missing body is an empty string (a validator concern, not a
/// malformed payload); missing addressing or message id is malformed.
pub fn normalize_twilio_inbound(form: TwilioInboundForm) -> Result<InboundMessage, BridgeError> {
    let from = form
        .from
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| BridgeError::MalformedPayload("missing From".to_string()))?;
    let to = form
        .to
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| BridgeError::MalformedPayload("missing To".to_string()))?;
    let message_sid = form
        .message_sid
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| BridgeError::MalformedPayload("missing MessageSid".to_string()))?;

    let channel = if from.starts_with(WHATSAPP_PREFIX) {
        Channel::WhatsApp
    } else {
        Channel::Sms
    };

    Ok(InboundMessage {
        sender: from.trim_start_matches(WHATSAPP_PREFIX).to_string(),
        recipient: to.trim_start_matches(WHATSAPP_PREFIX).to_string(),
        body: form.body.unwrap_or_default(),
        external_message_id: message_sid,
        channel,
    })
}

/// Delivers one reply via the provider's Messages API. Literal replies
/// go out as `Body`, template replies as `ContentSid` plus JSON-encoded
/// `ContentVariables`. Returns the provider message SID.
pub async fn send_reply(
    client: &Client,
    cfg: &TwilioConfig,
    channel: Channel,
    to: &str,
    reply: &OutboundReply,
) -> Result<String, BridgeError> {
    let account_sid = cfg
        .account_sid
        .as_deref()
        .ok_or_else(|| BridgeError::MessagingDelivery("twilio account sid missing".to_string()))?;
    let auth_token = cfg
        .auth_token
        .as_deref()
        .ok_or_else(|| BridgeError::MessagingDelivery("twilio auth token missing".to_string()))?;

    let url = format!(
        "{}/2010-04-01/Accounts/{}/Messages.json",
        cfg.api_base_url, account_sid
    );

    let (from_addr, to_addr) = match channel {
        Channel::WhatsApp => (
            format!("{}{}", WHATSAPP_PREFIX, cfg.from_number),
            format_whatsapp_number(to),
        ),
        Channel::Sms => (cfg.from_number.clone(), to.to_string()),
    };

    let mut params: Vec<(&str, String)> = vec![("From", from_addr), ("To", to_addr)];
    match reply {
        OutboundReply::Text(text) => params.push(("Body", text.clone())),
        OutboundReply::Template {
            template_id,
            variables,
        } => {
            let encoded = serde_json::to_string(variables)
                .map_err(|err| BridgeError::MessagingDelivery(err.to_string()))?;
            params.push(("ContentSid", template_id.clone()));
            params.push(("ContentVariables", encoded));
        }
    }

    let resp = client
        .post(&url)
        .basic_auth(account_sid, Some(auth_token))
        .form(&params)
        .send()
        .await
        .map_err(|err| BridgeError::MessagingDelivery(err.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(BridgeError::MessagingDelivery(format!("{} {}", status, body)));
    }

    let value: Value = resp
        .json()
        .await
        .map_err(|err| BridgeError::MessagingDelivery(err.to_string()))?;
    Ok(value
        .get("sid")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string())
}

/// Formats a raw phone number as a WhatsApp address. The address is
/// always rebuilt from the digits alone, so separators and spacing in
/// the input never leak through; ten-digit US numbers get a `+1`,
/// anything else is taken as already international.
pub fn format_whatsapp_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        format!("{}+1{}", WHATSAPP_PREFIX, digits)
    } else {
        format!("{}+{}", WHATSAPP_PREFIX, digits)
    }
}
