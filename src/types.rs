use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Messaging channel an inbound message arrived on. Detected from the
/// provider's `From` address (`whatsapp:` prefix or plain number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    WhatsApp,
    Sms,
}

impl Channel {
    pub fn tag(&self) -> &'static str {
        match self {
            Channel::WhatsApp => "whatsapp",
            Channel::Sms => "sms",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Channel::WhatsApp => "WhatsApp",
            Channel::Sms => "SMS",
        }
    }
}

/// One received message. Built once per webhook call from untrusted
/// form-encoded input, immutable afterwards, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub sender: String,
    pub recipient: String,
    pub body: String,
    pub external_message_id: String,
    pub channel: Channel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    TooShort,
    GenericGreetingOnly,
    Acceptable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    pub reason: ValidationReason,
}

impl ValidationResult {
    /// Valid exactly when the reason is `Acceptable`.
    pub fn is_valid(&self) -> bool {
        matches!(self.reason, ValidationReason::Acceptable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requester {
    pub name: String,
    pub email: String,
}

/// Ticket fields ready for the ticket-system create call. Serializes
/// directly into the `ticket` object of the create payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedTicket {
    pub subject: String,
    pub description: String,
    pub requester: Requester,
    pub tags: Vec<String>,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub ticket_type: String,
}

/// Reply sent back to the sender. Tagged so a reply is either literal
/// text or a content template with positional variables, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundReply {
    Text(String),
    Template {
        template_id: String,
        variables: BTreeMap<String, String>,
    },
}

/// Terminal outcome of one inbound-message pass, input to the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    ValidationFailed,
    TicketCreated(u64),
    TicketCreationFailed,
}
