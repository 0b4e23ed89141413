use crate::types::{OutboundReply, ReplyOutcome};
use std::collections::BTreeMap;

/// Guidance sent when validation rejects a message.
pub const VALIDATION_GUIDANCE: &str = "Please provide more details about your issue. \
For example: 'I can't log in' or 'Billing question about invoice #123'";

/// Apology sent when the ticket system could not create the ticket.
pub const CREATION_FAILED_TEXT: &str = "Sorry, we couldn't create your ticket right now. \
Please try again later or contact support directly.";

/// Bodies longer than this get an ellipsis on their excerpt.
const EXCERPT_ELLIPSIS_THRESHOLD: usize = 50;
/// Characters of the body kept in an excerpt before the marker.
const EXCERPT_MAX_CHARS: usize = 47;

/// Produces exactly one reply for an inbound message. When a content
/// template is configured it is used for ticket outcomes; validation
/// failures always reply with literal guidance text.
pub fn compose(outcome: &ReplyOutcome, body: &str, template_id: Option<&str>) -> OutboundReply {
    match outcome {
        ReplyOutcome::ValidationFailed => OutboundReply::Text(VALIDATION_GUIDANCE.to_string()),
        ReplyOutcome::TicketCreated(ticket_id) => match template_id {
            Some(template_id) => OutboundReply::Template {
                template_id: template_id.to_string(),
                variables: template_variables(body, Some(*ticket_id)),
            },
            None => OutboundReply::Text(format!(
                "Ticket #{} created: '{}'. We'll get back to you soon.",
                ticket_id,
                excerpt(body)
            )),
        },
        ReplyOutcome::TicketCreationFailed => match template_id {
            Some(template_id) => OutboundReply::Template {
                template_id: template_id.to_string(),
                variables: template_variables(body, None),
            },
            None => OutboundReply::Text(CREATION_FAILED_TEXT.to_string()),
        },
    }
}

/// Short form of the body quoted back to the sender. Capped at
/// `EXCERPT_MAX_CHARS`; bodies running past the threshold get the
/// ellipsis marker.
pub fn excerpt(body: &str) -> String {
    let cut: String = body.chars().take(EXCERPT_MAX_CHARS).collect();
    if body.chars().count() > EXCERPT_ELLIPSIS_THRESHOLD {
        format!("{}{}", cut.trim_end(), "...")
    } else {
        cut
    }
}

/// Positional variables for the provider-side content template:
/// "1" carries the body excerpt, "2" the ticket id or "N/A".
fn template_variables(body: &str, ticket_id: Option<u64>) -> BTreeMap<String, String> {
    let mut variables = BTreeMap::new();
    variables.insert("1".to_string(), excerpt(body));
    variables.insert(
        "2".to_string(),
        ticket_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
    );
    variables
}
