use crate::types::{Channel, DerivedTicket, InboundMessage, Priority, Requester};

/// Hard cap for a derived subject, ellipsis included.
pub const SUBJECT_MAX_CHARS: usize = 50;

const ELLIPSIS: &str = "...";

/// Ordered priority rules, first match wins. Matching is
/// case-insensitive substring; kept as data so tests can enumerate every
/// rule independently.
pub const PRIORITY_RULES: &[(Priority, &[&str])] = &[
    (
        Priority::Urgent,
        &["urgent", "emergency", "critical", "broken", "down", "outage"],
    ),
    (
        Priority::High,
        &["important", "issue", "problem", "error", "failed", "not working"],
    ),
];

/// Turns a validated inbound message into structured ticket fields.
/// Pure; not invoked when validation fails.
pub fn derive_ticket(msg: &InboundMessage) -> DerivedTicket {
    DerivedTicket {
        subject: derive_subject(msg.body.trim(), msg.channel),
        description: msg.body.clone(),
        requester: derive_requester(&msg.sender, msg.channel),
        tags: vec![msg.channel.tag().to_string(), "auto-created".to_string()],
        priority: derive_priority(&msg.body),
        ticket_type: "incident".to_string(),
    }
}

/// First sentence of the body (up to `.`, `!` or `?`; whole body when
/// none), truncated to fit `SUBJECT_MAX_CHARS` with an ellipsis marker.
/// Never returns an empty subject.
pub fn derive_subject(body: &str, channel: Channel) -> String {
    let end = body.find(['.', '!', '?']).unwrap_or(body.len());
    let sentence = body[..end].trim();

    if sentence.is_empty() {
        return format!("{} Support Request", channel.display_name());
    }

    if sentence.chars().count() > SUBJECT_MAX_CHARS {
        let cut: String = sentence
            .chars()
            .take(SUBJECT_MAX_CHARS - ELLIPSIS.len())
            .collect();
        return format!("{}{}", cut.trim_end(), ELLIPSIS);
    }

    sentence.to_string()
}

/// Synthesizes requester identity from the sender address. The email
/// local part keeps only the digits of the number (no `+`, no
/// separators).
pub fn derive_requester(sender: &str, channel: Channel) -> Requester {
    let digits: String = sender.chars().filter(|c| c.is_ascii_digit()).collect();
    Requester {
        name: format!("{} User ({})", channel.display_name(), sender),
        email: format!("{}@{}.zendesk.com", digits, channel.tag()),
    }
}

pub fn derive_priority(body: &str) -> Priority {
    let lowered = body.to_lowercase();
    for (priority, keywords) in PRIORITY_RULES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return *priority;
        }
    }
    Priority::Normal
}
