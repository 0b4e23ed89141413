use ticket_bridge::ticket::{
    derive_priority, derive_requester, derive_subject, derive_ticket, SUBJECT_MAX_CHARS,
};
use ticket_bridge::types::{Channel, InboundMessage, Priority};

fn whatsapp_message(body: &str) -> InboundMessage {
    InboundMessage {
        sender: "+15551234567".to_string(),
        recipient: "+14155238886".to_string(),
        body: body.to_string(),
        external_message_id: "SM123".to_string(),
        channel: Channel::WhatsApp,
    }
}

#[test]
fn test_subject_is_first_sentence() {
    assert_eq!(
        derive_subject("Printer jammed. Also the scanner is slow.", Channel::WhatsApp),
        "Printer jammed"
    );
}

#[test]
fn test_subject_whole_body_without_punctuation() {
    assert_eq!(derive_subject("need a refund", Channel::WhatsApp), "need a refund");
}

#[test]
fn test_subject_short_body_kept_verbatim() {
    // Five characters, no terminal punctuation: the text itself, not the
    // fallback.
    assert_eq!(derive_subject("howdy", Channel::WhatsApp), "howdy");
}

#[test]
fn test_subject_truncated_with_ellipsis() {
    let sentence = "a".repeat(80);
    let subject = derive_subject(&sentence, Channel::WhatsApp);
    assert!(subject.chars().count() <= SUBJECT_MAX_CHARS);
    assert!(subject.ends_with("..."));
}

#[test]
fn test_subject_fallback_when_empty() {
    assert_eq!(derive_subject("", Channel::WhatsApp), "WhatsApp Support Request");
    assert_eq!(derive_subject("   ", Channel::Sms), "SMS Support Request");
}

#[test]
fn test_requester_synthesis() {
    let requester = derive_requester("+1 (555) 123-4567", Channel::WhatsApp);
    assert_eq!(requester.name, "WhatsApp User (+1 (555) 123-4567)");
    assert_eq!(requester.email, "15551234567@whatsapp.zendesk.com");
}

#[test]
fn test_requester_sms_channel() {
    let requester = derive_requester("+447700900123", Channel::Sms);
    assert_eq!(requester.name, "SMS User (+447700900123)");
    assert_eq!(requester.email, "447700900123@sms.zendesk.com");
}

#[test]
fn test_priority_urgent_keywords() {
    for body in [
        "this is urgent",
        "EMERGENCY at the office",
        "service is down again",
        "total outage since noon",
    ] {
        assert_eq!(derive_priority(body), Priority::Urgent, "body: {:?}", body);
    }
}

#[test]
fn test_priority_high_keywords() {
    for body in [
        "there is an issue with my invoice",
        "getting error 404",
        "the export is not working",
    ] {
        assert_eq!(derive_priority(body), Priority::High, "body: {:?}", body);
    }
}

#[test]
fn test_priority_defaults_to_normal() {
    assert_eq!(derive_priority("question about my plan"), Priority::Normal);
}

#[test]
fn test_priority_urgent_wins_over_high() {
    // Both keyword sets match; the urgent set is checked first.
    assert_eq!(
        derive_priority("urgent: getting an error on checkout"),
        Priority::Urgent
    );
}

#[test]
fn test_derive_ticket_fields() {
    let msg = whatsapp_message("I can't log into my account, getting error 404 when trying to access dashboard");
    let ticket = derive_ticket(&msg);

    assert_eq!(
        ticket.subject,
        "I can't log into my account, getting error 404..."
    );
    assert!(ticket.subject.chars().count() <= SUBJECT_MAX_CHARS);
    assert_eq!(ticket.description, msg.body);
    assert_eq!(ticket.tags, vec!["whatsapp".to_string(), "auto-created".to_string()]);
    assert_eq!(ticket.priority, Priority::High);
    assert_eq!(ticket.ticket_type, "incident");
    assert_eq!(ticket.requester.email, "15551234567@whatsapp.zendesk.com");
}

#[test]
fn test_derive_ticket_sms_tags() {
    let msg = InboundMessage {
        channel: Channel::Sms,
        ..whatsapp_message("my invoice has a problem, please check")
    };
    let ticket = derive_ticket(&msg);
    assert_eq!(ticket.tags, vec!["sms".to_string(), "auto-created".to_string()]);
    assert_eq!(ticket.requester.name, "SMS User (+15551234567)");
}

#[test]
fn test_derive_ticket_idempotent() {
    let msg = whatsapp_message("the payment page shows an error every time");
    assert_eq!(derive_ticket(&msg), derive_ticket(&msg));
}

#[test]
fn test_description_keeps_body_unmodified() {
    let msg = whatsapp_message("  leading and trailing spaces stay  ");
    let ticket = derive_ticket(&msg);
    assert_eq!(ticket.description, "  leading and trailing spaces stay  ");
}
