use crate::types::{ValidationReason, ValidationResult};

/// Minimum trimmed length for a message to carry enough detail for a
/// ticket.
pub const MIN_BODY_CHARS: usize = 10;

/// Greeting/acknowledgment openers that reject a message when they make
/// up essentially the whole body. Ordered so longer forms shadow their
/// prefixes ("okay" before "ok", "thank you" before "thanks").
pub const GREETING_PATTERNS: &[&str] = &[
    "good morning",
    "good afternoon",
    "good evening",
    "thank you",
    "thanks",
    "hello",
    "hey",
    "hi",
    "okay",
    "ok",
    "yes",
    "no",
    "help",
    "support",
];

/// Decides whether an inbound body justifies creating a ticket.
/// Pure and deterministic; always returns a result.
///
/// The greeting rule runs before the length rule so a bare "hi" or "ok"
/// reports `GenericGreetingOnly` rather than `TooShort`. Issue-keyword
/// detection is deliberately not a gate; length and pure-greeting
/// rejection are the only hard rules.
pub fn validate(body: &str) -> ValidationResult {
    let clean = body.trim();
    let lowered = clean.to_lowercase();

    if is_generic_greeting(&lowered) {
        return ValidationResult {
            reason: ValidationReason::GenericGreetingOnly,
        };
    }

    if clean.chars().count() < MIN_BODY_CHARS {
        return ValidationResult {
            reason: ValidationReason::TooShort,
        };
    }

    ValidationResult {
        reason: ValidationReason::Acceptable,
    }
}

/// Whole-message match: the pattern must account for the entire body,
/// allowing only trailing punctuation and whitespace. A substring hit
/// ("hello, my dashboard is broken") does not count.
fn is_generic_greeting(lowered: &str) -> bool {
    if lowered.is_empty() {
        return false;
    }
    for pattern in GREETING_PATTERNS {
        if let Some(rest) = lowered.strip_prefix(pattern) {
            if rest
                .chars()
                .all(|c| c.is_whitespace() || matches!(c, '.' | ',' | '!' | '?'))
            {
                return true;
            }
        }
    }
    false
}
