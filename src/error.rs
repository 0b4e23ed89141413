use thiserror::Error;

/// Failure taxonomy for the bridge. Every variant is absorbed at the
/// handler boundary and converted into a reply and/or log entry; none
/// propagate as a process-level error.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("ticket system request failed: {0}")]
    TicketSystem(String),

    #[error("message delivery failed: {0}")]
    MessagingDelivery(String),

    #[error("llm request failed: {0}")]
    Llm(String),

    #[error("malformed inbound payload: {0}")]
    MalformedPayload(String),
}
