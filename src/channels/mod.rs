pub mod twilio;
pub mod zendesk;
