pub mod channels;
pub mod compose;
pub mod config;
pub mod error;
pub mod llm;
pub mod ticket;
pub mod types;
pub mod validate;

pub use config::Config;

use self::channels::{twilio, zendesk};
use self::types::{InboundMessage, ReplyOutcome};

use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Builds the application. Configuration is passed in explicitly so
/// tests can point the collaborator base URLs at local mock servers.
pub fn create_app(config: Config) -> anyhow::Result<(AppState, Router)> {
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.http.timeout_seconds))
        .build()?;
    let state = AppState { config, http };

    let authed_routes = Router::new()
        .route("/v1/webhooks/ticket-created", post(ticket_created))
        .route("/v1/webhooks/ticket-status-changed", post(ticket_status_changed))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let inbound_path = state.config.twilio.inbound_path.clone();
    let public_routes = Router::new()
        .route("/v1/health", get(health))
        .route(&inbound_path, post(twilio_inbound));

    let app = Router::new()
        .merge(authed_routes)
        .merge(public_routes)
        .with_state(state.clone());

    Ok((state, app))
}

async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> impl IntoResponse {
    if let Some(token) = state.config.auth.token.as_ref() {
        let header = headers
            .get("X-Ticket-Bridge-Token")
            .and_then(|v| v.to_str().ok());
        if header != Some(token.as_str()) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }
    next.run(req).await
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Inbound message webhook. The provider expects an acknowledgment
/// regardless of downstream outcome, so every path returns 200 with an
/// empty TwiML document; replies go out through the Messages API
/// separately.
async fn twilio_inbound(
    State(state): State<AppState>,
    Form(form): Form<twilio::TwilioInboundForm>,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    info!(%request_id, "inbound message webhook called");

    match twilio::normalize_twilio_inbound(form) {
        Ok(inbound) => handle_inbound(&state, &request_id, inbound).await,
        Err(err) => {
            warn!(%request_id, %err, "rejected payload at the boundary");
        }
    }

    twiml_ack()
}

fn twiml_ack() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response></Response>",
    )
        .into_response()
}

/// One pass of the per-request state machine:
/// Received -> Validating -> {Rejected | Deriving -> CreatingTicket ->
/// {Created | CreationFailed}} -> ComposingReply -> Replied.
/// All collaborator failures are absorbed here; nothing propagates.
async fn handle_inbound(state: &AppState, request_id: &str, inbound: InboundMessage) {
    info!(
        request_id,
        sender = %inbound.sender,
        channel = inbound.channel.tag(),
        message_id = %inbound.external_message_id,
        "validating"
    );
    let validation = validate::validate(&inbound.body);

    let outcome = if !validation.is_valid() {
        info!(%request_id, reason = ?validation.reason, "rejected");
        ReplyOutcome::ValidationFailed
    } else {
        info!(%request_id, "deriving ticket fields");
        let ticket = ticket::derive_ticket(&inbound);
        info!(
            request_id,
            subject = %ticket.subject,
            priority = ?ticket.priority,
            "creating ticket"
        );
        match zendesk::create_ticket(&state.http, &state.config.zendesk, &ticket).await {
            Ok(ticket_id) => {
                info!(%request_id, ticket_id, "ticket created");
                ReplyOutcome::TicketCreated(ticket_id)
            }
            Err(err) => {
                error!(%request_id, %err, outcome = "TicketSystemFailure", "ticket creation failed");
                ReplyOutcome::TicketCreationFailed
            }
        }
    };

    info!(%request_id, "composing reply");
    let reply = compose::compose(
        &outcome,
        &inbound.body,
        state.config.twilio.content_template_sid.as_deref(),
    );

    match twilio::send_reply(
        &state.http,
        &state.config.twilio,
        inbound.channel,
        &inbound.sender,
        &reply,
    )
    .await
    {
        Ok(message_sid) => info!(%request_id, %message_sid, "replied"),
        Err(err) => {
            error!(%request_id, %err, outcome = "MessagingDeliveryFailure", "reply delivery failed")
        }
    }
}

/// Ticket-created webhook from the ticket system: categorize the new
/// ticket and write the category tag back. Failures are logged and the
/// webhook is still acknowledged.
async fn ticket_created(State(state): State<AppState>, Json(payload): Json<Value>) -> impl IntoResponse {
    let request_id = Uuid::new_v4().to_string();
    info!(%request_id, "ticket-created webhook called");

    let Some(detail) = payload.get("detail") else {
        warn!(%request_id, "no detail field in payload");
        return Json(envelope(&request_id, "error", "missing detail field"));
    };
    let subject = detail.get("subject").and_then(|v| v.as_str()).unwrap_or_default();
    let description = detail
        .get("description")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    let ticket_id = detail.get("id").and_then(|v| v.as_u64());

    let categorization =
        match llm::categorize_ticket(&state.http, &state.config.llm, subject, description).await {
            Ok(categorization) => categorization,
            Err(err) => {
                error!(%request_id, %err, "categorization failed");
                return Json(envelope(&request_id, "success", "webhook logged, categorization failed"));
            }
        };
    info!(
        %request_id,
        category = %categorization.category,
        confidence = categorization.confidence,
        "ticket categorized"
    );

    if let Some(ticket_id) = ticket_id {
        if let Err(err) =
            zendesk::update_ticket_tags(&state.http, &state.config.zendesk, ticket_id, &categorization)
                .await
        {
            error!(%request_id, %err, ticket_id, "failed to tag ticket");
        }
    } else {
        warn!(%request_id, "no ticket id found, skipping tag update");
    }

    Json(envelope(&request_id, "success", "webhook processed"))
}

/// Ticket-status-changed webhook: when a ticket lands in SOLVED, run
/// the conversation analysis over its public comments and post the
/// result as a private comment.
async fn ticket_status_changed(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4().to_string();
    info!(%request_id, "ticket-status-changed webhook called");

    let current = payload
        .pointer("/event/current")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    let ticket_status = payload
        .pointer("/detail/status")
        .and_then(|v| v.as_str())
        .unwrap_or_default();

    if current != "SOLVED" || ticket_status != "SOLVED" {
        info!(%request_id, current, ticket_status, "ticket not solved, nothing to do");
        return Json(envelope(&request_id, "success", "status change ignored"));
    }

    let Some(ticket_id) = payload.pointer("/detail/id").and_then(|v| v.as_u64()) else {
        warn!(%request_id, "no ticket id found, skipping analysis");
        return Json(envelope(&request_id, "success", "no ticket id"));
    };

    let comments =
        match zendesk::list_public_comments(&state.http, &state.config.zendesk, ticket_id).await {
            Ok(comments) if !comments.is_empty() => comments,
            Ok(_) => {
                warn!(%request_id, ticket_id, "no public comments to analyze");
                return Json(envelope(&request_id, "success", "no public comments"));
            }
            Err(err) => {
                error!(%request_id, %err, ticket_id, "failed to fetch comments");
                return Json(envelope(&request_id, "success", "comment fetch failed"));
            }
        };

    info!(%request_id, ticket_id, comments = comments.len(), "analyzing conversation");
    match llm::analyze_comments(&state.http, &state.config.llm, &comments).await {
        Ok(analysis) => {
            if let Err(err) = zendesk::update_ticket_with_analysis(
                &state.http,
                &state.config.zendesk,
                ticket_id,
                &analysis,
            )
            .await
            {
                error!(%request_id, %err, ticket_id, "failed to post analysis comment");
            }
        }
        Err(err) => error!(%request_id, %err, ticket_id, "analysis failed"),
    }

    Json(envelope(&request_id, "success", "ticket analyzed"))
}

fn envelope(request_id: &str, status: &str, message: &str) -> Value {
    json!({
        "status": status,
        "message": message,
        "request_id": request_id,
        "timestamp": Utc::now().to_rfc3339(),
    })
}
