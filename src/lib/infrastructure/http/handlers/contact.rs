//! Contact form handler

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::Method,
    Json,
};
use tracing::{debug, error, info, warn};

use crate::{
    domain::{
        communication::mailer::Mailer,
        contact::{compose, SanitizedSubmission, SubmissionRequest},
    },
    infrastructure::http::{
        errors::{ContactError, ContactResponse},
        state::AppState,
    },
};

/// Relay a contact form submission by email
#[utoipa::path(
    post,
    operation_id = "submit_contact_form",
    tag = "Contact",
    path = "/",
    request_body(
        content = SubmissionRequest,
        description = "JSON object, or the same fields form-encoded",
        content_type = "application/json"
    ),
    responses(
        (status = StatusCode::OK, description = "Message sent", body = ContactResponse, example = json!({"status": "success", "message": "Message sent successfully"})),
        (status = StatusCode::METHOD_NOT_ALLOWED, description = "Method other than POST", body = ContactResponse, example = json!({"status": "error", "message": "Method not allowed"})),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Validation failed", body = ContactResponse, example = json!({"status": "error", "message": "The given data was invalid.", "errors": {"name": ["The name field is required"]}})),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Delivery failed", body = ContactResponse, example = json!({"status": "error", "message": "Failed to send message: connection refused"})),
    )
)]
pub async fn handler<M: Mailer>(
    State(state): State<AppState<M>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ContactResponse>, ContactError> {
    if method != Method::POST {
        warn!(%method, "rejected contact form request");
        return Err(ContactError::MethodNotAllowed);
    }

    let body = body?;

    let request = SubmissionRequest::decode(&body).unwrap_or_else(|err| {
        debug!(%err, "treating submission as empty");
        SubmissionRequest::default()
    });

    let submission = request.validate().map_err(|errors| {
        error!(%errors, "contact form validation failed");
        ContactError::Validation(errors)
    })?;

    let message = compose(
        SanitizedSubmission::from(submission),
        &state.config.sender(),
        state.config.recipients(),
    );

    if let Err(err) = state.mailer.send_email(&message).await {
        error!(error = %err, "failed to send contact form message");
        return Err(err.into());
    }

    info!(recipients = message.to.len(), "contact form message sent");

    Ok(Json(ContactResponse::success("Message sent successfully")))
}
