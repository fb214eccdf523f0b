//! OpenAPI module

use axum::Json;
use utoipa::OpenApi;

use crate::{
    domain::contact::SubmissionRequest,
    infrastructure::http::{
        errors::{ContactResponse, Status},
        handlers::contact,
    },
};

/// The API description
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Contact Relay"),
    paths(contact::handler),
    components(schemas(SubmissionRequest, ContactResponse, Status))
)]
pub struct ApiDocs;

/// Serves the OpenAPI document
pub async fn handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDocs::openapi())
}
