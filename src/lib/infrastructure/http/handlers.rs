//! API handler modules

use std::any::Any;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::error;

use super::errors::{ContactError, ContactResponse};

pub mod contact;

/// Catch panics and return a 500 error
pub fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal server error".to_string()
    };

    error!(panic = %details, "request handler panicked");

    let response = Json(ContactResponse::error(&details)).into_response();

    (StatusCode::INTERNAL_SERVER_ERROR, response).into_response()
}

/// Unknown routes
pub async fn not_found() -> ContactError {
    ContactError::NotFound
}

/// Known routes hit with the wrong method
pub async fn method_not_allowed() -> ContactError {
    ContactError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use super::*;
    use axum::body::to_bytes;
    use testresult::TestResult;

    #[tokio::test]
    async fn test_panic_handler() -> TestResult {
        let panic_info = simulate_panic();
        let response = panic_handler(panic_info);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await?;

        let json = serde_json::from_slice::<serde_json::Value>(&body)?;

        assert_eq!(
            json,
            serde_json::json!({ "status": "error", "message": "Something went wrong" })
        );

        Ok(())
    }

    fn simulate_panic() -> Box<dyn std::any::Any + Send + 'static> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            panic!("Something went wrong");
        }));

        if let Err(err) = result {
            err
        } else {
            panic!("The panic did not occur as expected");
        }
    }
}
