//! Shared response envelope types for API handlers.
//!
//! Payload-bearing responses use a `{ "data": ... }` envelope; auth
//! endpoints acknowledge with a `{ "message": ... }` body.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Plain acknowledgment body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
