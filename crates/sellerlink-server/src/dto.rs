//! REST DTOs.

use serde::{Deserialize, Serialize};

/// Response envelope wrapper.
#[derive(Debug, Serialize)]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    pub data: T,
    pub metadata: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
}

impl<T> ResponseEnvelope<T> {
    pub fn ok(request_id: impl Into<String>, data: T) -> Self {
        Self { success: true, data, metadata: ResponseMeta { request_id: request_id.into() } }
    }

    pub fn failed(request_id: impl Into<String>, data: T) -> Self {
        Self { success: false, data, metadata: ResponseMeta { request_id: request_id.into() } }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub seller_id: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub seller_id: String,
}
