use serde::Serialize;

// Unified API response envelope
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize, Debug, Default)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: &str) -> Self {
        Self::with_data(200, data, message, None)
    }

    pub fn success_with_meta(data: T, message: &str, meta: ResponseMeta) -> Self {
        Self::with_data(200, data, message, Some(meta))
    }

    pub fn created(data: T, message: &str) -> Self {
        Self::with_data(201, data, message, None)
    }

    fn with_data(code: u16, data: T, message: &str, meta: Option<ResponseMeta>) -> Self {
        Self {
            success: true,
            code,
            message: message.to_string(),
            data: Some(data),
            meta,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: u16, message: &str, errors: Vec<ErrorDetail>) -> Self {
        Self {
            success: false,
            code,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: Some(errors),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn failure(code: u16, error_code: &str, message: &str) -> Self {
        Self::error(
            code,
            message,
            vec![ErrorDetail {
                field: None,
                code: error_code.to_string(),
                message: message.to_string(),
            }],
        )
    }

    pub fn validation_error(errors: Vec<ErrorDetail>) -> Self {
        Self::error(400, "Validation failed", errors)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::failure(400, error_codes::VALIDATION_ERROR, message)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::failure(401, error_codes::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: &str) -> Self {
        Self::failure(403, error_codes::FORBIDDEN, message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::failure(404, error_codes::NOT_FOUND, message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::failure(500, error_codes::INTERNAL_ERROR, message)
    }
}

pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
