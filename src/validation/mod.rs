use axum::{Json, async_trait, extract::FromRequest, http::Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::{
    db::models::api::{ErrorDetail, error_codes},
    error::AppError,
};

/// 解析 JSON 请求体并执行 `validator` 校验规则
/// 校验失败时按字段返回错误详情
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(
        req: Request<axum::body::Body>,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::validation(format!("Invalid JSON format: {}", rejection.body_text()))
            })?;

        value
            .validate()
            .map_err(|errors| AppError::invalid_fields(error_details(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// 将 `ValidationErrors` 转换为按字段名排序的错误详情列表
pub fn error_details(errors: &ValidationErrors) -> Vec<ErrorDetail> {
    let mut details: Vec<ErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| ErrorDetail {
                field: Some(field.to_string()),
                code: error_codes::VALIDATION_ERROR.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field: {}", field)),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}
