use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::AppState;
use crate::db::models::{ApiResponse, LabelResponse, ResponseMeta};
use crate::error::{AppError, AppResult};
use crate::middleware::extract_request_id;
use crate::services::context::RepoContext;
use crate::services::labels_service::LabelsService;
use crate::validation::ValidatedJson;

#[derive(Deserialize)]
pub struct LabelPath {
    pub label_id: i64,
}

fn parse_label_id(path: Result<Path<LabelPath>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(path)| path.label_id)
        .map_err(|_| AppError::validation("Invalid label id"))
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct CreateLabelRequest {
    #[validate(length(min = 1, message = "Label name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Label color is required"))]
    pub color: String,
}

/// Empty or missing fields leave the stored value untouched.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EditLabelRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

pub async fn list_labels(
    State(state): State<AppState>,
    headers: HeaderMap,
    ctx: RepoContext,
) -> impl IntoResponse {
    match LabelsService::list(state.labels.as_ref(), &ctx).await {
        Ok(labels) => {
            let data: Vec<LabelResponse> = labels
                .iter()
                .map(|label| LabelResponse::from_label(label, &state.config.api_base_url))
                .collect();
            let meta = ResponseMeta {
                request_id: extract_request_id(&headers),
                total_count: Some(data.len() as i64),
            };
            let response =
                ApiResponse::success_with_meta(data, "Labels retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

// The context only gates repository visibility here; the lookup is by id.
pub async fn get_label(
    State(state): State<AppState>,
    _ctx: RepoContext,
    path: Result<Path<LabelPath>, PathRejection>,
) -> impl IntoResponse {
    let label_id = match parse_label_id(path) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    match LabelsService::get(state.labels.as_ref(), label_id).await {
        Ok(label) => {
            let data = LabelResponse::from_label(&label, &state.config.api_base_url);
            let response = ApiResponse::success(data, "Label retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_label(
    State(state): State<AppState>,
    ctx: RepoContext,
    ValidatedJson(payload): ValidatedJson<CreateLabelRequest>,
) -> impl IntoResponse {
    match LabelsService::create(state.labels.as_ref(), &ctx, &payload).await {
        Ok(label) => {
            let data = LabelResponse::from_label(&label, &state.config.api_base_url);
            let response = ApiResponse::created(data, "Label created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn edit_label(
    State(state): State<AppState>,
    ctx: RepoContext,
    path: Result<Path<LabelPath>, PathRejection>,
    payload: Result<Json<EditLabelRequest>, JsonRejection>,
) -> impl IntoResponse {
    let label_id = match parse_label_id(path) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return AppError::validation(format!("Invalid JSON format: {}", rejection.body_text()))
                .into_response();
        }
    };

    match LabelsService::edit(state.labels.as_ref(), &ctx, label_id, &payload).await {
        Ok(label) => {
            let data = LabelResponse::from_label(&label, &state.config.api_base_url);
            let response = ApiResponse::success(data, "Label updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_label(
    State(state): State<AppState>,
    ctx: RepoContext,
    path: Result<Path<LabelPath>, PathRejection>,
) -> impl IntoResponse {
    let label_id = match parse_label_id(path) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    match LabelsService::delete(state.labels.as_ref(), &ctx, label_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
