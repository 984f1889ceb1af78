use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;
use rove_service::{
	Error as ServiceError, RecommendRequest, RecommendResponse, ScenariosRequest,
	ScenariosResponse,
};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/recommend", post(recommend))
		.route("/v1/scenarios", post(scenarios))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn recommend(
	State(state): State<AppState>,
	Json(payload): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
	let response = state.service.recommend(payload).await?;

	Ok(Json(response))
}

async fn scenarios(
	State(state): State<AppState>,
	Json(payload): Json<ScenariosRequest>,
) -> Json<ScenariosResponse> {
	Json(state.service.scenarios(payload))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	success: bool,
	error: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self { status, message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, message),
			// Audit failures are contained inside the pipeline; reaching
			// here would be a bug, but never a user-visible 5xx surprise.
			other => Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { success: false, error: self.message };

		(self.status, Json(body)).into_response()
	}
}
