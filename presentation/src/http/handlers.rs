//! API endpoint handlers

use super::AppState;
use super::error::ApiError;
use axum::{
    Json,
    extract::{FromRequest, Request, State, rejection::JsonRejection},
};
use duaonai_application::GenerateDuaInput;
use duaonai_domain::{DuaQuery, DuaRecord};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Body of `POST /api/gemini/dua`
#[derive(Debug, Deserialize)]
pub struct DuaRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// JSON extractor whose rejections use the API error shape
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            // No JSON body at all means no query was sent
            Err(JsonRejection::MissingJsonContentType(_)) => Err(ApiError::MissingQuery),
            Err(rejection) => Err(ApiError::InvalidBody(rejection.body_text())),
        }
    }
}

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Dua generation endpoint
///
/// The in-flight model call is cancelled when the client goes away: axum
/// drops this future, which drops the guard and fires the token.
pub(super) async fn generate_dua(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DuaRequest>,
) -> Result<Json<DuaRecord>, ApiError> {
    let query = payload
        .query
        .and_then(|q| DuaQuery::try_new(q).ok())
        .ok_or(ApiError::MissingQuery)?;

    info!("Received dua request: {}", duaonai_domain::truncate(query.content(), 100));

    let token = CancellationToken::new();
    let _guard = token.clone().drop_guard();

    let input = GenerateDuaInput::new(query, state.params.clone()).with_cancellation(token);
    let record = state.use_case.execute(input).await?;

    Ok(Json(record))
}
