use axum::{extract::State, Json};
use sea_orm::ConnectionTrait;
use serde_json::{json, Value};

use crate::{error::ApiResult, state::AppState};

pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state
        .db
        .execute_unprepared("SELECT 1")
        .await?;

    Ok(Json(json!({ "status": "ok" })))
}
