use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::warn;

use crate::{
    error::{AppError, AppResult},
    models::{CreateFoodRequest, FoodCreated, FoodItem, HealthStatus, MENU_LIST_LIMIT},
    state::AppState,
};

pub async fn healthcheck() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

pub async fn add_food(
    State(state): State<AppState>,
    payload: Result<Json<CreateFoodRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<FoodCreated>)> {
    let Json(payload) = payload?;
    let item = payload.validate().map_err(AppError::validation)?;

    let id = state.repo.insert(item).await?;

    Ok((StatusCode::CREATED, Json(FoodCreated::new(id.to_hex()))))
}

pub async fn list_menu(State(state): State<AppState>) -> AppResult<Json<Vec<FoodItem>>> {
    let items = state.repo.list(MENU_LIST_LIMIT).await?;

    for item in &items {
        if let Err(violations) = item.validate() {
            warn!(name = %item.name, ?violations, "stored menu item violates schema");
            return Err(AppError::storage("stored menu item does not match schema"));
        }
    }

    Ok(Json(items))
}
