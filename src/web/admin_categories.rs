use axum::extract::State;
use axum::{Form, Json};
use serde_json::{json, Value};
use tracing::instrument;
use crate::auth::{require_admin, RequestContext};
use crate::error::AppError;
use crate::validation::{CategoryForm, FormData};
use super::AppState;

pub async fn loader(State(state): State<AppState>, ctx: RequestContext) -> Result<Json<Value>, AppError> {
    require_admin(&ctx, &state.users).await?;
    let categories = state.categories.list_categories().await?;
    Ok(Json(json!({ "categories": categories })))
}

/// Creates a category, or renames the one named by `categoryId`.
#[instrument(skip_all)]
pub async fn action(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<FormData>,
) -> Result<Json<Value>, AppError> {
    require_admin(&ctx, &state.users).await?;
    let input = CategoryForm::parse(&form)?;
    let category = state.categories.upsert_category(input.category_id, input.name).await?;
    Ok(Json(json!({ "success": true, "category": category })))
}
