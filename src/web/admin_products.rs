use axum::extract::State;
use axum::{Form, Json};
use serde_json::{json, Value};
use tracing::instrument;
use crate::auth::{require_admin, RequestContext};
use crate::error::AppError;
use crate::validation::{FormData, ProductForm};
use super::AppState;

pub async fn loader(State(state): State<AppState>, ctx: RequestContext) -> Result<Json<Value>, AppError> {
    require_admin(&ctx, &state.users).await?;
    let products = state.products.list_products().await?;
    let categories = state.categories.list_categories().await?;
    Ok(Json(json!({ "products": products, "categories": categories })))
}

#[instrument(skip_all)]
pub async fn action(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<FormData>,
) -> Result<Json<Value>, AppError> {
    require_admin(&ctx, &state.users).await?;
    let input = ProductForm::parse(&form)?;
    if state.categories.get_category(input.fields.category_id.clone()).await?.is_none() {
        return Err(AppError::field("category", "Category not found"));
    }
    let product = state.products.upsert_product(input.product_id, input.fields).await?;
    Ok(Json(json!({ "success": true, "product": product })))
}
