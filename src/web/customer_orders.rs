use axum::extract::State;
use axum::{Form, Json};
use serde_json::{json, Value};
use tracing::instrument;
use crate::auth::{require_customer, RequestContext};
use crate::error::AppError;
use crate::validation::{CancelOrderForm, FormData};
use super::AppState;

/// Order history, newest first.
pub async fn loader(State(state): State<AppState>, ctx: RequestContext) -> Result<Json<Value>, AppError> {
    let user = require_customer(&ctx, &state.users).await?;
    let orders = state.orders.orders_for_user(user.id).await?;
    Ok(Json(json!({ "orders": orders })))
}

#[instrument(skip_all)]
pub async fn action(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<FormData>,
) -> Result<Json<Value>, AppError> {
    let user = require_customer(&ctx, &state.users).await?;
    match form.get("intent").map(String::as_str) {
        Some("cancel-order") => {
            let cancel = CancelOrderForm::parse(&form)?;
            let order = state.orders.cancel_order(cancel.order_id, user.id).await?;
            Ok(Json(json!({ "success": true, "order": order })))
        }
        _ => Err(AppError::BadRequest("Invalid intent".to_string())),
    }
}
