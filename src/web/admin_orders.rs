use axum::extract::State;
use axum::{Form, Json};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::instrument;
use crate::auth::{require_admin, RequestContext};
use crate::domain::{Order, OrderStatus, User};
use crate::error::AppError;
use crate::order_actor::StatusSelector;
use crate::validation::{FormData, StatusUpdateForm};
use super::AppState;

/// One line of the admin orders table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    #[serde(flatten)]
    pub order: Order,
    pub customer_name: String,
    pub customer_email: String,
    pub badge: &'static str,
    pub status_selector: StatusSelector,
}

pub fn badge_color(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "gray",
        OrderStatus::Cancelled => "red",
        _ => "green",
    }
}

impl OrderRow {
    fn new(order: Order, customer: Option<&User>) -> Self {
        let (customer_name, customer_email) = match customer {
            Some(user) => (user.full_name(), user.email.clone()),
            None => (String::new(), String::new()),
        };
        Self {
            badge: badge_color(order.status),
            status_selector: StatusSelector::for_order(order.order_type, order.status),
            customer_name,
            customer_email,
            order,
        }
    }
}

pub async fn loader(State(state): State<AppState>, ctx: RequestContext) -> Result<Json<Value>, AppError> {
    require_admin(&ctx, &state.users).await?;
    let users: HashMap<String, User> = state
        .users
        .list_users()
        .await?
        .into_iter()
        .map(|user| (user.id.clone(), user))
        .collect();
    let mut rows: Vec<OrderRow> = state
        .orders
        .list_orders()
        .await?
        .into_iter()
        .map(|order| {
            let customer = users.get(&order.user_id);
            OrderRow::new(order, customer)
        })
        .collect();
    rows.reverse();
    Ok(Json(json!({ "orders": rows })))
}

#[instrument(skip_all)]
pub async fn action(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<FormData>,
) -> Result<Json<Value>, AppError> {
    require_admin(&ctx, &state.users).await?;
    match form.get("intent").map(String::as_str) {
        Some("update-order-status") => {
            let update = StatusUpdateForm::parse(&form)?;
            state.orders.update_status(update.order_id, update.status).await?;
            Ok(Json(json!({ "success": true })))
        }
        _ => Err(AppError::BadRequest("Invalid intent".to_string())),
    }
}
