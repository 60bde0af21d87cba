use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::instrument;
use crate::auth::{require_admin, RequestContext};
use crate::error::AppError;
use super::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub orders_by_status: BTreeMap<&'static str, usize>,
    pub order_count: usize,
    pub product_count: usize,
    pub out_of_stock_count: usize,
    pub category_count: usize,
    pub customer_count: usize,
}

#[instrument(skip_all)]
pub async fn dashboard(State(state): State<AppState>, ctx: RequestContext) -> Result<Json<Dashboard>, AppError> {
    require_admin(&ctx, &state.users).await?;

    let orders = state.orders.list_orders().await?;
    let products = state.products.list_products().await?;
    let categories = state.categories.list_categories().await?;
    let users = state.users.list_users().await?;

    let mut orders_by_status = BTreeMap::new();
    for order in &orders {
        *orders_by_status.entry(order.status.as_str()).or_insert(0) += 1;
    }

    Ok(Json(Dashboard {
        orders_by_status,
        order_count: orders.len(),
        product_count: products.len(),
        out_of_stock_count: products.iter().filter(|p| p.is_out_of_stock()).count(),
        category_count: categories.len(),
        customer_count: users.iter().filter(|u| !u.is_admin()).count(),
    }))
}
