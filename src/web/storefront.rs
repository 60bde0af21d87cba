use axum::extract::{Path, State};
use axum::{Form, Json};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::instrument;
use crate::auth::{is_admin, is_customer, require_customer, require_user_id, RequestContext};
use crate::domain::{Category, Product};
use crate::error::AppError;
use crate::validation::{CheckoutForm, FormData};
use super::AppState;

#[derive(Debug, Serialize)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
}

#[derive(Debug, Serialize)]
pub struct CategoryWithProducts {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontData {
    pub products: Vec<ProductWithCategory>,
    pub categories: Vec<CategoryWithProducts>,
    pub is_customer: bool,
}

fn with_category(product: Product, categories: &[Category]) -> ProductWithCategory {
    let category = categories.iter().find(|c| c.id == product.category_id).cloned();
    ProductWithCategory { product, category }
}

/// Storefront home: every product, and the categories that have any.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>, ctx: RequestContext) -> Result<Json<StorefrontData>, AppError> {
    require_user_id(&ctx)?;
    if is_admin(&ctx) {
        return Err(AppError::Redirect("/admin".to_string()));
    }

    let products = state.products.list_products().await?;
    let categories = state.categories.list_categories().await?;

    let shelves = categories
        .iter()
        .map(|category| CategoryWithProducts {
            category: category.clone(),
            products: products.iter().filter(|p| p.category_id == category.id).cloned().collect(),
        })
        .filter(|shelf| !shelf.products.is_empty())
        .collect();

    Ok(Json(StorefrontData {
        products: products.into_iter().map(|p| with_category(p, &categories)).collect(),
        categories: shelves,
        is_customer: is_customer(&ctx),
    }))
}

#[instrument(skip(state, ctx))]
pub async fn product(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(slug): Path<String>,
) -> Result<Json<ProductWithCategory>, AppError> {
    require_user_id(&ctx)?;
    let product = state
        .products
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("No product found".to_string()))?;
    let category = state.categories.get_category(product.category_id.clone()).await?;
    Ok(Json(ProductWithCategory { product, category }))
}

#[instrument(skip_all)]
pub async fn checkout(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<FormData>,
) -> Result<Json<Value>, AppError> {
    let user = require_customer(&ctx, &state.users).await?;
    let cart = CheckoutForm::parse(&form)?;
    let order = state
        .orders
        .create_order(user.id, cart.items, cart.order_type, cart.payment_method)
        .await?;
    Ok(Json(json!({ "success": true, "order": order })))
}
