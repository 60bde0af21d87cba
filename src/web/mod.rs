//! HTTP surface. Each route has a loader (GET) and/or an action (POST);
//! every handler runs its guard first, then validation, then the stores.

mod admin;
mod admin_categories;
mod admin_orders;
mod admin_products;
mod auth_routes;
mod customer_orders;
mod storefront;

use axum::extract::FromRef;
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::Key;
use crate::auth::{Passwords, SessionSettings};
use crate::clients::{CategoryClient, OrderClient, ProductClient, UserClient};

/// Shared handles given to every handler.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub users: UserClient,
    pub categories: CategoryClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    pub passwords: Passwords,
    pub key: Key,
    pub session: SessionSettings,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(storefront::index))
        .route("/product/{slug}", get(storefront::product))
        .route("/checkout", post(storefront::checkout))
        .route("/orders", get(customer_orders::loader).post(customer_orders::action))
        .route("/login", get(auth_routes::login_page).post(auth_routes::login))
        .route("/sign-up", get(auth_routes::sign_up_page).post(auth_routes::sign_up))
        .route("/logout", post(auth_routes::logout))
        .route("/admin", get(admin::dashboard))
        .route("/admin/orders", get(admin_orders::loader).post(admin_orders::action))
        .route("/admin/products", get(admin_products::loader).post(admin_products::action))
        .route("/admin/categories", get(admin_categories::loader).post(admin_categories::action))
        .with_state(state)
}
