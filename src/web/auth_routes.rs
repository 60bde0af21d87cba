use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::{Form, Json};
use axum_extra::extract::cookie::SignedCookieJar;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{info, instrument};
use crate::auth::{register_customer, require_user, verify_login, RequestContext};
use crate::error::AppError;
use crate::validation::{safe_redirect, FormData, LoginForm, RegisterForm};
use super::AppState;

/// Signed-in visitors have no business on the auth pages.
async fn redirect_if_signed_in(state: &AppState, ctx: &RequestContext) -> Result<(), AppError> {
    if ctx.session.is_some() && require_user(ctx, &state.users).await.is_ok() {
        return Err(AppError::Redirect("/".to_string()));
    }
    Ok(())
}

fn page_data(query: &HashMap<String, String>) -> Json<Value> {
    Json(json!({ "redirectTo": safe_redirect(query.get("redirectTo").map(String::as_str)) }))
}

pub async fn login_page(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    redirect_if_signed_in(&state, &ctx).await?;
    Ok(page_data(&query))
}

pub async fn sign_up_page(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    redirect_if_signed_in(&state, &ctx).await?;
    Ok(page_data(&query))
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<FormData>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let login = LoginForm::parse(&form)?;
    let user = verify_login(&state.users, &state.passwords, &login.email, login.password)
        .await?
        .ok_or_else(|| AppError::field("email", "Invalid email or password"))?;

    info!(user_id = %user.id, "User signed in");
    let jar = state.session.start(jar, &user, login.remember);
    Ok((jar, Redirect::to(&login.redirect_to)))
}

#[instrument(skip_all)]
pub async fn sign_up(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<FormData>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let registration = RegisterForm::parse(&form)?;
    let redirect_to = registration.redirect_to.clone();
    let user = register_customer(&state.users, &state.passwords, registration).await?;

    let jar = state.session.start(jar, &user, false);
    Ok((jar, Redirect::to(&redirect_to)))
}

pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    (state.session.end(jar), Redirect::to("/"))
}
