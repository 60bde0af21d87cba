//! Route guards.
//!
//! A guard either yields the identity the handler needs or an
//! [`AppError::Redirect`] that the handler propagates with `?`, ending the
//! request. Guards never render a "forbidden" page.

use tracing::{info, instrument};
use crate::clients::UserClient;
use crate::domain::{Role, User};
use crate::error::AppError;
use super::RequestContext;

pub const LOGIN_PATH: &str = "/login";

fn login_redirect(ctx: &RequestContext) -> AppError {
    let query = serde_urlencoded::to_string(&[("redirectTo", ctx.path.as_str())]).unwrap_or_default();
    AppError::Redirect(format!("{LOGIN_PATH}?{query}"))
}

pub fn require_user_id(ctx: &RequestContext) -> Result<&str, AppError> {
    ctx.user_id().ok_or_else(|| {
        info!(path = %ctx.path, "Anonymous request redirected to login");
        login_redirect(ctx)
    })
}

/// Loads the signed-in user. A session naming a user that no longer exists
/// is treated as no session.
#[instrument(skip_all, fields(path = %ctx.path))]
pub async fn require_user(ctx: &RequestContext, users: &UserClient) -> Result<User, AppError> {
    let user_id = require_user_id(ctx)?;
    match users.get_user(user_id.to_string()).await? {
        Some(user) => Ok(user),
        None => {
            info!(user_id, "Session references unknown user");
            Err(login_redirect(ctx))
        }
    }
}

/// Anonymous visitors go to login; customers are sent back to the storefront.
#[instrument(skip_all, fields(path = %ctx.path))]
pub async fn require_admin(ctx: &RequestContext, users: &UserClient) -> Result<User, AppError> {
    let user = require_user(ctx, users).await?;
    if user.role != Role::Admin {
        info!(user_id = %user.id, "Non-admin redirected away from admin route");
        return Err(AppError::Redirect("/".to_string()));
    }
    Ok(user)
}

/// Admins have no cart; they are sent to the back-office instead.
#[instrument(skip_all, fields(path = %ctx.path))]
pub async fn require_customer(ctx: &RequestContext, users: &UserClient) -> Result<User, AppError> {
    let user = require_user(ctx, users).await?;
    if user.role != Role::Customer {
        return Err(AppError::Redirect("/admin".to_string()));
    }
    Ok(user)
}

pub fn is_admin(ctx: &RequestContext) -> bool {
    ctx.session.as_ref().is_some_and(|s| s.role == Role::Admin)
}

pub fn is_customer(ctx: &RequestContext) -> bool {
    ctx.session.as_ref().is_some_and(|s| s.role == Role::Customer)
}
