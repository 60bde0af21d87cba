use tracing::{info, instrument, warn};
use crate::clients::UserClient;
use crate::domain::{Role, User, UserCreate};
use crate::error::AppError;
use crate::validation::RegisterForm;
use super::Passwords;

/// Checks a login attempt. Unknown email and wrong password both yield
/// `None`, and both pay for one hash verification.
#[instrument(skip(users, passwords, password))]
pub async fn verify_login(
    users: &UserClient,
    passwords: &Passwords,
    email: &str,
    password: String,
) -> Result<Option<User>, AppError> {
    let user = users.find_by_email(email).await?;
    let stored_hash = match &user {
        Some(user) => user.password_hash.clone(),
        None => passwords.dummy_hash().to_string(),
    };
    let valid = passwords.verify(password, stored_hash).await?;
    if !valid || user.is_none() {
        warn!("Login rejected");
        return Ok(None);
    }
    Ok(user)
}

/// Creates a customer account from a validated registration.
#[instrument(skip_all, fields(user_email = %form.email))]
pub async fn register_customer(users: &UserClient, passwords: &Passwords, form: RegisterForm) -> Result<User, AppError> {
    if users.find_by_email(&form.email).await?.is_some() {
        info!("Registration for existing email");
        return Err(AppError::field("email", "A user already exists with this email"));
    }
    let password_hash = passwords.hash(form.password).await?;
    let user = users
        .register(UserCreate {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password_hash,
            role: Role::Customer,
            phone_no: form.phone_no,
            address: form.address,
            dob: form.dob,
            city: form.city,
            state: form.state,
            zipcode: form.zipcode,
        })
        .await?;
    Ok(user)
}
