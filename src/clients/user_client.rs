use tracing::{debug, info, instrument};
use crate::domain::{normalize_email, User, UserCreate};
use crate::user_actor::UserError;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: crate::actor_framework::ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user, users);

impl UserClient {
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        let email = normalize_email(email);
        self.inner.find(move |user| user.email == email).await
    }

    /// Stores a new account. Fails with [`UserError::AlreadyExists`] when the
    /// email is taken, even if another registration raced this one.
    #[instrument(skip(self, user), fields(user_email = %user.email, role = ?user.role))]
    pub async fn register(&self, user: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        let user = self.inner.create(user).await?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }
}
