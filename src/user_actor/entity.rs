use crate::actor_framework::Entity;
use crate::domain::{normalize_email, User, UserCreate};
use super::UserError;

impl Entity for User {
    type Id = String;
    type CreatePayload = UserCreate;
    // Profile editing is not offered, and the role never changes.
    type Patch = ();
    type Action = ();
    type ActionResult = ();
    type Error = UserError;

    const KIND: &'static str = "user";

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new User from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Server-assigned identifier
    /// * `payload` - Profile fields and the already-hashed password
    fn from_create(id: String, payload: UserCreate) -> Result<Self, UserError> {
        Ok(Self {
            id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: normalize_email(&payload.email),
            password_hash: payload.password_hash,
            role: payload.role,
            phone_no: payload.phone_no,
            address: payload.address,
            dob: payload.dob,
            city: payload.city,
            state: payload.state,
            zipcode: payload.zipcode,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), UserError> {
        Ok(())
    }

    /// One account per email address.
    fn check_unique(&self, other: &Self) -> Result<(), UserError> {
        if self.email == other.email {
            return Err(UserError::AlreadyExists(self.email.clone()));
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), UserError> {
        Ok(())
    }
}
