use chrono::Utc;
use crate::actor_framework::{Entity, StoreError};
use crate::domain::{Order, OrderCreate, OrderStatus};
use super::lifecycle::{cancel, transition};
use super::{OrderAction, OrderError};

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    // Orders only change through their lifecycle actions.
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Error = OrderError;

    const KIND: &'static str = "order";

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Order from its priced lines.
    ///
    /// # Notes
    /// The order starts out `PENDING` and its total is the sum of its lines.
    fn from_create(id: String, payload: OrderCreate) -> Result<Self, OrderError> {
        if payload.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        let total = payload.lines.iter().map(|line| line.subtotal()).sum();
        Ok(Self {
            id,
            user_id: payload.user_id,
            lines: payload.lines,
            order_type: payload.order_type,
            payment_method: payload.payment_method,
            status: OrderStatus::Pending,
            total,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        self.status = match action {
            OrderAction::UpdateStatus(target) => transition(self.order_type, self.status, target)?,
            OrderAction::Cancel { user_id } => {
                // Other customers' orders do not exist as far as the caller can tell.
                if user_id != self.user_id {
                    return Err(StoreError::NotFound { kind: Self::KIND, id: self.id.clone() }.into());
                }
                cancel(self.status)?
            }
        };
        Ok(self.clone())
    }
}
