use tracing::{error, info, instrument, warn};
use crate::domain::{CartItem, Order, OrderCreate, OrderLine, OrderStatus, OrderType, PaymentMethod};
use crate::order_actor::{OrderAction, OrderError};
use crate::product_actor::ProductError;
use crate::actor_framework::ResourceClient;
use crate::clients::{ProductClient, UserClient};

/// Client for interacting with the Order actor.
///
/// This client handles the checkout orchestration, validating the user and
/// every product and reserving stock before the order is stored.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    product_client: ProductClient,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, user_client: UserClient, product_client: ProductClient) -> Self {
        Self { inner, user_client, product_client }
    }

    #[instrument(skip(self, items), fields(item_count = items.len()))]
    pub async fn create_order(
        &self,
        user_id: String,
        items: Vec<CartItem>,
        order_type: OrderType,
        payment_method: PaymentMethod,
    ) -> Result<Order, OrderError> {
        info!("Processing create_order request");

        // Step 1: Validate user
        match self.user_client.get_user(user_id.clone()).await? {
            Some(user) => info!(user_email = %user.email, "User validation successful"),
            None => {
                error!("User not found");
                return Err(OrderError::InvalidUser(user_id));
            }
        }

        // Step 2: Validate products and price the lines
        let mut lines = Vec::with_capacity(items.len());
        for item in merge_items(items) {
            let product = self
                .product_client
                .get_product(item.product_id.clone())
                .await
                .map_err(stock_error)?
                .ok_or_else(|| {
                    error!(product_id = %item.product_id, "Product not found");
                    OrderError::InvalidProduct(item.product_id.clone())
                })?;
            lines.push(OrderLine {
                product_id: product.id,
                product_name: product.name,
                unit_price: product.price,
                quantity: item.quantity,
            });
        }
        if lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        // Step 3: Reserve stock, undoing earlier reservations on failure
        for (reserved, line) in lines.iter().enumerate() {
            if let Err(e) = self.product_client.reserve_stock(line.product_id.clone(), line.quantity).await {
                warn!(error = %e, product_id = %line.product_id, "Stock reservation failed");
                self.release_lines(&lines[..reserved]).await;
                return Err(stock_error(e));
            }
        }
        info!("Stock reserved successfully");

        // Step 4: Create order in ResourceActor
        let payload = OrderCreate { user_id, lines: lines.clone(), order_type, payment_method };
        match self.inner.create(payload).await {
            Ok(order) => {
                info!(order_id = %order.id, total = order.total, "Order created");
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "Order creation failed");
                self.release_lines(&lines).await;
                Err(e)
            }
        }
    }

    /// Applies an admin status change through the lifecycle state machine.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: String, status: OrderStatus) -> Result<Order, OrderError> {
        let order = self.inner.perform_action(id, OrderAction::UpdateStatus(status)).await?;
        info!(status = %order.status, "Order status updated");
        Ok(order)
    }

    /// Cancels a customer's own pending order and returns its stock.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: String, user_id: String) -> Result<Order, OrderError> {
        let order = self.inner.perform_action(id, OrderAction::Cancel { user_id }).await?;
        self.release_lines(&order.lines).await;
        info!("Order cancelled");
        Ok(order)
    }

    /// The user's orders, newest first.
    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: String) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.inner.select(move |order| order.user_id == user_id).await?;
        orders.reverse();
        Ok(orders)
    }

    async fn release_lines(&self, lines: &[OrderLine]) {
        for line in lines {
            if let Err(e) = self.product_client.release_stock(line.product_id.clone(), line.quantity).await {
                error!(error = %e, product_id = %line.product_id, "Failed to release stock");
            }
        }
    }
}

impl_client_methods!(OrderClient, Order, OrderError, order, orders);

/// Folds repeated cart entries for the same product into one line.
fn merge_items(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items {
        match merged.iter_mut().find(|m| m.product_id == item.product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => merged.push(item),
        }
    }
    merged
}

fn stock_error(e: ProductError) -> OrderError {
    match e {
        ProductError::Store(e) => OrderError::Store(e),
        other => OrderError::Stock(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_items() {
        let items = vec![
            CartItem { product_id: "a".into(), quantity: 1 },
            CartItem { product_id: "b".into(), quantity: 2 },
            CartItem { product_id: "a".into(), quantity: 3 },
        ];
        assert_eq!(
            merge_items(items),
            vec![
                CartItem { product_id: "a".into(), quantity: 4 },
                CartItem { product_id: "b".into(), quantity: 2 },
            ]
        );
    }
}
