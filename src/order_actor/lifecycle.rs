//! Order status state machine.
//!
//! Which status an order may move to depends on how it is fulfilled:
//!
//! | type     | selectable statuses                                                      |
//! |----------|--------------------------------------------------------------------------|
//! | PICKUP   | ACCEPTED, PROCESSING, READY, COMPLETED                                   |
//! | DELIVERY | ACCEPTED, PROCESSING, ORDER_ASSIGNED, SHIPPED, OUT_FOR_DELIVERY, DELIVERED |
//!
//! DELIVERED, COMPLETED and CANCELLED are terminal: nothing leaves them.
//! [`transition`] is evaluated inside the order store, so the check and the
//! write it guards cannot be split by a concurrent request.

use serde::Serialize;
use thiserror::Error;
use crate::domain::{OrderStatus, OrderType};

const PICKUP_STATUSES: [OrderStatus; 4] = [
    OrderStatus::Accepted,
    OrderStatus::Processing,
    OrderStatus::Ready,
    OrderStatus::Completed,
];

const DELIVERY_STATUSES: [OrderStatus; 6] = [
    OrderStatus::Accepted,
    OrderStatus::Processing,
    OrderStatus::OrderAssigned,
    OrderStatus::Shipped,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
];

#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum TransitionError {
    #[error("Order is already {0} and can no longer change")]
    Terminal(OrderStatus),
    #[error("{target} is not a valid status for {order_type:?} orders")]
    NotAllowed { order_type: OrderType, target: OrderStatus },
    #[error("Only pending orders can be cancelled, this one is {0}")]
    NotCancellable(OrderStatus),
}

/// Statuses an admin may pick for an order of the given type, in display order.
pub fn status_options(order_type: OrderType) -> &'static [OrderStatus] {
    match order_type {
        OrderType::Pickup => &PICKUP_STATUSES,
        OrderType::Delivery => &DELIVERY_STATUSES,
    }
}

/// Validates a status change and returns the status to store.
pub fn transition(
    order_type: OrderType,
    current: OrderStatus,
    target: OrderStatus,
) -> Result<OrderStatus, TransitionError> {
    if current.is_terminal() {
        return Err(TransitionError::Terminal(current));
    }
    if !status_options(order_type).contains(&target) {
        return Err(TransitionError::NotAllowed { order_type, target });
    }
    Ok(target)
}

/// Customer-initiated cancellation, allowed only before the store accepts the order.
pub fn cancel(current: OrderStatus) -> Result<OrderStatus, TransitionError> {
    match current {
        OrderStatus::Pending => Ok(OrderStatus::Cancelled),
        other => Err(TransitionError::NotCancellable(other)),
    }
}

/// View-model for the admin status dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSelector {
    pub options: Vec<OrderStatus>,
    pub selected: OrderStatus,
    pub disabled: bool,
}

impl StatusSelector {
    pub fn for_order(order_type: OrderType, status: OrderStatus) -> Self {
        Self {
            options: status_options(order_type).to_vec(),
            selected: status,
            disabled: status.is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_sets_per_order_type() {
        assert_eq!(
            status_options(OrderType::Pickup),
            &[OrderStatus::Accepted, OrderStatus::Processing, OrderStatus::Ready, OrderStatus::Completed]
        );
        assert_eq!(
            status_options(OrderType::Delivery),
            &[
                OrderStatus::Accepted,
                OrderStatus::Processing,
                OrderStatus::OrderAssigned,
                OrderStatus::Shipped,
                OrderStatus::OutForDelivery,
                OrderStatus::Delivered,
            ]
        );
    }

    #[test]
    fn test_selector_disabled_only_for_terminal_statuses() {
        for status in OrderStatus::ALL {
            for order_type in [OrderType::Pickup, OrderType::Delivery] {
                let selector = StatusSelector::for_order(order_type, status);
                assert_eq!(selector.disabled, status.is_terminal(), "{status} on {order_type:?}");
                assert_eq!(selector.options, status_options(order_type));
            }
        }
        assert!(StatusSelector::for_order(OrderType::Pickup, OrderStatus::Cancelled).disabled);
        assert!(StatusSelector::for_order(OrderType::Delivery, OrderStatus::Delivered).disabled);
        assert!(StatusSelector::for_order(OrderType::Pickup, OrderStatus::Completed).disabled);
        assert!(!StatusSelector::for_order(OrderType::Pickup, OrderStatus::Ready).disabled);
    }

    #[test]
    fn test_terminal_statuses_never_change() {
        for current in [OrderStatus::Delivered, OrderStatus::Completed, OrderStatus::Cancelled] {
            for target in OrderStatus::ALL {
                for order_type in [OrderType::Pickup, OrderType::Delivery] {
                    assert_eq!(
                        transition(order_type, current, target),
                        Err(TransitionError::Terminal(current))
                    );
                }
            }
            assert_eq!(cancel(current), Err(TransitionError::NotCancellable(current)));
        }
    }

    #[test]
    fn test_target_must_belong_to_order_type() {
        assert_eq!(
            transition(OrderType::Pickup, OrderStatus::Ready, OrderStatus::Delivered),
            Err(TransitionError::NotAllowed { order_type: OrderType::Pickup, target: OrderStatus::Delivered })
        );
        assert_eq!(
            transition(OrderType::Delivery, OrderStatus::Accepted, OrderStatus::Ready),
            Err(TransitionError::NotAllowed { order_type: OrderType::Delivery, target: OrderStatus::Ready })
        );
        assert_eq!(
            transition(OrderType::Pickup, OrderStatus::Pending, OrderStatus::Cancelled),
            Err(TransitionError::NotAllowed { order_type: OrderType::Pickup, target: OrderStatus::Cancelled })
        );
        assert_eq!(
            transition(OrderType::Pickup, OrderStatus::Ready, OrderStatus::Completed),
            Ok(OrderStatus::Completed)
        );
        assert_eq!(
            transition(OrderType::Delivery, OrderStatus::Shipped, OrderStatus::Delivered),
            Ok(OrderStatus::Delivered)
        );
    }

    #[test]
    fn test_only_pending_orders_cancel() {
        assert_eq!(cancel(OrderStatus::Pending), Ok(OrderStatus::Cancelled));
        assert_eq!(cancel(OrderStatus::Accepted), Err(TransitionError::NotCancellable(OrderStatus::Accepted)));
    }
}
