use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How the customer receives the order. Decides which statuses apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Pickup,
    Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Processing,
    Ready,
    OrderAssigned,
    Shipped,
    OutForDelivery,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 10] = [
        Self::Pending,
        Self::Accepted,
        Self::Processing,
        Self::Ready,
        Self::OrderAssigned,
        Self::Shipped,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Processing => "PROCESSING",
            Self::Ready => "READY",
            Self::OrderAssigned => "ORDER_ASSIGNED",
            Self::Shipped => "SHIPPED",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Once reached, the status never changes again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Completed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        Self::ALL.into_iter().find(|status| status.as_str() == s.trim()).ok_or(())
    }
}

impl FromStr for OrderType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s.trim() {
            "PICKUP" => Ok(Self::Pickup),
            "DELIVERY" => Ok(Self::Delivery),
            _ => Err(()),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s.trim() {
            "CASH" => Ok(Self::Cash),
            "CARD" => Ok(Self::Card),
            _ => Err(()),
        }
    }
}

/// One ordered product, priced at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl OrderLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub lines: Vec<OrderLine>,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new order. Lines are already priced.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: String,
    pub lines: Vec<OrderLine>,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
}

/// A cart entry as submitted at checkout, before pricing.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
}
