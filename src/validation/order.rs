use crate::domain::{CartItem, OrderStatus, OrderType, PaymentMethod};
use super::{text, FieldErrors, FormData};

#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdateForm {
    pub order_id: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CancelOrderForm {
    pub order_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutForm {
    pub items: Vec<CartItem>,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
}

fn order_id(errors: &mut FieldErrors, form: &FormData) -> String {
    let value = text(form, "orderId");
    if value.is_empty() {
        errors.add("orderId", "Invalid order id");
    }
    value.to_string()
}

impl StatusUpdateForm {
    pub fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let order_id = order_id(&mut errors, form);
        match text(form, "status").parse::<OrderStatus>() {
            Ok(status) => errors.into_result(|| Self { order_id, status }),
            Err(()) => {
                errors.add("status", "Invalid status");
                Err(errors)
            }
        }
    }
}

impl CancelOrderForm {
    pub fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let order_id = order_id(&mut errors, form);
        errors.into_result(|| Self { order_id })
    }
}

/// Parses `productId:quantity` pairs separated by commas.
fn cart_items(raw: &str) -> Result<Vec<CartItem>, &'static str> {
    let mut items = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (product_id, quantity) = entry.split_once(':').ok_or("Invalid cart item")?;
        let quantity: u32 = quantity.trim().parse().map_err(|_| "Invalid cart item")?;
        if product_id.trim().is_empty() || quantity == 0 {
            return Err("Invalid cart item");
        }
        items.push(CartItem { product_id: product_id.trim().to_string(), quantity });
    }
    if items.is_empty() {
        return Err("Cart is empty");
    }
    Ok(items)
}

impl CheckoutForm {
    pub fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let items = cart_items(text(form, "items")).unwrap_or_else(|message| {
            errors.add("items", message);
            Vec::new()
        });
        let order_type = text(form, "orderType").parse::<OrderType>().unwrap_or_else(|()| {
            errors.add("orderType", "Invalid order type");
            OrderType::Pickup
        });
        let payment_method = text(form, "paymentMethod").parse::<PaymentMethod>().unwrap_or_else(|()| {
            errors.add("paymentMethod", "Invalid payment method");
            PaymentMethod::Cash
        });
        errors.into_result(|| Self { items, order_type, payment_method })
    }
}
