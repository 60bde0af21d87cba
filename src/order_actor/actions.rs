/// Custom actions for Order entities. Both return the updated order.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Admin status change, checked against the lifecycle table.
    UpdateStatus(crate::domain::OrderStatus),
    /// Customer cancellation. Only the order's owner may cancel it.
    Cancel { user_id: String },
}
