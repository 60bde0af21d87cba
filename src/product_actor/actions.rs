/// Custom actions for Product entities. Each returns the stock left afterwards.
///
/// Stock moves happen inside the product store so the availability check and
/// the decrement cannot interleave with another checkout.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Takes stock for an order.
    ///
    /// # Errors
    /// Fails if the requested amount exceeds available stock.
    ReserveStock(u32),
    /// Puts stock back, e.g. after a cancelled order or an aborted checkout.
    ReleaseStock(u32),
}
