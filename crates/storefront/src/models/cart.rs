//! Cart domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use woodnook_core::{LineItemId, UserId};

use super::Product;

/// One line of a user's cart: a product reference plus a quantity.
///
/// The remote row holds only the product id; the data service resolves it to
/// a full [`Product`] when lines are fetched. Quantity is always at least 1 -
/// a line that would drop below 1 is removed explicitly, never decremented
/// away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Unique line id, distinct from the product id.
    pub id: LineItemId,
    /// Owning user.
    pub user_id: UserId,
    /// The resolved product.
    pub product: Product,
    /// Units of the product in the cart (>= 1).
    pub quantity: u32,
}

impl CartLine {
    /// The price of this line: `quantity × unit price`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.line_total(self.quantity)
    }
}
