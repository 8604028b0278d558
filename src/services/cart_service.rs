use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{
    cart::{CartItem, CartSnapshot, LedgerChange},
    part::{Part, PartId, Price},
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CartError {
    #[error("Part {id} ({name}) is not in stock")]
    OutOfStock { id: PartId, name: String },
}

/// Normalizes user-typed quantity text.
///
/// Integers parse as-is, finite decimals truncate toward zero, and anything
/// else becomes 0 so that the caller treats it as a removal.
pub fn parse_quantity(input: &str) -> i64 {
    let trimmed = input.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return value;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

/// The items one session intends to buy, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartLedger {
    items: Vec<CartItem>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit. Unavailable parts are rejected.
    pub fn add(&mut self, part: &Part) -> Result<LedgerChange, CartError> {
        if !part.in_stock {
            warn!("Rejected out-of-stock part {} ({})", part.id, part.article);
            return Err(CartError::OutOfStock {
                id: part.id,
                name: part.name.clone(),
            });
        }

        if let Some(item) = self.item_mut(part.id) {
            if item.quantity == u32::MAX {
                warn!("Part {} already at maximum quantity", part.id);
                return Ok(LedgerChange::Unchanged);
            }
            item.quantity += 1;
            let quantity = item.quantity;
            debug!("Incremented part {} to quantity {}", part.id, quantity);
            return Ok(LedgerChange::Updated { quantity });
        }

        self.items.push(CartItem::new(part.clone()));
        info!("Added part {} ({}) to cart", part.id, part.article);
        Ok(LedgerChange::Added { quantity: 1 })
    }

    /// Absolute set. `quantity <= 0` removes; unknown ids are ignored.
    pub fn set_quantity(&mut self, id: PartId, quantity: i64) -> LedgerChange {
        if quantity <= 0 {
            return self.remove(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or_else(|_| {
            warn!("Quantity {} for part {} clamped to {}", quantity, id, u32::MAX);
            u32::MAX
        });
        match self.item_mut(id) {
            Some(item) if item.quantity == quantity => LedgerChange::Unchanged,
            Some(item) => {
                item.quantity = quantity;
                debug!("Set part {} to quantity {}", id, quantity);
                LedgerChange::Updated { quantity }
            }
            None => {
                debug!("Ignoring quantity change for part {} not in cart", id);
                LedgerChange::Unchanged
            }
        }
    }

    /// Relative change computed from the current quantity, not a cached one.
    pub fn adjust_quantity(&mut self, id: PartId, delta: i64) -> LedgerChange {
        match self.get(id) {
            Some(item) => {
                let target = i64::from(item.quantity).saturating_add(delta);
                self.set_quantity(id, target)
            }
            None => LedgerChange::Unchanged,
        }
    }

    pub fn remove(&mut self, id: PartId) -> LedgerChange {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() < before {
            info!("Removed part {} from cart", id);
            LedgerChange::Removed
        } else {
            LedgerChange::Unchanged
        }
    }

    pub fn clear(&mut self) -> LedgerChange {
        if self.items.is_empty() {
            return LedgerChange::Unchanged;
        }
        info!("Cleared cart with {} lines", self.items.len());
        self.items.clear();
        LedgerChange::Removed
    }

    pub fn get(&self, id: PartId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn total_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn snapshot(&self) -> CartSnapshot<'_> {
        CartSnapshot {
            items: &self.items,
            total_count: self.total_count(),
            total_price: self.total_price(),
        }
    }

    fn item_mut(&mut self, id: PartId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn part(id: u32, price: u64, in_stock: bool) -> Part {
        Part {
            id: PartId(id),
            name: format!("Part {}", id),
            article: format!("P-{}", id),
            price: Price::from_major(price),
            brand: "Bosch".to_string(),
            category: "Filters".to_string(),
            image: String::new(),
            in_stock,
        }
    }

    #[test]
    fn test_repeated_add_accumulates() {
        let mut cart = CartLedger::new();
        let oil = part(1, 450, true);

        assert_eq!(cart.add(&oil), Ok(LedgerChange::Added { quantity: 1 }));
        assert_eq!(cart.add(&oil), Ok(LedgerChange::Updated { quantity: 2 }));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get(PartId(1)).unwrap().quantity, 2);
        assert_eq!(cart.total_price(), Price::from_major(900));
        assert_eq!(cart.total_count(), 2);
    }

    #[test]
    fn test_out_of_stock_rejected() {
        let mut cart = CartLedger::new();
        let result = cart.add(&part(4, 4200, false));
        assert!(matches!(result, Err(CartError::OutOfStock { id: PartId(4), .. })));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_non_positive_removes() {
        let mut cart = CartLedger::new();
        let oil = part(1, 450, true);
        for _ in 0..3 {
            cart.add(&oil).unwrap();
        }

        assert_eq!(cart.set_quantity(PartId(1), -5), LedgerChange::Removed);
        assert_eq!(cart.total_count(), 0);
        assert!(cart.get(PartId(1)).is_none());
    }

    #[test]
    fn test_set_quantity_is_absolute() {
        let mut cart = CartLedger::new();
        cart.add(&part(1, 450, true)).unwrap();

        assert_eq!(cart.set_quantity(PartId(1), 7), LedgerChange::Updated { quantity: 7 });
        assert_eq!(cart.set_quantity(PartId(1), 7), LedgerChange::Unchanged);
        assert_eq!(cart.total_count(), 7);
    }

    #[test]
    fn test_set_quantity_on_absent_is_noop() {
        let mut cart = CartLedger::new();
        assert_eq!(cart.set_quantity(PartId(9), 3), LedgerChange::Unchanged);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_clamps_huge_values() {
        let mut cart = CartLedger::new();
        cart.add(&part(1, 1, true)).unwrap();
        cart.set_quantity(PartId(1), i64::MAX);
        assert_eq!(cart.get(PartId(1)).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_add_at_maximum_quantity_is_unchanged() {
        let mut cart = CartLedger::new();
        let oil = part(1, 450, true);
        cart.add(&oil).unwrap();
        cart.set_quantity(PartId(1), i64::from(u32::MAX));

        let before = cart.total_price();
        assert_eq!(cart.add(&oil), Ok(LedgerChange::Unchanged));
        assert_eq!(cart.get(PartId(1)).unwrap().quantity, u32::MAX);
        assert_eq!(cart.total_price(), before);
    }

    #[test]
    fn test_clear_reports_whether_anything_was_removed() {
        let mut cart = CartLedger::new();
        assert_eq!(cart.clear(), LedgerChange::Unchanged);

        cart.add(&part(1, 450, true)).unwrap();
        assert_eq!(cart.clear(), LedgerChange::Removed);
        assert!(cart.is_empty());
        assert_eq!(cart.clear(), LedgerChange::Unchanged);
    }

    #[test]
    fn test_fractional_prices_total_exactly() {
        let mut cart = CartLedger::new();
        let mut washer = part(7, 0, true);
        washer.price = Price::new(Decimal::new(10125, 3));
        cart.add(&washer).unwrap();
        cart.set_quantity(PartId(7), 8);
        assert_eq!(cart.total_price(), Price::from_major(81));

        let mut shim = part(8, 0, true);
        shim.price = Price::new(Decimal::new(4, 3));
        cart.add(&shim).unwrap();
        cart.set_quantity(PartId(8), 1000);
        assert_eq!(cart.total_price(), Price::from_major(85));
    }

    #[test]
    fn test_snapshot_carries_totals() {
        let mut cart = CartLedger::new();
        cart.add(&part(1, 450, true)).unwrap();
        cart.add(&part(1, 450, true)).unwrap();

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.total_count, 2);
        assert_eq!(snapshot.total_price, Price::from_major(900));
    }

    #[test]
    fn test_adjust_quantity_applies_sequentially() {
        let mut cart = CartLedger::new();
        cart.add(&part(1, 450, true)).unwrap();

        cart.adjust_quantity(PartId(1), 1);
        cart.adjust_quantity(PartId(1), 1);
        assert_eq!(cart.get(PartId(1)).unwrap().quantity, 3);

        cart.adjust_quantity(PartId(1), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = CartLedger::new();
        cart.add(&part(1, 450, true)).unwrap();
        cart.add(&part(2, 2800, true)).unwrap();

        assert_eq!(cart.remove(PartId(1)), LedgerChange::Removed);
        let once = cart.clone();
        assert_eq!(cart.remove(PartId(1)), LedgerChange::Unchanged);
        assert_eq!(cart, once);
    }

    #[test]
    fn test_total_price_is_linear() {
        let mut cart = CartLedger::new();
        let pads = part(2, 2800, true);
        cart.add(&part(1, 450, true)).unwrap();
        cart.add(&pads).unwrap();

        let before = cart.total_price();
        cart.add(&pads).unwrap();
        assert_eq!(cart.total_price(), before + pads.price);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = CartLedger::new();
        cart.add(&part(3, 1, true)).unwrap();
        cart.add(&part(1, 1, true)).unwrap();
        cart.add(&part(3, 1, true)).unwrap();

        let ids: Vec<u32> = cart.items().iter().map(|item| item.id().0).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_parse_quantity_normalizes_input() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity(" -2 "), -2);
        assert_eq!(parse_quantity("2.9"), 2);
        assert_eq!(parse_quantity("abc"), 0);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("NaN"), 0);
        assert_eq!(parse_quantity("inf"), 0);
    }
}
