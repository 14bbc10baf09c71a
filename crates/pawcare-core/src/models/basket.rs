//! Shopping basket models.
//!
//! The basket is ephemeral: its ID lives in client storage and a new basket
//! is created whenever the stored one cannot be found on the server.

use serde::{Deserialize, Serialize};

/// A line in the basket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    pub product_id: i64,
    pub product_name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Shopping basket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    pub id: String,
    #[serde(default)]
    pub items: Vec<BasketItem>,
    #[serde(default)]
    pub delivery_method_id: Option<i64>,
    #[serde(default)]
    pub shipping_price: f64,
}

impl Basket {
    /// Create an empty basket with a fresh client-generated ID.
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string())
    }

    /// Create an empty basket with the given ID.
    pub fn with_id(id: String) -> Self {
        Self {
            id,
            items: Vec::new(),
            delivery_method_id: None,
            shipping_price: 0.0,
        }
    }

    /// Add an item, merging quantities for a product already present.
    pub fn add_item(&mut self, item: BasketItem) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == item.product_id)
        {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    /// Remove `quantity` units of a product; the line is dropped at zero.
    ///
    /// Returns false when the product is not in the basket.
    pub fn remove_item(&mut self, product_id: i64, quantity: u32) -> bool {
        let Some(index) = self.items.iter().position(|i| i.product_id == product_id) else {
            return false;
        };

        let item = &mut self.items[index];
        if item.quantity > quantity {
            item.quantity -= quantity;
        } else {
            self.items.remove(index);
        }
        true
    }

    /// Set the quantity of a line; zero removes it.
    pub fn set_quantity(&mut self, product_id: i64, quantity: u32) -> bool {
        if quantity == 0 {
            let before = self.items.len();
            self.items.retain(|i| i.product_id != product_id);
            return self.items.len() != before;
        }

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Total number of units, saturating at `u32::MAX`.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, i| total.saturating_add(i.quantity))
    }

    /// Sum of price times quantity.
    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.price * f64::from(i.quantity))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Basket {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: i64, price: f64, quantity: u32) -> BasketItem {
        BasketItem {
            product_id,
            product_name: format!("Product {}", product_id),
            price,
            quantity,
            picture_url: None,
            brand: None,
            category: None,
        }
    }

    #[test]
    fn test_new_basket_has_uuid() {
        let basket = Basket::new();
        assert_eq!(basket.id.len(), 36);
        assert!(basket.is_empty());
    }

    #[test]
    fn test_add_merges_quantity() {
        let mut basket = Basket::new();
        basket.add_item(item(1, 10.0, 1));
        basket.add_item(item(1, 10.0, 2));
        basket.add_item(item(2, 5.5, 1));

        assert_eq!(basket.items.len(), 2);
        assert_eq!(basket.item_count(), 4);
        assert_eq!(basket.subtotal(), 35.5);
    }

    #[test]
    fn test_quantities_saturate() {
        let mut basket = Basket::new();
        basket.add_item(item(1, 1.0, u32::MAX - 1));
        basket.add_item(item(1, 1.0, 5));
        assert_eq!(basket.items[0].quantity, u32::MAX);

        basket.add_item(item(2, 1.0, 10));
        assert_eq!(basket.item_count(), u32::MAX);
    }

    #[test]
    fn test_remove_partial_and_full() {
        let mut basket = Basket::new();
        basket.add_item(item(1, 10.0, 3));

        assert!(basket.remove_item(1, 1));
        assert_eq!(basket.item_count(), 2);

        assert!(basket.remove_item(1, 5));
        assert!(basket.is_empty());

        assert!(!basket.remove_item(1, 1));
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut basket = Basket::new();
        basket.add_item(item(1, 10.0, 3));

        assert!(basket.set_quantity(1, 7));
        assert_eq!(basket.item_count(), 7);

        assert!(basket.set_quantity(1, 0));
        assert!(basket.is_empty());
        assert!(!basket.set_quantity(1, 0));
    }
}
