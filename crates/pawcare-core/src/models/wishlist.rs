//! Wishlist models.

use serde::{Deserialize, Serialize};

/// A saved product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: i64,
    pub product_name: String,
    pub price: f64,
    #[serde(default)]
    pub picture_url: Option<String>,
}

/// One wishlist per session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    #[serde(default)]
    pub items: Vec<WishlistItem>,
}

impl Wishlist {
    pub fn contains(&self, product_id: i64) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }
}
