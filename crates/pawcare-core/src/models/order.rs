//! Order models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

coded_enum! {
    /// Payment state of an order. Updated by admins after creation.
    pub enum PaymentStatus {
        Pending = 0,
        PaymentReceived = 1,
        PaymentFailed = 2,
    }
}

/// Delivery option offered at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryMethod {
    pub id: i64,
    pub short_name: String,
    #[serde(default)]
    pub delivery_time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

/// Where an order ships to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub zip_code: Option<String>,
}

/// A line on a placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: i64,
    pub product_name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub picture_url: Option<String>,
}

/// A placed order. Immutable except for admin payment-status updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub buyer_email: Option<String>,
    pub order_date: NaiveDateTime,
    pub shipping_address: ShippingAddress,
    pub delivery_method: String,
    #[serde(default)]
    pub shipping_price: f64,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub total: f64,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// Body for placing an order from a basket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub basket_id: String,
    pub delivery_method_id: i64,
    pub shipping_address: ShippingAddress,
    pub payment_method: Option<String>,
}

/// Body for an admin payment-status update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusUpdate {
    pub payment_status: PaymentStatus,
}
