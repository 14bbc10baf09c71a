use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Basket, DeliveryMethod, Order, PaymentStatus, Product};

/// Product listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    NameAsc,
    PriceAsc,
    PriceDesc,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive search over name and description
    pub query: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: ProductSort,
}

pub fn filter_products(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    let query = filter
        .query
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let mut result: Vec<Product> = products
        .iter()
        .filter(|p| {
            query.as_deref().map_or(true, |q| {
                p.name.to_lowercase().contains(q) || p.description.to_lowercase().contains(q)
            })
        })
        .filter(|p| same_label(filter.category.as_deref(), p.category.as_deref()))
        .filter(|p| same_label(filter.brand.as_deref(), p.brand.as_deref()))
        .filter(|p| filter.min_price.map_or(true, |min| p.price >= min))
        .filter(|p| filter.max_price.map_or(true, |max| p.price <= max))
        .cloned()
        .collect();

    match filter.sort {
        ProductSort::NameAsc => {
            result.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        ProductSort::PriceAsc => result.sort_by(|a, b| cmp_price(a.price, b.price)),
        ProductSort::PriceDesc => result.sort_by(|a, b| cmp_price(b.price, a.price)),
    }
    result
}

fn same_label(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted.map(str::trim).filter(|w| !w.is_empty()) {
        None => true,
        Some(wanted) => actual.is_some_and(|a| a.eq_ignore_ascii_case(wanted)),
    }
}

fn cmp_price(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Checkout summary of a basket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BasketTotals {
    pub item_count: u32,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
}

/// Totals for a basket, priced with the basket's chosen delivery method.
///
/// Falls back to the basket's own shipping price when the method is unknown.
pub fn basket_totals(basket: &Basket, delivery_methods: &[DeliveryMethod]) -> BasketTotals {
    let subtotal = basket.subtotal();
    let shipping = basket
        .delivery_method_id
        .and_then(|id| delivery_methods.iter().find(|m| m.id == id))
        .map_or(basket.shipping_price, |m| m.price);

    BasketTotals {
        item_count: basket.item_count(),
        subtotal,
        shipping,
        total: subtotal + shipping,
    }
}

/// Sum of order totals per payment status. Every status is present.
pub fn revenue_by_payment_status(orders: &[Order]) -> BTreeMap<PaymentStatus, f64> {
    let mut revenue: BTreeMap<PaymentStatus, f64> =
        PaymentStatus::ALL.iter().map(|s| (*s, 0.0)).collect();
    for order in orders {
        *revenue.entry(order.payment_status).or_insert(0.0) += order.total;
    }
    revenue
}
