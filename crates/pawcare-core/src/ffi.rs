//! FFI-safe records.
//!
//! Dates cross the boundary as ISO-8601 strings and enums as variant names.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{
    Address, Appointment, Basket, BasketItem, Clinic, DeliveryMethod, Doctor, Gender,
    MedicalRecord, NewAppointment, NewClinic, NewPet, Order, Pet, PetType, Product, Rating,
    Session, ShippingAddress, WishlistItem,
};
use crate::notify::Notification;
use crate::selectors::{BasketTotals, RatingSummary};
use crate::PawcareError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn format_datetime(value: NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

pub(crate) fn parse_datetime(value: &str) -> Result<NaiveDateTime, PawcareError> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|e| PawcareError::InvalidInput(format!("bad date-time '{}': {}", value, e)))
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, PawcareError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| PawcareError::InvalidInput(format!("bad date '{}': {}", value, e)))
}

/// Parse an enum variant name coming from the UI.
pub(crate) fn parse_name<T>(
    value: &str,
    parse: fn(&str) -> Option<T>,
    what: &str,
) -> Result<T, PawcareError> {
    parse(value).ok_or_else(|| PawcareError::InvalidInput(format!("unknown {}: {}", what, value)))
}

/// FFI-safe session.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSession {
    pub role: String,
    pub role_code: u8,
    pub user_id: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl From<Session> for FfiSession {
    fn from(session: Session) -> Self {
        Self {
            role: session.role.to_string(),
            role_code: session.role.code(),
            user_id: session.user_id,
            display_name: session.display_name,
            email: session.email,
        }
    }
}

/// FFI-safe clinic.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinic {
    pub id: i64,
    pub name: String,
    pub address_name: String,
    pub street: String,
    pub city: String,
    pub country: String,
    pub rating: f64,
    pub status: String,
    pub owner_id: Option<String>,
    pub picture_url: Option<String>,
    pub phone_number: Option<String>,
}

impl From<Clinic> for FfiClinic {
    fn from(clinic: Clinic) -> Self {
        Self {
            id: clinic.id,
            name: clinic.name,
            address_name: clinic.address.name,
            street: clinic.address.street,
            city: clinic.address.city,
            country: clinic.address.country,
            rating: clinic.rating,
            status: clinic.status.to_string(),
            owner_id: clinic.owner_id,
            picture_url: clinic.picture_url,
            phone_number: clinic.phone_number,
        }
    }
}

/// FFI-safe clinic registration.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewClinic {
    pub name: String,
    pub address_name: String,
    pub street: String,
    pub city: String,
    pub country: String,
    pub picture_url: Option<String>,
    pub phone_number: Option<String>,
}

impl From<FfiNewClinic> for NewClinic {
    fn from(clinic: FfiNewClinic) -> Self {
        NewClinic {
            name: clinic.name,
            address: Address {
                name: clinic.address_name,
                street: clinic.street,
                city: clinic.city,
                country: clinic.country,
            },
            picture_url: clinic.picture_url,
            phone_number: clinic.phone_number,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctor {
    pub id: i64,
    pub specialty: String,
    pub clinic_id: Option<i64>,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl From<Doctor> for FfiDoctor {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            specialty: doctor.specialty,
            clinic_id: doctor.clinic_id,
            display_name: doctor.display_name,
            email: doctor.email,
        }
    }
}

/// FFI-safe pet.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPet {
    pub id: i64,
    pub name: String,
    pub pet_type: String,
    pub gender: String,
    pub birth_date: String,
    pub color: Option<String>,
    pub avatar: Option<String>,
}

impl From<Pet> for FfiPet {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            name: pet.name,
            pet_type: pet.pet_type.to_string(),
            gender: pet.gender.to_string(),
            birth_date: pet.birth_date.format(DATE_FORMAT).to_string(),
            color: pet.color,
            avatar: pet.avatar,
        }
    }
}

/// FFI-safe pet form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPet {
    pub name: String,
    pub pet_type: String,
    pub gender: String,
    pub birth_date: String,
    pub color: Option<String>,
    pub avatar: Option<String>,
}

impl TryFrom<FfiNewPet> for NewPet {
    type Error = PawcareError;

    fn try_from(pet: FfiNewPet) -> Result<Self, Self::Error> {
        Ok(NewPet {
            name: pet.name,
            pet_type: parse_name(&pet.pet_type, PetType::parse, "pet type")?,
            gender: parse_name(&pet.gender, Gender::parse, "gender")?,
            birth_date: parse_date(&pet.birth_date)?,
            color: pet.color,
            avatar: pet.avatar,
        })
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: i64,
    pub pet_id: i64,
    pub clinic_id: i64,
    pub doctor_id: Option<i64>,
    pub appointment_date: String,
    pub status: String,
    pub notes: Option<String>,
    pub pet_name: Option<String>,
    pub clinic_name: Option<String>,
}

impl From<Appointment> for FfiAppointment {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            pet_id: appointment.pet_id,
            clinic_id: appointment.clinic_id,
            doctor_id: appointment.doctor_id,
            appointment_date: format_datetime(appointment.appointment_date),
            status: appointment.status.to_string(),
            notes: appointment.notes,
            pet_name: appointment.pet_name,
            clinic_name: appointment.clinic_name,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewAppointment {
    pub pet_id: i64,
    pub clinic_id: i64,
    pub doctor_id: Option<i64>,
    pub appointment_date: String,
    pub notes: Option<String>,
}

impl TryFrom<FfiNewAppointment> for NewAppointment {
    type Error = PawcareError;

    fn try_from(appointment: FfiNewAppointment) -> Result<Self, Self::Error> {
        Ok(NewAppointment {
            pet_id: appointment.pet_id,
            clinic_id: appointment.clinic_id,
            doctor_id: appointment.doctor_id,
            appointment_date: parse_datetime(&appointment.appointment_date)?,
            notes: appointment.notes,
        })
    }
}

/// Appointment counters for the dashboard.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentStats {
    pub today: u32,
    pub this_week: u32,
    pub upcoming: Vec<FfiAppointment>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicalRecord {
    pub id: i64,
    pub appointment_id: i64,
    pub diagnosis: String,
    pub treatment: String,
    pub notes: Option<String>,
    pub record_date: String,
    pub doctor_name: Option<String>,
}

impl From<MedicalRecord> for FfiMedicalRecord {
    fn from(record: MedicalRecord) -> Self {
        Self {
            id: record.id,
            appointment_id: record.appointment_id,
            diagnosis: record.diagnosis,
            treatment: record.treatment,
            notes: record.notes,
            record_date: format_datetime(record.record_date),
            doctor_name: record.doctor_name,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRating {
    pub id: i64,
    pub clinic_id: i64,
    pub user_id: String,
    pub rating_value: u8,
    pub comment: Option<String>,
    pub created_at: String,
    pub user_name: Option<String>,
}

impl From<Rating> for FfiRating {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id,
            clinic_id: rating.clinic_id,
            user_id: rating.user_id,
            rating_value: rating.rating_value,
            comment: rating.comment,
            created_at: format_datetime(rating.created_at),
            user_name: rating.user_name,
        }
    }
}

/// FFI-safe rating histogram.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRatingSummary {
    /// Counts for 5 stars down to 1
    pub counts: Vec<u32>,
    /// Percentages for 5 stars down to 1
    pub percents: Vec<f64>,
    pub average: f64,
    pub total: u32,
}

impl From<RatingSummary> for FfiRatingSummary {
    fn from(summary: RatingSummary) -> Self {
        Self {
            counts: summary.buckets.iter().map(|b| b.count as u32).collect(),
            percents: summary.buckets.iter().map(|b| b.percent).collect(),
            average: summary.average,
            total: summary.total as u32,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProduct {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub picture_url: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub in_stock: bool,
}

impl From<Product> for FfiProduct {
    fn from(product: Product) -> Self {
        Self {
            in_stock: product.in_stock(),
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            picture_url: product.picture_url,
            category: product.category,
            brand: product.brand,
        }
    }
}

impl From<&Product> for BasketItem {
    fn from(product: &Product) -> Self {
        BasketItem {
            product_id: product.id,
            product_name: product.name.clone(),
            price: product.price,
            quantity: 1,
            picture_url: product.picture_url.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBasketItem {
    pub product_id: i64,
    pub product_name: String,
    pub price: f64,
    pub quantity: u32,
    pub picture_url: Option<String>,
}

/// FFI-safe basket with its totals.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBasket {
    pub id: String,
    pub items: Vec<FfiBasketItem>,
    pub item_count: u32,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
}

impl FfiBasket {
    pub(crate) fn new(basket: Basket, totals: BasketTotals) -> Self {
        Self {
            id: basket.id,
            items: basket
                .items
                .into_iter()
                .map(|item| FfiBasketItem {
                    product_id: item.product_id,
                    product_name: item.product_name,
                    price: item.price,
                    quantity: item.quantity,
                    picture_url: item.picture_url,
                })
                .collect(),
            item_count: totals.item_count,
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            total: totals.total,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiWishlistItem {
    pub product_id: i64,
    pub product_name: String,
    pub price: f64,
    pub picture_url: Option<String>,
}

impl From<WishlistItem> for FfiWishlistItem {
    fn from(item: WishlistItem) -> Self {
        Self {
            product_id: item.product_id,
            product_name: item.product_name,
            price: item.price,
            picture_url: item.picture_url,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDeliveryMethod {
    pub id: i64,
    pub short_name: String,
    pub delivery_time: Option<String>,
    pub description: Option<String>,
    pub price: f64,
}

impl From<DeliveryMethod> for FfiDeliveryMethod {
    fn from(method: DeliveryMethod) -> Self {
        Self {
            id: method.id,
            short_name: method.short_name,
            delivery_time: method.delivery_time,
            description: method.description,
            price: method.price,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub country: String,
    pub zip_code: Option<String>,
}

impl From<FfiShippingAddress> for ShippingAddress {
    fn from(address: FfiShippingAddress) -> Self {
        ShippingAddress {
            first_name: address.first_name,
            last_name: address.last_name,
            street: address.street,
            city: address.city,
            country: address.country,
            zip_code: address.zip_code,
        }
    }
}

/// FFI-safe order summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiOrder {
    pub id: i64,
    pub buyer_email: Option<String>,
    pub order_date: String,
    pub delivery_method: String,
    pub item_count: u32,
    pub subtotal: f64,
    pub total: f64,
    pub payment_status: String,
    pub payment_method: Option<String>,
}

impl From<Order> for FfiOrder {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            buyer_email: order.buyer_email,
            order_date: format_datetime(order.order_date),
            delivery_method: order.delivery_method,
            item_count: order
                .items
                .iter()
                .fold(0u32, |total, i| total.saturating_add(i.quantity)),
            subtotal: order.subtotal,
            total: order.total,
            payment_status: order.payment_status.to_string(),
            payment_method: order.payment_method,
        }
    }
}

/// FFI-safe notification. `kind` is one of loading, dismiss, success, error.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNotification {
    pub kind: String,
    pub toast_id: Option<u64>,
    pub message: Option<String>,
    pub forbidden: bool,
}

impl From<Notification> for FfiNotification {
    fn from(notification: Notification) -> Self {
        let (kind, toast_id, message, forbidden) = match notification {
            Notification::Loading { id, message } => ("loading", Some(id.0), Some(message), false),
            Notification::Dismiss { id } => ("dismiss", Some(id.0), None, false),
            Notification::Success { message } => ("success", None, Some(message), false),
            Notification::Error { message, forbidden } => ("error", None, Some(message), forbidden),
        };
        Self {
            kind: kind.to_string(),
            toast_id,
            message,
            forbidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_formats() {
        assert!(parse_datetime("2024-05-01T10:30:00").is_ok());
        assert!(parse_datetime("2024-05-01T10:30:00.123").is_ok());
        assert!(matches!(parse_datetime("tomorrow"), Err(PawcareError::InvalidInput(_))));
    }

    #[test]
    fn test_new_pet_parses_names() {
        let pet = NewPet::try_from(FfiNewPet {
            name: "Rex".into(),
            pet_type: "dog".into(),
            gender: "Male".into(),
            birth_date: "2020-02-29".into(),
            color: None,
            avatar: None,
        })
        .unwrap();
        assert_eq!(pet.pet_type, PetType::Dog);

        let bad = NewPet::try_from(FfiNewPet {
            name: "Rex".into(),
            pet_type: "Parrot".into(),
            gender: "Male".into(),
            birth_date: "2020-02-29".into(),
            color: None,
            avatar: None,
        });
        assert!(bad.is_err());
    }

    #[test]
    fn test_notification_kinds() {
        let n: FfiNotification = Notification::Error {
            message: "nope".into(),
            forbidden: true,
        }
        .into();
        assert_eq!(n.kind, "error");
        assert!(n.forbidden);
    }
}
