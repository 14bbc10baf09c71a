//! PawCare Client Core
//!
//! State synchronization layer of the pet-care marketplace client: pet
//! owners manage pets, book appointments, shop and review clinics; doctors
//! run clinics, schedules and medical records; admins moderate clinics and
//! orders. The backend owns every entity; this crate keeps cached copies in
//! sync with it.
//!
//! # Architecture
//!
//! ```text
//!   UI ── action ──► Dispatcher ──► ApiClient ──► REST backend
//!                       │ pending / fulfilled / rejected
//!                       ▼
//!                 Store (one Slice per domain) ──► selectors ──► UI
//!                       │
//!                 Notifier (toasts, lifecycle events)
//! ```
//!
//! Writes never splice lists locally; each successful write is followed by a
//! refetch of the affected list.
//!
//! # Modules
//!
//! - [`dispatch`]: async action lifecycle
//! - [`store`]: state slices and reducers
//! - [`actions`]: per-domain actions on [`PawcareClient`]
//! - [`workflow`]: status machines and role gating
//! - [`selectors`]: pure derived views
//! - [`db`]: SQLite storage for the session and basket ID
//! - [`models`]: domain types

pub mod actions;
pub mod client;
pub mod config;
pub mod db;
pub mod dispatch;
pub mod error;
pub mod ffi;
pub mod logging;
pub mod models;
pub mod notify;
pub mod selectors;
pub mod session;
pub mod storage;
pub mod store;
pub mod workflow;

// Re-export commonly used types
pub use client::PawcareClient;
pub use config::CoreConfig;
pub use db::Database;
pub use dispatch::{Dispatcher, Effect, Operation, Outcome};
pub use error::{ClientError, ClientResult};
pub use notify::{Notification, Notifier, QueueNotifier, TracingNotifier};
pub use storage::LocalStorage;
pub use store::{Slice, Store};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

use chrono::Local;

use ffi::{
    parse_name, FfiAppointment, FfiAppointmentStats, FfiBasket, FfiClinic, FfiDeliveryMethod,
    FfiDoctor, FfiMedicalRecord, FfiNewAppointment, FfiNewClinic, FfiNewPet, FfiNotification,
    FfiOrder, FfiPet, FfiProduct, FfiRating, FfiRatingSummary, FfiSession, FfiShippingAddress,
    FfiWishlistItem,
};
use models::{
    AppointmentStatus, BasketItem, ClinicStatus, DoctorRegistration, NewMedicalRecord, NewRating,
    PaymentStatus, RegisterRequest,
};
use selectors::{ClinicFilter, ClinicSort, ProductFilter, ProductSort};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PawcareError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Not allowed: {0}")]
    Refused(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ClientError> for PawcareError {
    fn from(e: ClientError) -> Self {
        use pawcare_api::ErrorKind;

        let message = e.user_message();
        match &e {
            ClientError::Api(api) => match api.kind() {
                ErrorKind::Network => PawcareError::NetworkError(message),
                ErrorKind::Forbidden => PawcareError::Forbidden(message),
                ErrorKind::NotFound => PawcareError::NotFound(message),
                _ => PawcareError::ServerError(message),
            },
            ClientError::Workflow(_) => PawcareError::Refused(message),
            ClientError::Db(_) | ClientError::LockPoisoned => PawcareError::StorageError(message),
            ClientError::Token(_) => PawcareError::ServerError(message),
        }
    }
}

impl From<db::DbError> for PawcareError {
    fn from(e: db::DbError) -> Self {
        PawcareError::StorageError(e.to_string())
    }
}

impl From<serde_json::Error> for PawcareError {
    fn from(e: serde_json::Error) -> Self {
        PawcareError::InvalidInput(e.to_string())
    }
}

fn settle<P>(outcome: Outcome<P>) -> Result<P, PawcareError> {
    outcome.into_result().map_err(PawcareError::from)
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create a client. Unset fields fall back to the environment, then defaults.
#[uniffi::export]
pub fn open_core(
    base_url: Option<String>,
    database_path: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<Arc<PawcareCore>, PawcareError> {
    let mut config = CoreConfig::from_env();
    if let Some(url) = base_url {
        config.api.base_url = url;
    }
    if database_path.is_some() {
        config.database_path = database_path;
    }
    if let Some(secs) = timeout_secs.filter(|s| *s > 0) {
        config.api.timeout = Some(std::time::Duration::from_secs(secs));
    }
    PawcareCore::with_config(config)
}

/// Create a client with an in-memory database (for testing).
#[uniffi::export]
pub fn open_core_in_memory(base_url: String) -> Result<Arc<PawcareCore>, PawcareError> {
    let mut config = CoreConfig::default();
    config.api.base_url = base_url;
    PawcareCore::with_config(config)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Client handle for the UI layer.
#[derive(uniffi::Object)]
pub struct PawcareCore {
    client: PawcareClient,
    notifications: Arc<QueueNotifier>,
}

impl PawcareCore {
    fn with_config(config: CoreConfig) -> Result<Arc<Self>, PawcareError> {
        logging::init(&config.log_filter);
        let notifications = Arc::new(QueueNotifier::new());
        let client = PawcareClient::open(&config, notifications.clone())?;
        client.restore_session()?;
        Ok(Arc::new(Self {
            client,
            notifications,
        }))
    }

    /// The wrapped client.
    pub fn client(&self) -> &PawcareClient {
        &self.client
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl PawcareCore {
    // =========================================================================
    // Session
    // =========================================================================

    pub fn session(&self) -> Result<Option<FfiSession>, PawcareError> {
        Ok(self.client.session()?.map(Into::into))
    }

    pub async fn login(&self, email: String, password: String) -> Result<FfiSession, PawcareError> {
        settle(self.client.login(&email, &password).await).map(Into::into)
    }

    pub async fn register_pet_owner(
        &self,
        display_name: String,
        email: String,
        password: String,
        phone_number: Option<String>,
    ) -> Result<FfiSession, PawcareError> {
        let request = RegisterRequest {
            display_name,
            email,
            password,
            phone_number,
        };
        settle(self.client.register_pet_owner(request).await).map(Into::into)
    }

    pub fn logout(&self) -> Result<(), PawcareError> {
        Ok(self.client.logout()?)
    }

    /// Take pending toasts for rendering.
    pub fn drain_notifications(&self) -> Vec<FfiNotification> {
        self.notifications
            .drain()
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Whole store as JSON.
    pub fn store_json(&self) -> Result<String, PawcareError> {
        Ok(serde_json::to_string(&self.client.snapshot()?)?)
    }

    // =========================================================================
    // Clinics
    // =========================================================================

    pub async fn fetch_clinics(&self) -> Result<Vec<FfiClinic>, PawcareError> {
        settle(self.client.fetch_clinics().await).map(|list| list.into_iter().map(Into::into).collect())
    }

    pub async fn fetch_clinic(&self, id: i64) -> Result<FfiClinic, PawcareError> {
        settle(self.client.fetch_clinic(id).await).map(Into::into)
    }

    pub async fn create_clinic(&self, clinic: FfiNewClinic) -> Result<FfiClinic, PawcareError> {
        settle(self.client.create_clinic(clinic.into()).await).map(Into::into)
    }

    pub async fn update_clinic(&self, id: i64, clinic: FfiNewClinic) -> Result<(), PawcareError> {
        settle(self.client.update_clinic(id, clinic.into()).await)
    }

    pub async fn set_clinic_status(&self, id: i64, status: String) -> Result<(), PawcareError> {
        let status = parse_name(&status, ClinicStatus::parse, "clinic status")?;
        settle(self.client.set_clinic_status(id, status).await)
    }

    pub async fn delete_clinic(&self, id: i64) -> Result<(), PawcareError> {
        settle(self.client.delete_clinic(id).await)
    }

    /// Loaded clinics filtered for the signed-in viewer.
    pub fn filtered_clinics(
        &self,
        query: Option<String>,
        city: Option<String>,
        premium_only: bool,
        sort: Option<String>,
    ) -> Result<Vec<FfiClinic>, PawcareError> {
        let sort = match sort.as_deref() {
            None | Some("rating") => ClinicSort::RatingDesc,
            Some("name") => ClinicSort::NameAsc,
            Some("newest") => ClinicSort::Newest,
            Some(other) => return Err(PawcareError::InvalidInput(format!("unknown sort: {}", other))),
        };
        let filter = ClinicFilter {
            query,
            city,
            premium_only,
            status: None,
            sort,
        };
        let clinics = self.client.select(|s| {
            let viewer = s.current_session().map(|session| session.role);
            selectors::filter_clinics(&s.clinics.data, &filter, viewer)
        })?;
        Ok(clinics.into_iter().map(Into::into).collect())
    }

    /// Moderation statuses the signed-in user may move a clinic to.
    pub fn clinic_transitions(&self, id: i64) -> Result<Vec<String>, PawcareError> {
        let options = self.client.select(|s| {
            match (s.current_session(), s.find_clinic(id)) {
                (Some(session), Some(clinic)) => workflow::clinic_transitions(clinic.status, session.role),
                _ => Vec::new(),
            }
        })?;
        Ok(options.into_iter().map(|s| s.to_string()).collect())
    }

    pub fn can_delete_clinic(&self, id: i64) -> Result<bool, PawcareError> {
        Ok(self.client.select(|s| {
            s.current_session()
                .is_some_and(|session| workflow::can_delete_clinic(session, s.find_clinic(id)))
        })?)
    }

    // =========================================================================
    // Doctors
    // =========================================================================

    pub async fn fetch_doctors(&self, clinic_id: Option<i64>) -> Result<Vec<FfiDoctor>, PawcareError> {
        settle(self.client.fetch_doctors(clinic_id).await).map(|list| list.into_iter().map(Into::into).collect())
    }

    pub async fn fetch_doctor_profile(&self) -> Result<Option<FfiDoctor>, PawcareError> {
        settle(self.client.fetch_doctor_profile().await).map(|doctor| doctor.map(Into::into))
    }

    pub async fn register_doctor(
        &self,
        specialty: String,
        clinic_id: Option<i64>,
    ) -> Result<FfiDoctor, PawcareError> {
        let registration = DoctorRegistration {
            specialty,
            clinic_id,
        };
        settle(self.client.register_doctor(registration).await).map(Into::into)
    }

    pub async fn add_doctor_to_clinic(
        &self,
        clinic_id: i64,
        doctor_email: String,
        specialty: String,
    ) -> Result<(), PawcareError> {
        let doctor = models::ClinicDoctor {
            doctor_email,
            specialty,
        };
        settle(self.client.add_doctor_to_clinic(clinic_id, doctor).await)
    }

    // =========================================================================
    // Pets
    // =========================================================================

    pub async fn fetch_pets(&self) -> Result<Vec<FfiPet>, PawcareError> {
        settle(self.client.fetch_pets().await).map(|list| list.into_iter().map(Into::into).collect())
    }

    pub async fn create_pet(&self, pet: FfiNewPet) -> Result<FfiPet, PawcareError> {
        let pet = pet.try_into()?;
        settle(self.client.create_pet(pet).await).map(Into::into)
    }

    pub async fn update_pet(&self, id: i64, pet: FfiNewPet) -> Result<(), PawcareError> {
        let pet = pet.try_into()?;
        settle(self.client.update_pet(id, pet).await)
    }

    pub async fn delete_pet(&self, id: i64) -> Result<(), PawcareError> {
        settle(self.client.delete_pet(id).await)
    }

    // =========================================================================
    // Appointments
    // =========================================================================

    pub async fn fetch_appointments(&self) -> Result<Vec<FfiAppointment>, PawcareError> {
        settle(self.client.fetch_appointments().await).map(|list| list.into_iter().map(Into::into).collect())
    }

    pub async fn book_appointment(
        &self,
        appointment: FfiNewAppointment,
    ) -> Result<FfiAppointment, PawcareError> {
        let appointment = appointment.try_into()?;
        settle(self.client.book_appointment(appointment).await).map(Into::into)
    }

    pub async fn set_appointment_status(&self, id: i64, status: String) -> Result<(), PawcareError> {
        let status = parse_name(&status, AppointmentStatus::parse, "appointment status")?;
        settle(self.client.set_appointment_status(id, status).await)
    }

    /// Status changes the signed-in user may apply to an appointment.
    pub fn appointment_transitions(&self, id: i64) -> Result<Vec<String>, PawcareError> {
        let options = self.client.select(|s| {
            match (s.current_session(), s.find_appointment(id)) {
                (Some(session), Some(appointment)) => {
                    workflow::appointment_transitions(appointment.status, session.role)
                }
                _ => Vec::new(),
            }
        })?;
        Ok(options.into_iter().map(|s| s.to_string()).collect())
    }

    /// Today / this-week counters and the upcoming list, as of local time.
    pub fn appointment_stats(&self) -> Result<FfiAppointmentStats, PawcareError> {
        let now = Local::now().naive_local();
        Ok(self.client.select(|s| {
            let list = &s.appointments.data;
            FfiAppointmentStats {
                today: selectors::count_today(list, now) as u32,
                this_week: selectors::count_this_week(list, now) as u32,
                upcoming: selectors::upcoming(list, now)
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            }
        })?)
    }

    // =========================================================================
    // Medical records
    // =========================================================================

    pub async fn fetch_medical_record(
        &self,
        appointment_id: i64,
    ) -> Result<Option<FfiMedicalRecord>, PawcareError> {
        settle(self.client.fetch_medical_record(appointment_id).await).map(|r| r.map(Into::into))
    }

    pub async fn fetch_pet_medical_records(
        &self,
        pet_id: i64,
    ) -> Result<Vec<FfiMedicalRecord>, PawcareError> {
        settle(self.client.fetch_pet_medical_records(pet_id).await)
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    pub async fn create_medical_record(
        &self,
        appointment_id: i64,
        diagnosis: String,
        treatment: String,
        notes: Option<String>,
    ) -> Result<FfiMedicalRecord, PawcareError> {
        let record = NewMedicalRecord {
            appointment_id,
            diagnosis,
            treatment,
            notes,
        };
        settle(self.client.create_medical_record(record).await).map(Into::into)
    }

    /// Whether the record form should be offered for an appointment.
    pub fn can_create_medical_record(&self, appointment_id: i64) -> Result<bool, PawcareError> {
        Ok(self.client.select(|s| {
            s.find_appointment(appointment_id).is_some_and(|appointment| {
                workflow::can_create_medical_record(appointment, &s.known_medical_records())
            })
        })?)
    }

    // =========================================================================
    // Ratings
    // =========================================================================

    pub async fn fetch_clinic_ratings(&self, clinic_id: i64) -> Result<Vec<FfiRating>, PawcareError> {
        settle(self.client.fetch_clinic_ratings(clinic_id).await)
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    pub async fn check_rated(&self, clinic_id: i64) -> Result<bool, PawcareError> {
        settle(self.client.check_rated(clinic_id).await)
    }

    pub async fn create_rating(
        &self,
        clinic_id: i64,
        rating_value: u8,
        comment: Option<String>,
    ) -> Result<FfiRating, PawcareError> {
        let rating = NewRating {
            clinic_id,
            rating_value,
            comment,
        };
        settle(self.client.create_rating(rating).await).map(Into::into)
    }

    pub async fn delete_rating(&self, id: i64) -> Result<(), PawcareError> {
        settle(self.client.delete_rating(id).await)
    }

    /// Histogram of the loaded ratings.
    pub fn rating_summary(&self) -> Result<FfiRatingSummary, PawcareError> {
        Ok(self
            .client
            .select(|s| selectors::rating_summary(&s.ratings.data))?
            .into())
    }

    // =========================================================================
    // Shop
    // =========================================================================

    pub async fn fetch_products(&self) -> Result<Vec<FfiProduct>, PawcareError> {
        settle(self.client.fetch_products().await).map(|list| list.into_iter().map(Into::into).collect())
    }

    pub async fn fetch_product(&self, id: i64) -> Result<FfiProduct, PawcareError> {
        settle(self.client.fetch_product(id).await).map(Into::into)
    }

    /// Loaded products filtered and sorted.
    pub fn filtered_products(
        &self,
        query: Option<String>,
        category: Option<String>,
        brand: Option<String>,
        min_price: Option<f64>,
        max_price: Option<f64>,
        sort: Option<String>,
    ) -> Result<Vec<FfiProduct>, PawcareError> {
        let sort = match sort.as_deref() {
            None | Some("name") => ProductSort::NameAsc,
            Some("price_asc") => ProductSort::PriceAsc,
            Some("price_desc") => ProductSort::PriceDesc,
            Some(other) => return Err(PawcareError::InvalidInput(format!("unknown sort: {}", other))),
        };
        let filter = ProductFilter {
            query,
            category,
            brand,
            min_price,
            max_price,
            sort,
        };
        let products = self
            .client
            .select(|s| selectors::filter_products(&s.products.data, &filter))?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    pub async fn load_basket(&self) -> Result<FfiBasket, PawcareError> {
        settle(self.client.load_basket().await)?;
        self.basket()?
            .ok_or_else(|| PawcareError::NotFound("basket".to_string()))
    }

    /// Add a loaded product to the basket.
    pub async fn add_to_basket(&self, product_id: i64, quantity: u32) -> Result<FfiBasket, PawcareError> {
        let product = self.client.select(|s| {
            s.products
                .data
                .iter()
                .chain(s.product.data.iter())
                .find(|p| p.id == product_id)
                .cloned()
        })?;
        let product = product.ok_or_else(|| PawcareError::NotFound(format!("product {}", product_id)))?;
        let item = BasketItem {
            quantity: quantity.max(1),
            ..BasketItem::from(&product)
        };
        settle(self.client.add_to_basket(item).await)?;
        self.basket()?
            .ok_or_else(|| PawcareError::NotFound("basket".to_string()))
    }

    pub async fn remove_from_basket(
        &self,
        product_id: i64,
        quantity: u32,
    ) -> Result<Option<FfiBasket>, PawcareError> {
        settle(self.client.remove_from_basket(product_id, quantity).await)?;
        self.basket()
    }

    pub async fn set_basket_quantity(
        &self,
        product_id: i64,
        quantity: u32,
    ) -> Result<Option<FfiBasket>, PawcareError> {
        settle(self.client.set_basket_quantity(product_id, quantity).await)?;
        self.basket()
    }

    pub async fn clear_basket(&self) -> Result<(), PawcareError> {
        settle(self.client.clear_basket().await)
    }

    /// Current basket with totals.
    pub fn basket(&self) -> Result<Option<FfiBasket>, PawcareError> {
        Ok(self.client.select(|s| {
            s.basket.data.clone().map(|basket| {
                let totals = selectors::basket_totals(&basket, &s.delivery_methods.data);
                FfiBasket::new(basket, totals)
            })
        })?)
    }

    pub async fn fetch_wishlist(&self) -> Result<Vec<FfiWishlistItem>, PawcareError> {
        settle(self.client.fetch_wishlist().await)
            .map(|wishlist| wishlist.items.into_iter().map(Into::into).collect())
    }

    pub async fn add_to_wishlist(&self, product_id: i64) -> Result<(), PawcareError> {
        settle(self.client.add_to_wishlist(product_id).await)
    }

    pub async fn remove_from_wishlist(&self, product_id: i64) -> Result<(), PawcareError> {
        settle(self.client.remove_from_wishlist(product_id).await)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub async fn fetch_delivery_methods(&self) -> Result<Vec<FfiDeliveryMethod>, PawcareError> {
        settle(self.client.fetch_delivery_methods().await)
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    pub async fn place_order(
        &self,
        delivery_method_id: i64,
        shipping_address: FfiShippingAddress,
        payment_method: Option<String>,
    ) -> Result<FfiOrder, PawcareError> {
        settle(
            self.client
                .place_order(delivery_method_id, shipping_address.into(), payment_method)
                .await,
        )
        .map(Into::into)
    }

    pub async fn fetch_orders(&self) -> Result<Vec<FfiOrder>, PawcareError> {
        settle(self.client.fetch_orders().await).map(|list| list.into_iter().map(Into::into).collect())
    }

    pub async fn set_payment_status(&self, order_id: i64, status: String) -> Result<(), PawcareError> {
        let status = parse_name(&status, PaymentStatus::parse, "payment status")?;
        settle(self.client.set_payment_status(order_id, status).await)
    }

    /// Revenue per payment status, in `PaymentStatus` code order.
    pub fn revenue_by_payment_status(&self) -> Result<Vec<f64>, PawcareError> {
        let revenue = self
            .client
            .select(|s| selectors::revenue_by_payment_status(&s.orders.data))?;
        Ok(revenue.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawcare_api::ApiError;

    #[test]
    fn test_error_mapping() {
        let forbidden: PawcareError = ClientError::from(ApiError::Forbidden { status: 401 }).into();
        assert!(matches!(forbidden, PawcareError::Forbidden(ref m) if m == error::NOT_AUTHORIZED_MESSAGE));

        let refused: PawcareError = ClientError::from(workflow::WorkflowError::EmptyBasket).into();
        assert!(matches!(refused, PawcareError::Refused(_)));

        let missing: PawcareError = ClientError::from(ApiError::NotFound("api/Pet/1".into())).into();
        assert!(matches!(missing, PawcareError::NotFound(_)));
    }

    #[test]
    fn test_in_memory_core_starts_signed_out() {
        let core = open_core_in_memory("http://127.0.0.1:9".into()).unwrap();
        assert!(core.session().unwrap().is_none());
        assert!(core.drain_notifications().is_empty());
        assert!(core.basket().unwrap().is_none());
        assert!(core.store_json().unwrap().contains("\"clinics\""));
    }
}
