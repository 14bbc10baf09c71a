//! Client state container.
//!
//! One [`Slice`] per domain subtree. The store is an explicit value shared by
//! `Arc<Mutex<_>>`; each slice is only written by the operations that target
//! it, and cross-slice coordination happens by dispatching operations in
//! sequence.

mod slice;

pub use slice::*;

use serde::Serialize;

use crate::models::{
    Appointment, Basket, Clinic, DeliveryMethod, Doctor, MedicalRecord, Order, Pet, Product,
    Rating, Session, Wishlist,
};

/// Result of the "has this user rated this clinic" pre-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingCheck {
    pub clinic_id: i64,
    pub has_rated: bool,
}

/// All client state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Store {
    pub session: Slice<Option<Session>>,
    pub clinics: Slice<Vec<Clinic>>,
    pub clinic: Slice<Option<Clinic>>,
    pub doctors: Slice<Vec<Doctor>>,
    pub doctor_profile: Slice<Option<Doctor>>,
    pub pets: Slice<Vec<Pet>>,
    pub appointments: Slice<Vec<Appointment>>,
    pub medical_record: Slice<Option<MedicalRecord>>,
    pub medical_records: Slice<Vec<MedicalRecord>>,
    pub ratings: Slice<Vec<Rating>>,
    pub rating_check: Slice<Option<RatingCheck>>,
    pub products: Slice<Vec<Product>>,
    pub product: Slice<Option<Product>>,
    pub delivery_methods: Slice<Vec<DeliveryMethod>>,
    pub basket: Slice<Option<Basket>>,
    pub wishlist: Slice<Wishlist>,
    pub orders: Slice<Vec<Order>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session, if signed in.
    pub fn current_session(&self) -> Option<&Session> {
        self.session.data.as_ref()
    }

    /// Find a loaded clinic by ID (list first, then the selected clinic).
    pub fn find_clinic(&self, id: i64) -> Option<&Clinic> {
        self.clinics
            .data
            .iter()
            .find(|c| c.id == id)
            .or_else(|| self.clinic.data.as_ref().filter(|c| c.id == id))
    }

    /// Find a loaded appointment by ID.
    pub fn find_appointment(&self, id: i64) -> Option<&Appointment> {
        self.appointments.data.iter().find(|a| a.id == id)
    }

    /// Loaded medical records, including the single-record view.
    pub fn known_medical_records(&self) -> Vec<MedicalRecord> {
        let mut records = self.medical_records.data.clone();
        if let Some(record) = &self.medical_record.data {
            if !records.iter().any(|r| r.id == record.id) {
                records.push(record.clone());
            }
        }
        records
    }

    /// Drop everything tied to the signed-in user. Shop catalog stays.
    pub fn clear_user_data(&mut self) {
        self.session.reset(None);
        self.doctor_profile.reset(None);
        self.pets.reset(Vec::new());
        self.appointments.reset(Vec::new());
        self.medical_record.reset(None);
        self.medical_records.reset(Vec::new());
        self.rating_check.reset(None);
        self.wishlist.reset(Wishlist::default());
        self.orders.reset(Vec::new());
    }
}

// Slice accessors handed to the dispatcher.

pub fn session(store: &mut Store) -> &mut Slice<Option<Session>> {
    &mut store.session
}

pub fn clinics(store: &mut Store) -> &mut Slice<Vec<Clinic>> {
    &mut store.clinics
}

pub fn clinic(store: &mut Store) -> &mut Slice<Option<Clinic>> {
    &mut store.clinic
}

pub fn doctors(store: &mut Store) -> &mut Slice<Vec<Doctor>> {
    &mut store.doctors
}

pub fn doctor_profile(store: &mut Store) -> &mut Slice<Option<Doctor>> {
    &mut store.doctor_profile
}

pub fn pets(store: &mut Store) -> &mut Slice<Vec<Pet>> {
    &mut store.pets
}

pub fn appointments(store: &mut Store) -> &mut Slice<Vec<Appointment>> {
    &mut store.appointments
}

pub fn medical_record(store: &mut Store) -> &mut Slice<Option<MedicalRecord>> {
    &mut store.medical_record
}

pub fn medical_records(store: &mut Store) -> &mut Slice<Vec<MedicalRecord>> {
    &mut store.medical_records
}

pub fn ratings(store: &mut Store) -> &mut Slice<Vec<Rating>> {
    &mut store.ratings
}

pub fn rating_check(store: &mut Store) -> &mut Slice<Option<RatingCheck>> {
    &mut store.rating_check
}

pub fn products(store: &mut Store) -> &mut Slice<Vec<Product>> {
    &mut store.products
}

pub fn product(store: &mut Store) -> &mut Slice<Option<Product>> {
    &mut store.product
}

pub fn delivery_methods(store: &mut Store) -> &mut Slice<Vec<DeliveryMethod>> {
    &mut store.delivery_methods
}

pub fn basket(store: &mut Store) -> &mut Slice<Option<Basket>> {
    &mut store.basket
}

pub fn wishlist(store: &mut Store) -> &mut Slice<Wishlist> {
    &mut store.wishlist
}

pub fn orders(store: &mut Store) -> &mut Slice<Vec<Order>> {
    &mut store.orders
}
