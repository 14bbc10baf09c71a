//! Client actions, one module per domain.
//!
//! Every action that talks to the backend goes through
//! [`Dispatcher::run`](crate::dispatch::Dispatcher::run). Writes never splice
//! lists locally: they settle with [`keep`](crate::store::keep) and then
//! dispatch the matching fetch.

/// Unwrap a workflow check or return the refusal as a rejected outcome.
macro_rules! gate {
    ($client:expr, $op:expr, $check:expr) => {
        match $check {
            Ok(value) => value,
            Err(err) => return $client.refuse($op, err.into()),
        }
    };
}

mod appointments;
mod auth;
mod basket;
mod clinics;
mod doctors;
mod medical_records;
mod orders;
mod pets;
mod products;
mod ratings;
mod wishlist;
