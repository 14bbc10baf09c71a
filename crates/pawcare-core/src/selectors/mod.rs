//! Derived views over store data.
//!
//! Every selector is a pure function of its inputs: the source list is only
//! borrowed, and "now" is always passed in, so the same inputs give the same
//! view.

mod appointments;
mod clinics;
mod ratings;
mod shop;

pub use appointments::*;
pub use clinics::*;
pub use ratings::*;
pub use shop::*;
