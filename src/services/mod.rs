//! Booking operations, independent of HTTP.

pub mod appointments;
pub mod catalog;
pub mod users;
