//! Farmer produce listings.
//!
//! Farmers manage their own listings; the public marketplace shows
//! approved available ones; admins moderate through the approve
//! operation.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
