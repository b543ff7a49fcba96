//! Mandi price observations. Reads are open; writes are admin only.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
