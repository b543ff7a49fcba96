//! Authentication module.
//!
//! Registration and login. Both issue a stateless signed token; everything
//! after that is handled by the extractors in [`crate::middleware::auth`].

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
