//! Users module.
//!
//! Account directory and profile management: the admin user list, own
//! profile reads and updates, the public expert directory, and expert
//! approval.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
