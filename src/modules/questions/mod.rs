//! Farmer questions.
//!
//! Farmers post questions; the public and unresolved feeds expose the
//! approved ones. Editing never touches resolution state, which only
//! changes when the owner accepts an answer.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
