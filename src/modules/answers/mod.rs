//! Expert answers and acceptance.
//!
//! Only approved experts may answer. Acceptance runs as a single
//! transaction that locks the parent question, keeps at most one answer
//! accepted and marks the question resolved.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
