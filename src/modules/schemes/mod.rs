//! Government support schemes. The public feed shows active approved
//! entries; the full list and all writes are admin only.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
