//! Configuration modules for the Krushimitra API.
//!
//! Each submodule handles one aspect of configuration, typically loaded
//! from environment variables with sensible development defaults.
//!
//! # Modules
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL database connection pool initialization
//! - [`jwt`]: JWT authentication configuration
//! - [`weather`]: OpenWeatherMap proxy configuration
//!
//! # Environment Variables
//!
//! Most configuration is loaded from environment variables. See each
//! submodule for specific variable names and their defaults.

pub mod cors;
pub mod database;
pub mod jwt;
pub mod weather;
