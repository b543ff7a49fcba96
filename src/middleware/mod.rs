//! Middleware modules for request processing.
//!
//! This module contains the extractors and policy engine handling the
//! cross-cutting concerns of authentication and authorization.
//!
//! # Modules
//!
//! - [`auth`]: Request-scoped authentication extractors
//! - [`policy`]: Declarative role and ownership authorization
//!
//! # Authentication Flow
//!
//! 1. Client sends a request, optionally with `Authorization: Bearer <token>`
//! 2. [`auth::MaybeUser`] resolves the token to an account, or leaves the
//!    request anonymous when the header is absent or the token does not
//!    validate; it never rejects
//! 3. [`auth::CurrentUser`] rejects anonymous requests with 401
//! 4. Handlers consult the [`policy`] table for role and ownership rules
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::CurrentUser;
//! use crate::middleware::policy::{self, Action};
//!
//! async fn create_question(
//!     CurrentUser(user): CurrentUser,
//!     // ...
//! ) -> Result<impl IntoResponse, AppError> {
//!     policy::authorize(&user, Action::QuestionCreate)?;
//!     // ...
//! }
//! ```

pub mod auth;
pub mod policy;
