pub mod answers;
pub mod auth;
pub mod crops;
pub mod listings;
pub mod market_prices;
pub mod questions;
pub mod schemes;
pub mod users;
pub mod weather;

pub use self::auth::model::LoginRequest;
pub use self::users::model::User;
