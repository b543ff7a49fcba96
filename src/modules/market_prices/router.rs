use axum::Router;
use axum::routing::get;

use crate::modules::market_prices::controller::{
    create_market_price, delete_market_price, get_commodities, get_market_price,
    get_market_prices, get_prices_by_commodity, get_prices_by_state, update_market_price,
};
use crate::state::AppState;

pub fn init_market_prices_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_market_prices).post(create_market_price))
        .route("/commodities", get(get_commodities))
        .route("/commodity/{commodity_name}", get(get_prices_by_commodity))
        .route("/state/{state}", get(get_prices_by_state))
        .route(
            "/{id}",
            get(get_market_price)
                .put(update_market_price)
                .delete(delete_market_price),
        )
}
