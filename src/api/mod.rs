pub mod routes;
pub mod trades;

pub use routes::create_router;
pub use trades::{trades_router, ApiError, TradeState};
