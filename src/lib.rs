//! Tradedesk Backend Library
//!
//! Trade validation, content-addressed ids, conflict detection and the
//! in-memory trade store, plus the HTTP surface that exposes them.

pub mod api;
pub mod config;
pub mod middleware;
pub mod models;
pub mod trades;

pub use models::{InternalTrade, Trade, TradeSubmitted};
pub use trades::{TradeError, TradeErrorKind, TradeStore};
