//! Trade validation, identity and storage pipeline.
//!
//! raw bytes -> parser -> conflict detection -> id assignment -> store

pub mod conflict;
pub mod error;
pub mod identity;
pub mod parser;
pub mod repository;
pub mod store;

pub use error::{TradeError, TradeErrorKind, TradeField, TradeResult};
pub use identity::trade_id;
pub use parser::{parse_single_trade, parse_trades, validate};
pub use repository::{InMemoryTradeRepository, TradeRepository};
pub use store::TradeStore;
