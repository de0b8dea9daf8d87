//! Storage capability behind the trade store.

use crate::models::Trade;
use std::collections::HashMap;

/// Keyed trade storage. Implementations need no internal locking; the
/// [`TradeStore`](super::TradeStore) serializes access.
pub trait TradeRepository: Send {
    fn get(&self, id: &str) -> Option<&Trade>;

    /// Insert or replace, returning the previous trade under `id`.
    fn put(&mut self, id: String, trade: Trade) -> Option<Trade>;

    fn remove(&mut self, id: &str) -> Option<Trade>;

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &Trade)> + '_>;

    fn len(&self) -> usize;

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Volatile map-backed repository; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryTradeRepository {
    trades: HashMap<String, Trade>,
}

impl InMemoryTradeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TradeRepository for InMemoryTradeRepository {
    fn get(&self, id: &str) -> Option<&Trade> {
        self.trades.get(id)
    }

    fn put(&mut self, id: String, trade: Trade) -> Option<Trade> {
        self.trades.insert(id, trade)
    }

    fn remove(&mut self, id: &str) -> Option<Trade> {
        self.trades.remove(id)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &Trade)> + '_> {
        Box::new(self.trades.iter().map(|(id, trade)| (id.as_str(), trade)))
    }

    fn len(&self) -> usize {
        self.trades.len()
    }
}
