//! Trade store: validation, conflict detection and id assignment composed
//! over a [`TradeRepository`].
//!
//! Each operation holds the repository lock for its whole check-then-mutate
//! sequence, so concurrent submissions cannot both pass the conflict check
//! against a stale view.

use super::conflict;
use super::error::{TradeError, TradeResult};
use super::identity::trade_id;
use super::parser;
use super::repository::{InMemoryTradeRepository, TradeRepository};
use crate::models::{InternalTrade, TradeSubmitted};
use parking_lot::Mutex;
use std::slice;
use tracing::{debug, info, warn};

pub struct TradeStore<R = InMemoryTradeRepository> {
    repo: Mutex<R>,
}

impl TradeStore<InMemoryTradeRepository> {
    pub fn new() -> Self {
        Self::with_repository(InMemoryTradeRepository::new())
    }
}

impl Default for TradeStore<InMemoryTradeRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TradeRepository> TradeStore<R> {
    pub fn with_repository(repo: R) -> Self {
        Self {
            repo: Mutex::new(repo),
        }
    }

    /// Validate and atomically insert a batch of trades.
    ///
    /// Either every trade is stored or none is. Acknowledgments come back in
    /// input order.
    pub fn insert_batch(&self, data: &[u8]) -> TradeResult<Vec<TradeSubmitted>> {
        let trades = parser::parse_trades(data).map_err(|e| {
            warn!(error = %e, kind = e.kind().as_str(), "Rejected trade batch");
            e
        })?;

        let mut repo = self.repo.lock();
        if let Err(e) = conflict::check_batch(&trades, repo.iter().map(|(_, trade)| trade)) {
            warn!(batch_size = trades.len(), "Rejected conflicting trade batch");
            return Err(e);
        }

        let mut submitted = Vec::with_capacity(trades.len());
        for trade in trades {
            let id = trade_id(&trade);
            submitted.push(TradeSubmitted {
                client_trade_id: trade.client_trade_id.clone(),
                trade_id: id.clone(),
            });
            if repo.put(id.clone(), trade).is_some() {
                warn!(trade_id = %id, "Trade id collision overwrote a stored trade");
            }
        }

        info!(
            inserted = submitted.len(),
            stored = repo.len(),
            "Inserted trade batch"
        );
        Ok(submitted)
    }

    pub fn get(&self, id: &str) -> TradeResult<InternalTrade> {
        let repo = self.repo.lock();
        repo.get(id)
            .map(|trade| InternalTrade {
                id: id.to_string(),
                trade: trade.clone(),
            })
            .ok_or(TradeError::NotFound)
    }

    /// Every stored trade, ordered by id.
    pub fn get_all(&self) -> Vec<InternalTrade> {
        let repo = self.repo.lock();
        let mut trades: Vec<InternalTrade> = repo
            .iter()
            .map(|(id, trade)| InternalTrade {
                id: id.to_string(),
                trade: trade.clone(),
            })
            .collect();
        trades.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(count = trades.len(), "Listed trades");
        trades
    }

    pub fn delete(&self, id: &str) -> TradeResult<()> {
        let mut repo = self.repo.lock();
        match repo.remove(id) {
            Some(trade) => {
                info!(trade_id = %id, ticker = %trade.ticker, "Deleted trade");
                Ok(())
            }
            None => Err(TradeError::NotFound),
        }
    }

    /// Replace the trade at `id` with a new single-trade payload.
    ///
    /// The replacement is stored under its freshly derived id. Unknown ids
    /// fail with `NotFound` before the payload is considered; any failure
    /// leaves the store untouched.
    pub fn update(&self, id: &str, data: &[u8]) -> TradeResult<InternalTrade> {
        let parsed = parser::parse_single_trade(data);

        let mut repo = self.repo.lock();
        if !repo.contains(id) {
            return Err(TradeError::NotFound);
        }
        let trade = parsed.map_err(|e| {
            warn!(trade_id = %id, error = %e, "Rejected trade update");
            e
        })?;

        let others = repo
            .iter()
            .filter(|(stored_id, _)| *stored_id != id)
            .map(|(_, stored)| stored);
        if let Err(e) = conflict::check_against_store(slice::from_ref(&trade), others) {
            warn!(trade_id = %id, "Rejected conflicting trade update");
            return Err(e);
        }

        repo.remove(id);
        let new_id = trade_id(&trade);
        repo.put(new_id.clone(), trade.clone());

        info!(old_id = %id, new_id = %new_id, "Updated trade");
        Ok(InternalTrade { id: new_id, trade })
    }

    pub fn len(&self) -> usize {
        self.repo.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Trade;
    use crate::trades::error::TradeField;
    use std::sync::Arc;
    use std::thread;

    const PRTH: &str = r#"{"client_trade_id":"123456","date":20010101,"quantity":"10","price":"5.67","ticker":"PRTH"}"#;

    fn body(client_id: &str, ticker: &str) -> String {
        format!(
            r#"{{"client_trade_id":"{client_id}","date":20200101,"quantity":"100","price":"10.00","ticker":"{ticker}"}}"#
        )
    }

    fn batch(items: &[(&str, &str)]) -> String {
        let parts: Vec<String> = items.iter().map(|(c, t)| body(c, t)).collect();
        format!("[{}]", parts.join(","))
    }

    #[test]
    fn test_insert_and_fetch() {
        let store = TradeStore::new();
        let submitted = store.insert_batch(PRTH.as_bytes()).unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].client_trade_id, "123456");

        let expected = Trade::new("123456", 20010101, "10", "5.67", "PRTH");
        assert_eq!(submitted[0].trade_id, trade_id(&expected));

        let fetched = store.get(&submitted[0].trade_id).unwrap();
        assert_eq!(fetched.trade, expected);
        assert_eq!(fetched.id, submitted[0].trade_id);
    }

    #[test]
    fn test_acks_in_input_order() {
        let store = TradeStore::new();
        let submitted = store
            .insert_batch(batch(&[("T-1", "AAPL"), ("Q-1", "AMZN"), ("P-1", "PRTH")]).as_bytes())
            .unwrap();
        let client_ids: Vec<&str> = submitted.iter().map(|s| s.client_trade_id.as_str()).collect();
        assert_eq!(client_ids, vec!["T-1", "Q-1", "P-1"]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get_all().len(), 3);
    }

    #[test]
    fn test_conflict_with_store_is_atomic() {
        let store = TradeStore::new();
        store.insert_batch(body("A-1", "AAPL").as_bytes()).unwrap();
        let before = store.get_all();

        let err = store
            .insert_batch(batch(&[("B-1", "AMZN"), ("C-1", "AAPL")]).as_bytes())
            .unwrap_err();
        assert_eq!(err, TradeError::Conflict);
        assert_eq!(store.get_all(), before);
    }

    #[test]
    fn test_duplicate_ticker_in_batch_stores_nothing() {
        let store = TradeStore::new();
        let err = store
            .insert_batch(batch(&[("T-1", "AAPL"), ("Q-1", "PRTH"), ("P-1", "PRTH")]).as_bytes())
            .unwrap_err();
        assert_eq!(err, TradeError::Conflict);
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_batch_stores_nothing() {
        let store = TradeStore::new();
        let mut items = batch(&[("T-1", "AAPL"), ("Q-1", "AMZN")]);
        items = items.replacen("\"date\":20200101", "\"date\":2", 1);
        let err = store.insert_batch(items.as_bytes()).unwrap_err();
        assert_eq!(err, TradeError::InvalidFieldValue(TradeField::Date));
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete() {
        let store = TradeStore::new();
        let id = store.insert_batch(PRTH.as_bytes()).unwrap().remove(0).trade_id;
        assert!(store.delete(&id).is_ok());
        assert_eq!(store.get(&id), Err(TradeError::NotFound));
        assert_eq!(store.delete(&id), Err(TradeError::NotFound));
    }

    #[test]
    fn test_delete_never_issued_id() {
        let store = TradeStore::new();
        assert_eq!(store.delete("deadbeef"), Err(TradeError::NotFound));
    }

    #[test]
    fn test_update_changes_id() {
        let store = TradeStore::new();
        let id = store.insert_batch(PRTH.as_bytes()).unwrap().remove(0).trade_id;

        let updated = store.update(&id, body("123456", "PRTH").as_bytes()).unwrap();
        assert_ne!(updated.id, id);
        assert_eq!(updated.trade.date, 20200101);
        assert_eq!(store.get(&id), Err(TradeError::NotFound));
        assert_eq!(store.get(&updated.id).unwrap(), updated);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_with_identical_payload_keeps_id() {
        let store = TradeStore::new();
        let id = store.insert_batch(PRTH.as_bytes()).unwrap().remove(0).trade_id;
        let updated = store.update(&id, PRTH.as_bytes()).unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_unknown_id() {
        let store = TradeStore::new();
        store.insert_batch(PRTH.as_bytes()).unwrap();
        let before = store.get_all();

        assert_eq!(
            store.update("missing", body("X-1", "MSFT").as_bytes()),
            Err(TradeError::NotFound)
        );
        // Unknown id wins over an invalid payload.
        assert_eq!(store.update("missing", b"{bad"), Err(TradeError::NotFound));
        assert_eq!(store.get_all(), before);
    }

    #[test]
    fn test_update_conflict_leaves_original() {
        let store = TradeStore::new();
        let acks = store
            .insert_batch(batch(&[("A-1", "AAPL"), ("B-1", "AMZN")]).as_bytes())
            .unwrap();
        let id = acks[0].trade_id.clone();
        let original = store.get(&id).unwrap();

        let err = store.update(&id, body("A-1", "AMZN").as_bytes()).unwrap_err();
        assert_eq!(err, TradeError::Conflict);
        assert_eq!(store.get(&id).unwrap(), original);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_invalid_payload_leaves_original() {
        let store = TradeStore::new();
        let id = store.insert_batch(PRTH.as_bytes()).unwrap().remove(0).trade_id;
        let original = store.get(&id).unwrap();

        let err = store
            .update(&id, PRTH.replace("\"5.67\"", "5.67").as_bytes())
            .unwrap_err();
        assert_eq!(err, TradeError::WrongFieldType(TradeField::Price));
        assert_eq!(store.get(&id).unwrap(), original);
    }

    #[test]
    fn test_concurrent_submissions_keep_tickers_unique() {
        let store = Arc::new(TradeStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.insert_batch(body(&format!("C-{i}"), "AAPL").as_bytes()))
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| r.is_ok())
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(store.len(), 1);
    }
}
