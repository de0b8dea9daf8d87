//! Business-key conflict detection.
//!
//! `ticker` and `client_trade_id` are both unique across the store and
//! within a submitted batch.

use super::error::{TradeError, TradeResult};
use crate::models::Trade;
use std::collections::HashSet;

/// Reject candidates whose ticker or client id already exists in `stored`.
pub fn check_against_store<'a, I>(candidates: &[Trade], stored: I) -> TradeResult<()>
where
    I: IntoIterator<Item = &'a Trade>,
{
    let mut tickers = HashSet::new();
    let mut client_ids = HashSet::new();
    for trade in stored {
        tickers.insert(trade.ticker.as_str());
        client_ids.insert(trade.client_trade_id.as_str());
    }

    let conflicts = candidates.iter().any(|candidate| {
        tickers.contains(candidate.ticker.as_str())
            || client_ids.contains(candidate.client_trade_id.as_str())
    });
    if conflicts {
        return Err(TradeError::Conflict);
    }
    Ok(())
}

/// Reject batches in which two candidates share a ticker or client id.
pub fn check_within_batch(candidates: &[Trade]) -> TradeResult<()> {
    let mut tickers = HashSet::with_capacity(candidates.len());
    let mut client_ids = HashSet::with_capacity(candidates.len());
    for candidate in candidates {
        // Evaluate both inserts so neither short-circuits.
        let new_ticker = tickers.insert(candidate.ticker.as_str());
        let new_client_id = client_ids.insert(candidate.client_trade_id.as_str());
        if !new_ticker || !new_client_id {
            return Err(TradeError::Conflict);
        }
    }
    Ok(())
}

/// Store check first, then the intra-batch check.
pub fn check_batch<'a, I>(candidates: &[Trade], stored: I) -> TradeResult<()>
where
    I: IntoIterator<Item = &'a Trade>,
{
    check_against_store(candidates, stored)?;
    check_within_batch(candidates)
}
