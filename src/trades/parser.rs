//! Trade payload decoding and validation.
//!
//! Decoding runs in three tiers: a strictly typed batch, then a strictly
//! typed single trade, and finally a loose scan of the raw objects whose only
//! job is to name the field that carries the wrong JSON type.

use super::error::{TradeError, TradeField, TradeResult};
use crate::models::Trade;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::debug;

pub const MIN_DATE: i64 = 20010101;
pub const MAX_DATE: i64 = 21000101;
pub const MAX_CLIENT_TRADE_ID_LEN: usize = 256;

fn decimal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^-?[0-9]*\.?[0-9]+$").expect("decimal pattern compiles"))
}

/// JSON kind each field must carry on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonKind {
    String,
    Number,
}

impl JsonKind {
    fn of(field: TradeField) -> Self {
        match field {
            TradeField::Date => JsonKind::Number,
            _ => JsonKind::String,
        }
    }

    fn matches(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (JsonKind::String, Value::String(_)) | (JsonKind::Number, Value::Number(_))
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LoosePayload {
    Batch(Vec<Map<String, Value>>),
    Single(Map<String, Value>),
}

/// Decode and validate a batch of trades.
///
/// Accepts either a JSON array of trade objects or a single trade object.
/// The result is never empty.
pub fn parse_trades(data: &[u8]) -> TradeResult<Vec<Trade>> {
    let trades = decode_trades(data)?;
    if trades.is_empty() {
        return Err(TradeError::MalformedInput("empty trade batch".to_string()));
    }
    for trade in &trades {
        validate(trade)?;
    }
    Ok(trades)
}

/// Decode and validate exactly one trade, as a bare object or a
/// one-element array.
pub fn parse_single_trade(data: &[u8]) -> TradeResult<Trade> {
    let mut trades = parse_trades(data)?;
    if trades.len() != 1 {
        return Err(TradeError::MalformedInput(
            "expected a single trade".to_string(),
        ));
    }
    Ok(trades.remove(0))
}

fn decode_trades(data: &[u8]) -> TradeResult<Vec<Trade>> {
    if let Ok(trades) = serde_json::from_slice::<Vec<Trade>>(data) {
        return Ok(trades);
    }
    if let Ok(trade) = serde_json::from_slice::<Trade>(data) {
        return Ok(vec![trade]);
    }
    Err(classify_decode_failure(data))
}

fn classify_decode_failure(data: &[u8]) -> TradeError {
    let objects = match serde_json::from_slice::<LoosePayload>(data) {
        Ok(LoosePayload::Batch(objects)) => objects,
        Ok(LoosePayload::Single(object)) => vec![object],
        Err(e) => {
            debug!(error = %e, "Trade payload is not JSON objects");
            return TradeError::bad_json();
        }
    };

    objects
        .iter()
        .find_map(mistyped_field)
        .map(TradeError::WrongFieldType)
        .unwrap_or_else(TradeError::bad_json)
}

// Null is treated as absent, matching the strict decode.
fn mistyped_field(object: &Map<String, Value>) -> Option<TradeField> {
    TradeField::ALL.into_iter().find(|field| {
        object
            .get(field.as_str())
            .is_some_and(|value| !value.is_null() && !JsonKind::of(*field).matches(value))
    })
}

/// Check field values in canonical order, reporting the first violation.
pub fn validate(trade: &Trade) -> TradeResult<()> {
    let id_len = trade.client_trade_id.chars().count();
    if !(1..=MAX_CLIENT_TRADE_ID_LEN).contains(&id_len) {
        return Err(TradeError::InvalidFieldValue(TradeField::ClientTradeId));
    }
    if !(MIN_DATE..=MAX_DATE).contains(&trade.date) {
        return Err(TradeError::InvalidFieldValue(TradeField::Date));
    }
    if !decimal_pattern().is_match(&trade.quantity) {
        return Err(TradeError::InvalidFieldValue(TradeField::Quantity));
    }
    if !decimal_pattern().is_match(&trade.price) {
        return Err(TradeError::InvalidFieldValue(TradeField::Price));
    }
    if trade.ticker.is_empty() {
        return Err(TradeError::InvalidFieldValue(TradeField::Ticker));
    }
    Ok(())
}
