//! Content-addressed trade ids.

use crate::models::Trade;
use sha2::{Digest, Sha256};

pub const MAX_TRADE_ID_LEN: usize = 255;

/// Derive the id of a trade from its canonical JSON form.
///
/// Identical field values always produce the same id. Collisions between
/// distinct trades are not detected.
pub fn trade_id(trade: &Trade) -> String {
    // Serializing plain strings and integers cannot fail.
    let canonical = serde_json::to_vec(trade).unwrap_or_default();
    let mut id = hex::encode(Sha256::digest(&canonical));
    id.truncate(MAX_TRADE_ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trade {
        Trade::new("123456", 20010101, "10", "5.67", "PRTH")
    }

    #[test]
    fn test_trade_id_is_deterministic() {
        assert_eq!(trade_id(&sample()), trade_id(&sample()));
    }

    #[test]
    fn test_trade_id_survives_round_trip() {
        let json = serde_json::to_string(&sample()).unwrap();
        let decoded: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade_id(&decoded), trade_id(&sample()));
    }

    #[test]
    fn test_trade_id_shape() {
        let id = trade_id(&sample());
        assert!(id.len() <= MAX_TRADE_ID_LEN);
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_any_field_change_changes_id() {
        let base = trade_id(&sample());
        let variants = [
            Trade { client_trade_id: "123457".into(), ..sample() },
            Trade { date: 20010102, ..sample() },
            Trade { quantity: "10.0".into(), ..sample() },
            Trade { price: "5.68".into(), ..sample() },
            Trade { ticker: "AAPL".into(), ..sample() },
        ];
        for variant in &variants {
            assert_ne!(trade_id(variant), base);
        }
    }
}
