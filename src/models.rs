use serde::{Deserialize, Deserializer, Serialize};

/// A submitted trade as the client describes it.
///
/// Field order is significant: it is the canonical serialization order used
/// to derive trade ids, so do not reorder these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_trade_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ticker: String,
}

impl Trade {
    pub fn new(
        client_trade_id: impl Into<String>,
        date: i64,
        quantity: impl Into<String>,
        price: impl Into<String>,
        ticker: impl Into<String>,
    ) -> Self {
        Self {
            client_trade_id: client_trade_id.into(),
            date,
            quantity: quantity.into(),
            price: price.into(),
            ticker: ticker.into(),
        }
    }
}

/// A stored trade together with its content-derived id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalTrade {
    pub id: String,
    pub trade: Trade,
}

/// Acknowledgment returned for every trade accepted in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSubmitted {
    pub client_trade_id: String,
    pub trade_id: String,
}

// Absent and null fields decode to their zero value so validation can
// report them as "bad or missing" instead of failing the whole decode.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
