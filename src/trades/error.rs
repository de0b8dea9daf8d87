//! Trade pipeline errors.
//!
//! Every failure carries an explicit [`TradeErrorKind`] so callers route on
//! the category, never on the message text.

use std::fmt;
use thiserror::Error;

/// Fields of a trade, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeField {
    ClientTradeId,
    Date,
    Quantity,
    Price,
    Ticker,
}

impl TradeField {
    pub const ALL: [TradeField; 5] = [
        TradeField::ClientTradeId,
        TradeField::Date,
        TradeField::Quantity,
        TradeField::Price,
        TradeField::Ticker,
    ];

    /// JSON key of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeField::ClientTradeId => "client_trade_id",
            TradeField::Date => "date",
            TradeField::Quantity => "quantity",
            TradeField::Price => "price",
            TradeField::Ticker => "ticker",
        }
    }

    // client_trade_id and date read "bad or missing <field>", the rest
    // carry a "format" suffix.
    fn invalid_value_message(&self) -> String {
        match self {
            TradeField::ClientTradeId | TradeField::Date => {
                format!("bad or missing {}", self.as_str())
            }
            _ => format!("bad or missing {} format", self.as_str()),
        }
    }
}

impl fmt::Display for TradeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error category surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeErrorKind {
    MalformedInput,
    WrongFieldType,
    InvalidFieldValue,
    Conflict,
    NotFound,
}

impl TradeErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeErrorKind::MalformedInput => "malformed_input",
            TradeErrorKind::WrongFieldType => "wrong_field_type",
            TradeErrorKind::InvalidFieldValue => "invalid_field_value",
            TradeErrorKind::Conflict => "conflict",
            TradeErrorKind::NotFound => "not_found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    #[error("{0}")]
    MalformedInput(String),
    #[error("bad {0} type")]
    WrongFieldType(TradeField),
    #[error("{}", .0.invalid_value_message())]
    InvalidFieldValue(TradeField),
    #[error("contains trade with already existing ticker or client ID")]
    Conflict,
    #[error("trade not found")]
    NotFound,
}

impl TradeError {
    pub fn bad_json() -> Self {
        TradeError::MalformedInput("bad JSON format".to_string())
    }

    pub fn kind(&self) -> TradeErrorKind {
        match self {
            TradeError::MalformedInput(_) => TradeErrorKind::MalformedInput,
            TradeError::WrongFieldType(_) => TradeErrorKind::WrongFieldType,
            TradeError::InvalidFieldValue(_) => TradeErrorKind::InvalidFieldValue,
            TradeError::Conflict => TradeErrorKind::Conflict,
            TradeError::NotFound => TradeErrorKind::NotFound,
        }
    }

    /// Field the error names, if any.
    pub fn field(&self) -> Option<TradeField> {
        match self {
            TradeError::WrongFieldType(field) | TradeError::InvalidFieldValue(field) => {
                Some(*field)
            }
            _ => None,
        }
    }
}

pub type TradeResult<T> = Result<T, TradeError>;
