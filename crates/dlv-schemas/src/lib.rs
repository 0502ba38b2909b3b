//! Wire types shared by the dlv daemon and its tests.
//!
//! Request bodies are deliberately loose: every field is an [`EchoValue`] that
//! is rendered back into a message, never validated. Response bodies are the
//! fixed shapes the front end reads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// ---------------------------------------------------------------------------
// EchoValue
// ---------------------------------------------------------------------------

/// A request field that is echoed back verbatim.
///
/// `Missing` and `Present(Value::Null)` are distinct: an absent key renders as
/// `undefined`, an explicit `null` renders as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EchoValue {
    #[default]
    Missing,
    Present(Value),
}

impl EchoValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, EchoValue::Missing)
    }
}

impl<'de> Deserialize<'de> for EchoValue {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Value::deserialize(d).map(EchoValue::Present)
    }
}

impl fmt::Display for EchoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EchoValue::Missing => f.write_str("undefined"),
            EchoValue::Present(Value::String(s)) => f.write_str(s),
            // Numbers, bools, null, arrays and objects use their compact JSON text.
            EchoValue::Present(other) => write!(f, "{other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /api/bids/update-status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BidStatusUpdate {
    #[serde(default, rename = "bidId")]
    pub bid_id: EchoValue,
    #[serde(default)]
    pub status: EchoValue,
}

/// Body of `POST /api/orders/confirm-delivery`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryConfirmation {
    #[serde(default, rename = "orderId")]
    pub order_id: EchoValue,
    /// Read and dropped; nothing inspects the proof.
    #[serde(default, rename = "deliveryProof")]
    pub delivery_proof: EchoValue,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryResponse {
    pub message: String,
    #[serde(rename = "transactionId")]
    pub transaction_id: TransactionId,
}

/// The only failure body any mock endpoint ever returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

impl ErrorResponse {
    pub fn internal() -> Self {
        Self {
            error: INTERNAL_SERVER_ERROR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: &'static str,
}

// ---------------------------------------------------------------------------
// TransactionId
// ---------------------------------------------------------------------------

/// Placeholder ledger reference of the form `0.0.<n>`, `n` in `0..=999_999`.
///
/// Not backed by any ledger. It exists so the front end has something shaped
/// like a transaction reference to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIdParseError(String);

impl fmt::Display for TransactionIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid transaction id: {:?}", self.0)
    }
}

impl std::error::Error for TransactionIdParseError {}

impl TransactionId {
    pub const MAX_SEQ: u32 = 999_999;
    const PREFIX: &'static str = "0.0.";

    /// `None` when `seq` is above [`Self::MAX_SEQ`].
    pub fn new(seq: u32) -> Option<Self> {
        (seq <= Self::MAX_SEQ).then_some(Self(seq))
    }

    /// Saturates at [`Self::MAX_SEQ`].
    pub fn clamped(seq: u32) -> Self {
        Self(seq.min(Self::MAX_SEQ))
    }

    pub fn seq(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for TransactionId {
    type Err = TransactionIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TransactionIdParseError(s.to_string());
        let tail = s.strip_prefix(Self::PREFIX).ok_or_else(err)?;
        // Reject signs, whitespace and leading zeros so Display round-trips exactly.
        if tail.is_empty()
            || !tail.bytes().all(|b| b.is_ascii_digit())
            || (tail.len() > 1 && tail.starts_with('0'))
        {
            return Err(err());
        }
        tail.parse::<u32>()
            .ok()
            .and_then(TransactionId::new)
            .ok_or_else(err)
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
