//! Order status.
//!
//! The backend stores order status as a free-form string; the values below
//! are the ones the storefront itself writes or filters on. Unknown values
//! round-trip through [`OrderStatus::Other`] so a backend-side rename never
//! breaks deserialization of order history.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// New orders are always recorded as [`OrderStatus::AwaitingFulfillment`];
/// everything after that is the backend's business.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Payment captured, order recorded, not yet picked.
    #[default]
    AwaitingFulfillment,
    /// Being prepared for shipment.
    Preparing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled before fulfillment.
    Cancelled,
    /// Any status string this client does not know about.
    Other(String),
}

impl OrderStatus {
    /// The wire representation understood by the backend.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AwaitingFulfillment => "awaiting fulfillment",
            Self::Preparing => "preparing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s {
            "awaiting fulfillment" => Self::AwaitingFulfillment,
            "preparing" => Self::Preparing,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}
