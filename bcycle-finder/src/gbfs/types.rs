//! GBFS feed response DTOs.
//!
//! These types map directly to the JSON documents the feeds publish.
//! They use `Option` liberally because feeds omit fields rather than
//! sending null values, and a missing field must stay missing.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Envelope shared by every GBFS feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEnvelope<T> {
    /// When the feed was last updated (POSIX seconds).
    pub last_updated: Option<i64>,

    /// Seconds the document may be considered fresh.
    pub ttl: Option<i64>,

    /// Feed payload.
    pub data: T,
}

/// `data` of the `station_information` and `station_status` feeds.
#[derive(Debug, Clone, Deserialize)]
pub struct StationsData<S> {
    pub stations: Vec<S>,
}

/// `data` of the `system_pricing_plans` feed.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingPlansData {
    pub plans: Vec<PricingPlan>,
}

/// A station from the `station_information` feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationInfo {
    /// Raw identifier, e.g. `bcycle_madison_3316`.
    pub station_id: String,

    /// Public station name.
    pub name: Option<String>,

    /// Latitude (WGS 84).
    pub lat: Option<f64>,

    /// Longitude (WGS 84).
    pub lon: Option<f64>,

    /// Street address.
    pub address: Option<String>,
}

/// A station from the `station_status` feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationStatus {
    /// Raw identifier, matching [`StationInfo::station_id`].
    pub station_id: String,

    /// Whether the station is renting bikes.
    ///
    /// Kept as raw JSON: feeds send `0`/`1`, some send booleans.
    pub is_renting: Option<Value>,

    /// Bikes available to rent.
    pub num_bikes_available: Option<i64>,

    /// Empty docks available for returns.
    pub num_docks_available: Option<i64>,

    /// Last time the station reported (POSIX seconds).
    pub last_reported: Option<i64>,
}

/// Whether an `is_renting` value means the station is renting.
///
/// Only the number `1` and the boolean `true` count; everything else,
/// including a missing value, is inactive.
pub fn is_renting_active(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(n)) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}

/// Price of a pricing plan.
///
/// Feeds disagree on whether prices are JSON numbers or strings, so
/// both are accepted and rendered as received.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PlanPrice {
    Number(f64),
    Text(String),
}

impl fmt::Display for PlanPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanPrice::Number(n) => write!(f, "{n}"),
            PlanPrice::Text(s) => f.write_str(s),
        }
    }
}

/// A plan from the `system_pricing_plans` feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricingPlan {
    /// Plan name, e.g. "Single Ride".
    pub name: String,

    /// Plan price in the system currency.
    pub price: PlanPrice,

    /// Free text description.
    #[serde(default)]
    pub description: String,
}

/// `data` of the `system_information` feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemInfo {
    /// Name of the system.
    pub name: String,

    /// Public website.
    pub url: Option<String>,

    /// Customer service phone number.
    pub phone_number: Option<String>,

    /// Customer service email.
    pub email: Option<String>,
}
