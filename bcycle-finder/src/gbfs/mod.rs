//! GBFS (General Bikeshare Feed Specification) feed client.
//!
//! This module fetches the named JSON feeds a BCycle program publishes
//! and hands them back as parsed, unvalidated JSON documents.
//!
//! Key characteristics of the feeds:
//! - Every program lives under its own path segment (`bcycle_{program}`)
//! - Station information and live status are **separate** feeds that
//!   share only the `station_id` key
//! - Documents are wrapped in a `{ last_updated, ttl, data }` envelope

mod client;
mod error;
mod mock;
mod program;
mod types;

pub use client::{Feed, FeedSource, GbfsClient, GbfsConfig};
pub use error::FeedError;
pub use mock::MockFeedSource;
pub use program::{InvalidProgram, Program};
pub use types::{
    FeedEnvelope, PlanPrice, PricingPlan, PricingPlansData, StationInfo, StationStatus,
    StationsData, SystemInfo, is_renting_active,
};
