//! BCycle station finder.
//!
//! Answers `bcycle ...` chat commands from a bike-share program's public
//! GBFS feeds: default station status, station lookup by id or name,
//! program contact details and pricing plans.

pub mod chat;
pub mod config;
pub mod format;
pub mod gbfs;
pub mod pipeline;
pub mod stations;
pub mod web;
