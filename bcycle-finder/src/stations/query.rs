//! Selecting stations by identifier or name.
//!
//! All functions are pure and keep the input order. An empty result is
//! a normal outcome, never an error.

use std::collections::HashSet;

use crate::gbfs::{Program, StationInfo};

use super::merge::MergedStation;

/// Anything with a raw station identifier and an optional name.
pub trait StationRecord {
    /// Raw identifier as emitted by the feeds.
    fn raw_id(&self) -> &str;

    /// Station name, if the feeds provided one.
    fn name(&self) -> Option<&str>;

    /// Identifier with the program prefix stripped, e.g. `5`.
    fn normalized_id<'a>(&'a self, program: &Program) -> &'a str {
        program.normalize_station_id(self.raw_id())
    }
}

impl StationRecord for StationInfo {
    fn raw_id(&self) -> &str {
        &self.station_id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl StationRecord for MergedStation {
    fn raw_id(&self) -> &str {
        &self.station_id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl<S: StationRecord> StationRecord for &S {
    fn raw_id(&self) -> &str {
        (**self).raw_id()
    }

    fn name(&self) -> Option<&str> {
        (**self).name()
    }
}

/// Stations whose normalized identifier is in `wanted`.
///
/// An empty `wanted` set selects nothing.
pub fn by_identifier_set<'a, S: StationRecord>(
    stations: &'a [S],
    wanted: &HashSet<String>,
    program: &Program,
) -> Vec<&'a S> {
    if wanted.is_empty() {
        return Vec::new();
    }

    stations
        .iter()
        .filter(|s| wanted.contains(s.normalized_id(program)))
        .collect()
}

/// The station whose normalized identifier equals `id`.
///
/// Comparison is plain string equality, so `"05"` does not match `"5"`.
pub fn by_exact_identifier<'a, S: StationRecord>(
    stations: &'a [S],
    id: &str,
    program: &Program,
) -> Option<&'a S> {
    stations.iter().find(|s| s.normalized_id(program) == id)
}

/// Stations whose name contains `query`, ignoring case.
///
/// Stations without a name never match.
pub fn by_substring<'a, S: StationRecord>(stations: &'a [S], query: &str) -> Vec<&'a S> {
    let needle = query.to_lowercase();

    stations
        .iter()
        .filter(|s| {
            s.name()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}
