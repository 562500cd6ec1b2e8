//! Joining station information with live station status.

use std::collections::HashMap;

use serde_json::Value;

use crate::gbfs::{StationInfo, StationStatus, is_renting_active};

/// One station with the union of its information and status fields.
///
/// Fields the feeds did not provide stay `None`. A station that only
/// appears in the information feed has no status fields, and vice versa.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedStation {
    /// Raw identifier as emitted by the feeds (the join key).
    pub station_id: String,

    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub address: Option<String>,

    pub is_renting: Option<Value>,
    pub num_bikes_available: Option<i64>,
    pub num_docks_available: Option<i64>,
    pub last_reported: Option<i64>,
}

impl MergedStation {
    /// Create a record with only the identifier set.
    pub fn new(station_id: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            ..Self::default()
        }
    }

    /// Overwrite fields with those present in `info`.
    pub fn apply_info(&mut self, info: StationInfo) {
        overwrite(&mut self.name, info.name);
        overwrite(&mut self.lat, info.lat);
        overwrite(&mut self.lon, info.lon);
        overwrite(&mut self.address, info.address);
    }

    /// Overwrite fields with those present in `status`.
    pub fn apply_status(&mut self, status: StationStatus) {
        overwrite(&mut self.is_renting, status.is_renting);
        overwrite(&mut self.num_bikes_available, status.num_bikes_available);
        overwrite(&mut self.num_docks_available, status.num_docks_available);
        overwrite(&mut self.last_reported, status.last_reported);
    }

    /// Whether the station is currently renting bikes.
    pub fn is_renting_active(&self) -> bool {
        is_renting_active(self.is_renting.as_ref())
    }

    /// Whether any status field is known.
    pub fn has_status(&self) -> bool {
        self.is_renting.is_some()
            || self.num_bikes_available.is_some()
            || self.num_docks_available.is_some()
            || self.last_reported.is_some()
    }
}

fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Join station information and status on the raw station identifier.
///
/// Produces exactly one record per distinct identifier found in either
/// collection. Records sharing an identifier are applied in order
/// (information first, then status), later values overwriting earlier
/// ones; duplicates within one collection flatten the same way.
///
/// Callers must not rely on the output order.
pub fn merge(info: Vec<StationInfo>, status: Vec<StationStatus>) -> Vec<MergedStation> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<MergedStation> = Vec::new();

    for record in info {
        let idx = slot_for(&mut index, &mut merged, &record.station_id);
        merged[idx].apply_info(record);
    }

    for record in status {
        let idx = slot_for(&mut index, &mut merged, &record.station_id);
        merged[idx].apply_status(record);
    }

    merged
}

/// Position of the record for `id`, creating an empty one on first sight.
fn slot_for(
    index: &mut HashMap<String, usize>,
    merged: &mut Vec<MergedStation>,
    id: &str,
) -> usize {
    if let Some(&idx) = index.get(id) {
        return idx;
    }
    merged.push(MergedStation::new(id));
    index.insert(id.to_string(), merged.len() - 1);
    merged.len() - 1
}
