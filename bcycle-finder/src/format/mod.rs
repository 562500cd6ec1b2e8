//! Rendering station, plan and system records for a chat surface.
//!
//! A [`Presenter`] is chosen once per pipeline from the configured
//! [`Surface`]: [`RichSurface`] produces Slack-style attachment cards,
//! [`PlainSurface`] produces text lines. Formatting never does I/O.

mod payload;
mod plain;
mod rich;

use std::fmt;
use std::str::FromStr;

pub use payload::{CardColor, CardField, Message, OutputPayload, RichCard};
pub use plain::PlainSurface;
pub use rich::RichSurface;

use crate::gbfs::{PricingPlan, Program, SystemInfo};
use crate::stations::{MergedStation, StationRecord};

/// Placeholder for values the feeds did not provide.
pub(crate) const UNKNOWN: &str = "?";

/// Placeholder for stations without a name.
const UNNAMED: &str = "(unnamed)";

/// Per-surface rendering of feed records.
pub trait Presenter: Send + Sync {
    /// Render one station's status.
    fn format_station(&self, station: &MergedStation, program: &Program) -> OutputPayload;

    /// Render one pricing plan.
    fn format_pricing_plan(&self, plan: &PricingPlan) -> OutputPayload;

    /// Render the program's contact information.
    fn format_system_info(&self, info: &SystemInfo, program: &Program) -> OutputPayload;

    /// Combine payloads into a single message for delivery.
    fn bundle(&self, payloads: Vec<OutputPayload>) -> Message;
}

/// The kind of chat surface output is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    /// Surfaces that render structured attachment cards.
    Rich,
    /// Everything else: plain text.
    #[default]
    Plain,
}

impl Surface {
    /// The presenter for this surface.
    pub fn presenter(self) -> Box<dyn Presenter> {
        match self {
            Surface::Rich => Box::new(RichSurface),
            Surface::Plain => Box::new(PlainSurface),
        }
    }
}

/// Error returned when parsing an unknown surface name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown surface {0:?} (expected \"rich\" or \"plain\")")]
pub struct UnknownSurface(String);

impl FromStr for Surface {
    type Err = UnknownSurface;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rich" | "slack" => Ok(Surface::Rich),
            "plain" | "text" => Ok(Surface::Plain),
            _ => Err(UnknownSurface(s.to_string())),
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Rich => f.write_str("rich"),
            Surface::Plain => f.write_str("plain"),
        }
    }
}

/// `#{id} - {name}`, the same on every surface.
pub fn format_station_name<S: StationRecord>(station: &S, program: &Program) -> String {
    let name = station.name().map(str::trim).unwrap_or(UNNAMED);
    format!("#{} - {}", station.normalized_id(program), name)
}

/// Human status label for a station.
pub(crate) fn status_label(station: &MergedStation) -> &'static str {
    if station.is_renting_active() {
        "Active"
    } else {
        "Inactive"
    }
}

/// `Option` count rendered for display.
pub(crate) fn count(value: Option<i64>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |n| n.to_string())
}

/// `{name} (${price})`
pub(crate) fn plan_title(plan: &PricingPlan) -> String {
    format!("{} (${})", plan.name, plan.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gbfs::StationInfo;

    fn madison() -> Program {
        Program::parse("madison").unwrap()
    }

    #[test]
    fn station_name_strips_prefix_and_trims() {
        let info = StationInfo {
            station_id: "bcycle_madison_3316".into(),
            name: Some("  Capitol Square ".into()),
            lat: None,
            lon: None,
            address: None,
        };
        assert_eq!(format_station_name(&info, &madison()), "#3316 - Capitol Square");
    }

    #[test]
    fn station_name_without_name() {
        let station = MergedStation::new("bcycle_madison_77");
        assert_eq!(format_station_name(&station, &madison()), "#77 - (unnamed)");
    }

    #[test]
    fn parse_surface() {
        assert_eq!("rich".parse::<Surface>().unwrap(), Surface::Rich);
        assert_eq!("Slack".parse::<Surface>().unwrap(), Surface::Rich);
        assert_eq!(" PLAIN ".parse::<Surface>().unwrap(), Surface::Plain);
        assert!("irc".parse::<Surface>().is_err());
        assert_eq!(Surface::default(), Surface::Plain);
    }

    #[test]
    fn status_labels() {
        let mut station = MergedStation::new("x");
        assert_eq!(status_label(&station), "Inactive");

        station.is_renting = Some(serde_json::json!(1));
        assert_eq!(status_label(&station), "Active");

        station.is_renting = Some(serde_json::json!(0));
        assert_eq!(status_label(&station), "Inactive");

        station.is_renting = Some(serde_json::json!(false));
        assert_eq!(status_label(&station), "Inactive");
    }

    #[test]
    fn missing_counts_render_unknown() {
        assert_eq!(count(Some(4)), "4");
        assert_eq!(count(None), "?");
    }
}
