//! Plain text rendering.

use crate::gbfs::{PricingPlan, Program, SystemInfo};
use crate::stations::MergedStation;

use super::payload::{Message, OutputPayload};
use super::{Presenter, UNKNOWN, count, format_station_name, plan_title, status_label};

/// Presenter for surfaces that only show text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSurface;

impl PlainSurface {
    /// `{status} | Bikes: {n} | Docks: {n}`
    pub(crate) fn status_summary(station: &MergedStation) -> String {
        format!(
            "{} | Bikes: {} | Docks: {}",
            status_label(station),
            count(station.num_bikes_available),
            count(station.num_docks_available)
        )
    }

    /// `{name} (${price}) - {description}`
    pub(crate) fn plan_line(plan: &PricingPlan) -> String {
        format!("{} - {}", plan_title(plan), plan.description)
    }

    /// `{name} | {url} | {phone} | {email}`
    pub(crate) fn system_line(info: &SystemInfo) -> String {
        format!(
            "{} | {} | {} | {}",
            info.name,
            info.url.as_deref().unwrap_or(UNKNOWN),
            info.phone_number.as_deref().unwrap_or(UNKNOWN),
            info.email.as_deref().unwrap_or(UNKNOWN)
        )
    }
}

impl Presenter for PlainSurface {
    fn format_station(&self, station: &MergedStation, program: &Program) -> OutputPayload {
        OutputPayload::Line(format!(
            "{}\n> {}",
            format_station_name(station, program),
            Self::status_summary(station)
        ))
    }

    fn format_pricing_plan(&self, plan: &PricingPlan) -> OutputPayload {
        OutputPayload::Line(Self::plan_line(plan))
    }

    fn format_system_info(&self, info: &SystemInfo, _program: &Program) -> OutputPayload {
        OutputPayload::Line(Self::system_line(info))
    }

    fn bundle(&self, payloads: Vec<OutputPayload>) -> Message {
        let lines: Vec<String> = payloads.iter().map(OutputPayload::to_text).collect();
        Message::Text(lines.join("\n"))
    }
}
