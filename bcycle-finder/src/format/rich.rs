//! Attachment card rendering for rich surfaces.

use crate::gbfs::{PricingPlan, Program, SystemInfo};
use crate::stations::MergedStation;

use super::payload::{CardColor, CardField, Message, OutputPayload, RichCard};
use super::plain::PlainSurface;
use super::{Presenter, UNKNOWN, count, format_station_name, plan_title};

/// Author name shown on station cards.
const AUTHOR_NAME: &str = "BCycle";

/// Icon used for the author block and thumbnails.
const BCYCLE_ICON: &str = "https://github.com/bcycle.png";

/// Presenter for surfaces that render attachment cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct RichSurface;

/// Link to a map pin for a coordinate pair.
fn map_link(lat: f64, lon: f64) -> String {
    format!("https://www.google.com/maps/place/{lat},{lon}")
}

/// Address field value, linked to the map when coordinates are known.
fn address_value(station: &MergedStation) -> String {
    let address = station.address.as_deref().unwrap_or(UNKNOWN);
    match (station.lat, station.lon) {
        (Some(lat), Some(lon)) => format!("<{}|{}>", map_link(lat, lon), address),
        _ => address.to_string(),
    }
}

impl Presenter for RichSurface {
    fn format_station(&self, station: &MergedStation, program: &Program) -> OutputPayload {
        let name = format_station_name(station, program);
        let color = if station.is_renting_active() {
            CardColor::Good
        } else {
            CardColor::Danger
        };

        OutputPayload::Card(RichCard {
            fallback: format!("{} > {}", name, PlainSurface::status_summary(station)),
            title: Some(name),
            color: Some(color),
            author_name: Some(AUTHOR_NAME.to_string()),
            author_link: Some(program.website()),
            author_icon: Some(BCYCLE_ICON.to_string()),
            fields: vec![
                CardField::new("Address", address_value(station), false),
                CardField::new("Bikes Available", count(station.num_bikes_available), true),
                CardField::new("Docks Open", count(station.num_docks_available), true),
            ],
            ts: station.last_reported,
            ..RichCard::default()
        })
    }

    fn format_pricing_plan(&self, plan: &PricingPlan) -> OutputPayload {
        OutputPayload::Card(RichCard {
            fallback: PlainSurface::plan_line(plan),
            title: Some(plan_title(plan)),
            text: Some(plan.description.clone()),
            ..RichCard::default()
        })
    }

    fn format_system_info(&self, info: &SystemInfo, program: &Program) -> OutputPayload {
        let mut fields = Vec::new();
        if let Some(url) = &info.url {
            fields.push(CardField::new("Website", format!("<{url}|{url}>"), true));
        }
        if let Some(phone) = &info.phone_number {
            fields.push(CardField::new("Phone Number", phone.clone(), true));
        }
        if let Some(email) = &info.email {
            fields.push(CardField::new(
                "Email",
                format!("<mailto:{email}|{email}>"),
                true,
            ));
        }

        OutputPayload::Card(RichCard {
            fallback: PlainSurface::system_line(info),
            title: Some(info.name.clone()),
            title_link: Some(program.website()),
            thumb_url: Some(BCYCLE_ICON.to_string()),
            fields,
            ..RichCard::default()
        })
    }

    fn bundle(&self, payloads: Vec<OutputPayload>) -> Message {
        let cards = payloads
            .into_iter()
            .map(|payload| match payload {
                OutputPayload::Card(card) => card,
                OutputPayload::Line(line) => RichCard::from_text(line),
            })
            .collect();
        Message::Cards(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gbfs::PlanPrice;
    use serde_json::json;

    fn madison() -> Program {
        Program::parse("madison").unwrap()
    }

    fn state_street() -> MergedStation {
        MergedStation {
            name: Some("State St".into()),
            lat: Some(43.07),
            lon: Some(-89.38),
            address: Some("123 State St".into()),
            is_renting: Some(json!(1)),
            num_bikes_available: Some(4),
            num_docks_available: Some(6),
            last_reported: Some(1000),
            ..MergedStation::new("bcycle_madison_5")
        }
    }

    fn card(payload: OutputPayload) -> RichCard {
        match payload {
            OutputPayload::Card(card) => card,
            OutputPayload::Line(line) => panic!("expected a card, got line {line:?}"),
        }
    }

    #[test]
    fn active_station_card() {
        let card = card(RichSurface.format_station(&state_street(), &madison()));

        assert_eq!(card.title.as_deref(), Some("#5 - State St"));
        assert_eq!(card.color, Some(CardColor::Good));
        assert_eq!(
            card.fallback,
            "#5 - State St > Active | Bikes: 4 | Docks: 6"
        );
        assert_eq!(card.author_link.as_deref(), Some("https://madison.bcycle.com/"));
        assert_eq!(card.ts, Some(1000));

        let address = card.field("Address").unwrap();
        assert_eq!(
            address.value,
            "<https://www.google.com/maps/place/43.07,-89.38|123 State St>"
        );
        assert!(!address.short);

        assert_eq!(card.field("Bikes Available").unwrap().value, "4");
        assert_eq!(card.field("Docks Open").unwrap().value, "6");
        assert!(card.field("Docks Open").unwrap().short);
    }

    #[test]
    fn inactive_station_is_danger() {
        let mut station = state_street();
        station.is_renting = Some(json!(0));
        let card = card(RichSurface.format_station(&station, &madison()));

        assert_eq!(card.color, Some(CardColor::Danger));
        assert!(card.fallback.contains("Inactive"));
    }

    #[test]
    fn station_without_coordinates_has_plain_address() {
        let mut station = state_street();
        station.lat = None;
        let card = card(RichSurface.format_station(&station, &madison()));

        assert_eq!(card.field("Address").unwrap().value, "123 State St");
    }

    #[test]
    fn pricing_plan_card() {
        let plan = PricingPlan {
            name: "Day Pass".into(),
            price: PlanPrice::Text("15.00".into()),
            description: "Unlimited rides".into(),
        };
        let card = card(RichSurface.format_pricing_plan(&plan));

        assert_eq!(card.title.as_deref(), Some("Day Pass ($15.00)"));
        assert_eq!(card.text.as_deref(), Some("Unlimited rides"));
        assert_eq!(card.fallback, "Day Pass ($15.00) - Unlimited rides");
    }

    #[test]
    fn system_info_card() {
        let info = SystemInfo {
            name: "Madison BCycle".into(),
            url: Some("https://madison.bcycle.com".into()),
            phone_number: None,
            email: Some("help@example.com".into()),
        };
        let card = card(RichSurface.format_system_info(&info, &madison()));

        assert_eq!(card.title.as_deref(), Some("Madison BCycle"));
        assert_eq!(card.title_link.as_deref(), Some("https://madison.bcycle.com/"));
        assert_eq!(
            card.field("Website").unwrap().value,
            "<https://madison.bcycle.com|https://madison.bcycle.com>"
        );
        assert!(card.field("Phone Number").is_none());
        assert_eq!(
            card.field("Email").unwrap().value,
            "<mailto:help@example.com|help@example.com>"
        );
    }

    #[test]
    fn bundle_collects_cards() {
        let message = RichSurface.bundle(vec![
            RichSurface.format_station(&state_street(), &madison()),
            OutputPayload::Line("note".into()),
        ]);

        let Message::Cards(cards) = message else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].text.as_deref(), Some("note"));
    }
}
