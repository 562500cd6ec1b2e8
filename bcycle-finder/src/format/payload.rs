//! Output payloads and delivery messages.
//!
//! Rich cards serialize to the Slack attachment layout, so a message can
//! be handed to a webhook-style chat adapter as-is.

use serde::Serialize;

/// Visual tone of a rich card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Good,
    Danger,
}

/// A short labelled value inside a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardField {
    pub title: String,
    pub value: String,
    /// Whether the field may share a row with another short field.
    pub short: bool,
}

impl CardField {
    pub fn new(title: impl Into<String>, value: impl Into<String>, short: bool) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short,
        }
    }
}

/// Structured card for surfaces that render attachments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RichCard {
    /// Plain-text rendering for clients that cannot show the card.
    pub fallback: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<CardColor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,

    /// Body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<CardField>,

    /// Card timestamp (POSIX seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

impl RichCard {
    /// A card carrying only text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            fallback: text.clone(),
            text: Some(text),
            ..Self::default()
        }
    }

    /// Look up a field by title.
    pub fn field(&self, title: &str) -> Option<&CardField> {
        self.fields.iter().find(|f| f.title == title)
    }
}

/// One formatted record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputPayload {
    Card(RichCard),
    Line(String),
}

impl OutputPayload {
    /// Plain-text rendering of the payload.
    pub fn to_text(&self) -> String {
        match self {
            OutputPayload::Card(card) => card.fallback.clone(),
            OutputPayload::Line(line) => line.clone(),
        }
    }
}

/// A single delivery to the chat surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Message {
    /// Plain text, possibly several lines.
    Text(String),
    /// A list of attachment cards.
    #[serde(rename = "attachments")]
    Cards(Vec<RichCard>),
}

impl Message {
    /// A plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Message::Text(text.into())
    }

    /// Plain-text rendering: the text itself, or card fallbacks one per line.
    pub fn to_text(&self) -> String {
        match self {
            Message::Text(text) => text.clone(),
            Message::Cards(cards) => cards
                .iter()
                .map(|c| c.fallback.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn card_serializes_as_attachment() {
        let card = RichCard {
            fallback: "fallback".into(),
            title: Some("#5 - State St".into()),
            color: Some(CardColor::Good),
            fields: vec![CardField::new("Bikes Available", "4", true)],
            ts: Some(1000),
            ..RichCard::default()
        };

        assert_eq!(
            serde_json::to_value(&card).unwrap(),
            json!({
                "fallback": "fallback",
                "title": "#5 - State St",
                "color": "good",
                "fields": [{ "title": "Bikes Available", "value": "4", "short": true }],
                "ts": 1000
            })
        );
    }

    #[test]
    fn message_serialization() {
        assert_eq!(
            serde_json::to_value(Message::text("hi")).unwrap(),
            json!({ "text": "hi" })
        );
        assert_eq!(
            serde_json::to_value(Message::Cards(vec![RichCard::from_text("x")])).unwrap(),
            json!({ "attachments": [{ "fallback": "x", "text": "x" }] })
        );
    }

    #[test]
    fn message_to_text() {
        let message = Message::Cards(vec![RichCard::from_text("a"), RichCard::from_text("b")]);
        assert_eq!(message.to_text(), "a\nb");
        assert_eq!(Message::text("a\nb").to_text(), "a\nb");
    }
}
