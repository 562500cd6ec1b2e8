//! Parsing chat text into commands.

use std::fmt;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// A recognised `bcycle` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `bcycle`: status of the configured default stations.
    DefaultStations,
    /// `bcycle list` / `bcycle stations`: every station's id and name.
    ListStations,
    /// `bcycle me <id>` / `bcycle station <id>`: one station's status.
    StationStatus(String),
    /// `bcycle search <text>`: stations whose name contains the text.
    Search(String),
    /// `bcycle info`: program contact information.
    SystemInfo,
    /// `bcycle price(s)` / `bcycle plan(s)`: pricing plans.
    PricingPlans,
}

fn pattern(re: &str) -> Regex {
    RegexBuilder::new(re)
        .case_insensitive(true)
        .build()
        .expect("command patterns are valid")
}

static DEFAULT: LazyLock<Regex> = LazyLock::new(|| pattern(r"^bcycle$"));
static LIST: LazyLock<Regex> = LazyLock::new(|| pattern(r"^bcycle\s+(?:list|stations)$"));
static STATION: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^bcycle\s+(?:me|station)\s+#?([0-9]+)$"));
static SEARCH: LazyLock<Regex> = LazyLock::new(|| pattern(r"^bcycle\s+search\s+(.+)$"));
static INFO: LazyLock<Regex> = LazyLock::new(|| pattern(r"^bcycle\s+info$"));
static PRICES: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^bcycle\s+(?:price|prices|pricing|plan|plans)$"));

impl Command {
    /// Parse the text of a chat message addressed to the bot.
    ///
    /// Matching ignores case and surrounding whitespace. Returns `None`
    /// for anything that is not a `bcycle` command.
    pub fn parse(text: &str) -> Option<Command> {
        let text = text.trim();

        if DEFAULT.is_match(text) {
            return Some(Command::DefaultStations);
        }
        if LIST.is_match(text) {
            return Some(Command::ListStations);
        }
        if let Some(caps) = STATION.captures(text) {
            return Some(Command::StationStatus(caps[1].to_string()));
        }
        if let Some(caps) = SEARCH.captures(text) {
            return Some(Command::Search(caps[1].trim().to_string()));
        }
        if INFO.is_match(text) {
            return Some(Command::SystemInfo);
        }
        if PRICES.is_match(text) {
            return Some(Command::PricingPlans);
        }

        None
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::DefaultStations => "default",
            Command::ListStations => "list",
            Command::StationStatus(_) => "station",
            Command::Search(_) => "search",
            Command::SystemInfo => "info",
            Command::PricingPlans => "prices",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::DefaultStations => f.write_str("bcycle"),
            Command::ListStations => f.write_str("bcycle list"),
            Command::StationStatus(id) => write!(f, "bcycle station #{id}"),
            Command::Search(query) => write!(f, "bcycle search {query}"),
            Command::SystemInfo => f.write_str("bcycle info"),
            Command::PricingPlans => f.write_str("bcycle prices"),
        }
    }
}
