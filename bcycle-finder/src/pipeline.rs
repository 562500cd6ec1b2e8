//! Command pipeline.
//!
//! Every command runs the same steps: check the configuration, fetch the
//! feeds it needs one after another, merge and filter the stations, render
//! them for the configured surface and deliver the result. Any failure
//! ends the command and is reported to the user instead.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::chat::{ChatSurface, Command, DeliveryError};
use crate::config::BcycleConfig;
use crate::format::{Message, Presenter, format_station_name};
use crate::gbfs::{
    Feed, FeedEnvelope, FeedError, FeedSource, PricingPlansData, Program, StationInfo,
    StationStatus, StationsData, SystemInfo,
};
use crate::stations::{
    MergedStation, StationRecord, by_exact_identifier, by_identifier_set, by_substring, merge,
};

/// Reply when no program is configured.
pub const NOT_CONFIGURED_MESSAGE: &str = "You must configure BCYCLE_CITY before use.";

/// Reasons a command produced no result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// No program configured; nothing was fetched.
    #[error("You must configure BCYCLE_CITY before use.")]
    NotConfigured,

    /// A feed request failed.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// A feed document did not have the expected shape.
    #[error("Could not read the {feed} feed: {message}")]
    Decode { feed: Feed, message: String },
}

/// Runs chat commands against the configured program's feeds.
///
/// Holds no per-command state, so one pipeline can serve any number of
/// concurrent commands.
pub struct CommandPipeline {
    config: Arc<BcycleConfig>,
    feeds: Arc<dyn FeedSource>,
    presenter: Box<dyn Presenter>,
}

impl CommandPipeline {
    /// Create a pipeline rendering for the configured surface.
    pub fn new(config: Arc<BcycleConfig>, feeds: Arc<dyn FeedSource>) -> Self {
        let presenter = config.surface.presenter();
        Self {
            config,
            feeds,
            presenter,
        }
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &BcycleConfig {
        &self.config
    }

    /// Run `command` and deliver its replies, or its error, to `surface`.
    ///
    /// Only a failing surface makes this return an error; command failures
    /// are delivered as messages.
    pub async fn run(
        &self,
        command: &Command,
        surface: &dyn ChatSurface,
    ) -> Result<(), DeliveryError> {
        info!(command = command.kind(), "handling command");

        let messages = match self.execute(command).await {
            Ok(messages) => messages,
            Err(err) => {
                warn!(command = command.kind(), error = %err, "command failed");
                vec![Message::text(err.to_string())]
            }
        };

        debug!(count = messages.len(), "delivering replies");
        for message in messages {
            surface.send(message).await?;
        }

        Ok(())
    }

    /// Compute the replies for `command` without delivering them.
    pub async fn execute(&self, command: &Command) -> Result<Vec<Message>, CommandError> {
        let program = self
            .config
            .program
            .as_ref()
            .ok_or(CommandError::NotConfigured)?;

        match command {
            Command::DefaultStations => self.default_stations(program).await,
            Command::ListStations => self.list_stations(program).await,
            Command::StationStatus(id) => self.station_status(program, id).await,
            Command::Search(query) => self.search(program, query).await,
            Command::SystemInfo => self.system_info(program).await,
            Command::PricingPlans => self.pricing_plans(program).await,
        }
    }

    async fn default_stations(&self, program: &Program) -> Result<Vec<Message>, CommandError> {
        let wanted = &self.config.default_station_ids;

        if wanted.is_empty() {
            return Ok(vec![
                Message::text("You do not have any BCYCLE_DEFAULT_STATIONS configured."),
                Message::text(format!(
                    "Use `{} bcycle search <query>` to find stations.",
                    self.config.bot_name
                )),
            ]);
        }

        let stations = self.merged_stations(program).await?;
        let selected = by_identifier_set(&stations, wanted, program);

        if selected.is_empty() {
            let mut ids: Vec<&str> = wanted.iter().map(String::as_str).collect();
            ids.sort_unstable();
            return Ok(vec![Message::text(format!(
                "None of the configured stations ({}) were found.",
                ids.join(", ")
            ))]);
        }

        Ok(vec![self.station_statuses(&selected, program)])
    }

    async fn list_stations(&self, program: &Program) -> Result<Vec<Message>, CommandError> {
        let stations: Vec<StationInfo> =
            self.fetch_stations(Feed::StationInformation, program).await?;

        if stations.is_empty() {
            return Ok(vec![Message::text(format!(
                "No stations are listed for {program}."
            ))]);
        }

        Ok(vec![station_names(&stations, program)])
    }

    async fn station_status(
        &self,
        program: &Program,
        id: &str,
    ) -> Result<Vec<Message>, CommandError> {
        let stations = self.merged_stations(program).await?;

        match by_exact_identifier(&stations, id, program) {
            Some(station) => Ok(vec![self.station_statuses(&[station], program)]),
            None => Ok(vec![Message::text(format!("No station matched ID #{id}."))]),
        }
    }

    async fn search(&self, program: &Program, query: &str) -> Result<Vec<Message>, CommandError> {
        let stations: Vec<StationInfo> =
            self.fetch_stations(Feed::StationInformation, program).await?;
        let matches = by_substring(&stations, query);

        if matches.is_empty() {
            return Ok(vec![Message::text(format!(
                "No stations matched your query: {query}"
            ))]);
        }

        Ok(vec![station_names(&matches, program)])
    }

    async fn system_info(&self, program: &Program) -> Result<Vec<Message>, CommandError> {
        let info: SystemInfo = self.fetch_data(Feed::SystemInformation, program).await?;
        let payload = self.presenter.format_system_info(&info, program);
        Ok(vec![self.presenter.bundle(vec![payload])])
    }

    async fn pricing_plans(&self, program: &Program) -> Result<Vec<Message>, CommandError> {
        let data: PricingPlansData = self.fetch_data(Feed::SystemPricingPlans, program).await?;

        if data.plans.is_empty() {
            return Ok(vec![Message::text(format!(
                "No pricing plans are published for {program}."
            ))]);
        }

        let payloads = data
            .plans
            .iter()
            .map(|plan| self.presenter.format_pricing_plan(plan))
            .collect();
        Ok(vec![self.presenter.bundle(payloads)])
    }

    /// One message with the status of every station in `stations`.
    fn station_statuses(&self, stations: &[&MergedStation], program: &Program) -> Message {
        let payloads = stations
            .iter()
            .map(|station| self.presenter.format_station(station, program))
            .collect();
        self.presenter.bundle(payloads)
    }

    /// Fetch information, then status, and join them.
    ///
    /// The status feed is only requested once the information feed has
    /// been fetched and decoded.
    async fn merged_stations(&self, program: &Program) -> Result<Vec<MergedStation>, CommandError> {
        let info: Vec<StationInfo> =
            self.fetch_stations(Feed::StationInformation, program).await?;
        let status: Vec<StationStatus> = self.fetch_stations(Feed::StationStatus, program).await?;

        let merged = merge(info, status);
        debug!(stations = merged.len(), "merged station feeds");
        Ok(merged)
    }

    async fn fetch_stations<S: DeserializeOwned>(
        &self,
        feed: Feed,
        program: &Program,
    ) -> Result<Vec<S>, CommandError> {
        let data: StationsData<S> = self.fetch_data(feed, program).await?;
        Ok(data.stations)
    }

    /// Fetch a feed and decode the `data` member of its envelope.
    async fn fetch_data<T: DeserializeOwned>(
        &self,
        feed: Feed,
        program: &Program,
    ) -> Result<T, CommandError> {
        let document = self.feeds.fetch_feed(feed, program).await?;

        let envelope: FeedEnvelope<T> =
            serde_json::from_value(document).map_err(|e| CommandError::Decode {
                feed,
                message: e.to_string(),
            })?;

        debug!(%feed, last_updated = ?envelope.last_updated, "decoded feed");
        Ok(envelope.data)
    }
}

/// One text message listing `#{id} - {name}` per station.
fn station_names<S: StationRecord>(stations: &[S], program: &Program) -> Message {
    let lines: Vec<String> = stations
        .iter()
        .map(|station| format_station_name(station, program))
        .collect();
    Message::text(lines.join("\n"))
}
