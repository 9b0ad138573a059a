use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, warn};
use trakt_sync_core::form::{self, FormField};
use trakt_sync_core::{
    MediaType, RawParameters, ResultCard, SyncError, SyncParameters, SyncReport, SyncResult,
    render_card,
};

use crate::api::trakt::{HistoryRequest, HistoryTransport};
use crate::parsers::tmdb::parse_tmdb_movie_id;
use crate::response::interpret_response;

/// Records one watched item per call and reports the result as a card.
#[derive(Debug, Clone)]
pub struct HistorySync<T> {
    transport: T,
    api_base: String,
}

impl<T: HistoryTransport> HistorySync<T> {
    pub fn new(transport: T, api_base: impl Into<String>) -> Self {
        Self {
            transport,
            api_base: api_base.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Always yields exactly one card, whatever happens.
    pub async fn execute(&self, raw: &RawParameters) -> Vec<ResultCard> {
        let report = self.sync(raw).await;
        vec![card_for(&report)]
    }

    pub async fn sync(&self, raw: &RawParameters) -> SyncReport {
        let missing = missing_fields(raw);
        if !missing.is_empty() {
            info!(?missing, "history sync skipped, settings incomplete");
            return SyncReport::NeedsConfiguration { missing };
        }

        match self.try_sync(raw).await {
            Ok(report) => report,
            Err(err) => {
                warn!(error = %err, "history sync failed");
                SyncReport::Failed(err)
            }
        }
    }

    async fn try_sync(&self, raw: &RawParameters) -> SyncResult<SyncReport> {
        let params = parse_parameters(raw)?;
        let request = HistoryRequest::new(&self.api_base, &params);
        let body = self.transport.post(&request).await?;
        let outcome = interpret_response(body, params.media_type)?;
        info!(
            media_type = %params.media_type,
            tmdb = params.external_id,
            added = outcome.added_count,
            "history sync finished"
        );
        Ok(SyncReport::from_outcome(
            params.media_type,
            params.external_id,
            outcome,
        ))
    }
}

/// Labels of the required settings that are absent or blank.
pub fn missing_fields(raw: &RawParameters) -> Vec<&'static str> {
    [
        (&raw.client_id, form::CLIENT_ID),
        (&raw.access_token, form::ACCESS_TOKEN),
        (&raw.external_id, form::TMDB_ID),
    ]
    .into_iter()
    .filter(|(value, _)| present(value.as_deref()).is_none())
    .map(|(_, field)| field.label)
    .collect()
}

pub fn parse_parameters(raw: &RawParameters) -> SyncResult<SyncParameters> {
    let client_id = required(raw.client_id.as_deref(), &form::CLIENT_ID)?;
    let access_token = required(raw.access_token.as_deref(), &form::ACCESS_TOKEN)?;
    let external_id = required(raw.external_id.as_deref(), &form::TMDB_ID)?;
    let media_type = match present(raw.media_type.as_deref()) {
        Some(value) => value.parse()?,
        None => MediaType::default(),
    };

    Ok(SyncParameters {
        client_id: client_id.to_string(),
        access_token: access_token.to_string(),
        media_type,
        external_id: parse_external_id(external_id, media_type)?,
    })
}

/// Accepts a positive integer, or for movies a TMDB movie page URL.
pub fn parse_external_id(input: &str, media_type: MediaType) -> SyncResult<u64> {
    let input = input.trim();
    match input.parse::<u64>() {
        Ok(0) => Err(SyncError::InvalidIdentifier(
            "TMDB id must be a positive integer".to_string(),
        )),
        Ok(id) => Ok(id),
        Err(_) => {
            let from_url = match media_type {
                MediaType::Movie => parse_tmdb_movie_id(input).filter(|id| *id > 0),
                MediaType::Episode => None,
            };
            from_url
                .ok_or_else(|| SyncError::InvalidIdentifier(format!("'{input}' is not a TMDB id")))
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn required<'a>(value: Option<&'a str>, field: &FormField) -> SyncResult<&'a str> {
    present(value).ok_or_else(|| SyncError::MissingConfiguration(field.label.to_string()))
}

/// Renders a report stamped with the current time.
pub fn card_for(report: &SyncReport) -> ResultCard {
    render_card(report, now_millis())
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}
