use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{MediaType, SyncError};

pub const SEARCH_BASE: &str = "https://trakt.tv/search/tmdb";
pub const POSTER_URL: &str = "https://trakt.tv/assets/logos/header-icon-360d039956.png";

pub const TITLE_RECORDED: &str = "✅ Synced to Trakt";
pub const TITLE_UNCHANGED: &str = "⚠️ No change (may already be recorded)";
pub const TITLE_SETUP: &str = "⚙️ Trakt not configured";
pub const TITLE_ERROR: &str = "❌ Error";

/// Interpreted provider answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    pub added_count: u64,
    pub raw_response: Value,
}

/// Result of one sync, before it is turned into a card.
#[derive(Debug)]
pub enum SyncReport {
    NeedsConfiguration {
        missing: Vec<&'static str>,
    },
    Recorded {
        media_type: MediaType,
        external_id: u64,
        outcome: SyncOutcome,
    },
    Unchanged {
        media_type: MediaType,
        external_id: u64,
        outcome: SyncOutcome,
    },
    Failed(SyncError),
}

impl SyncReport {
    pub fn from_outcome(media_type: MediaType, external_id: u64, outcome: SyncOutcome) -> Self {
        if outcome.added_count > 0 {
            Self::Recorded {
                media_type,
                external_id,
                outcome,
            }
        } else {
            Self::Unchanged {
                media_type,
                external_id,
                outcome,
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::NeedsConfiguration { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultCard {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub poster_path: String,
    #[serde(rename = "mediaType")]
    pub media_category: String,
    pub link: String,
    #[serde(rename = "playerType")]
    pub player_hint: String,
}

pub fn deep_link(external_id: u64) -> String {
    format!("{SEARCH_BASE}/{external_id}?id_type=tmdb")
}

/// Maps a report onto the single card shown by the host.
///
/// `issued_at_ms` only feeds the card id so repeated syncs of the same item
/// stay distinguishable.
pub fn render_card(report: &SyncReport, issued_at_ms: u128) -> ResultCard {
    match report {
        SyncReport::Recorded {
            media_type,
            external_id,
            ..
        } => status_card(TITLE_RECORDED, *media_type, *external_id, issued_at_ms),
        SyncReport::Unchanged {
            media_type,
            external_id,
            ..
        } => status_card(TITLE_UNCHANGED, *media_type, *external_id, issued_at_ms),
        SyncReport::NeedsConfiguration { missing } => bare_card(
            "setup",
            TITLE_SETUP,
            format!(
                "Missing {}. Long-press the widget and fill in its settings.",
                missing.join(", ")
            ),
        ),
        SyncReport::Failed(err) => bare_card("error", TITLE_ERROR, err.to_string()),
    }
}

fn status_card(title: &str, media_type: MediaType, external_id: u64, issued_at_ms: u128) -> ResultCard {
    ResultCard {
        id: format!("trakt_res_{external_id}_{issued_at_ms}"),
        kind: "url".to_string(),
        title: title.to_string(),
        description: format!("ID: {external_id} | Type: {}", media_type.label()),
        poster_path: POSTER_URL.to_string(),
        media_category: "tv".to_string(),
        link: deep_link(external_id),
        player_hint: "system".to_string(),
    }
}

fn bare_card(id: &str, title: &str, description: String) -> ResultCard {
    ResultCard {
        id: id.to_string(),
        kind: "url".to_string(),
        title: title.to_string(),
        description,
        poster_path: String::new(),
        media_category: "tv".to_string(),
        link: String::new(),
        player_hint: "system".to_string(),
    }
}
