use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{SyncError, SyncResult};

/// Kind of item recorded in the watch history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Episode,
}

impl MediaType {
    /// Top-level key of the sync payload, also the sub-field of `added`.
    pub fn payload_key(self) -> &'static str {
        match self {
            Self::Movie => "movies",
            Self::Episode => "episodes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Episode => "Episode",
        }
    }
}

impl FromStr for MediaType {
    type Err = SyncError;

    fn from_str(input: &str) -> SyncResult<Self> {
        match input.trim().to_lowercase().as_str() {
            "movie" | "movies" => Ok(Self::Movie),
            "episode" | "episodes" => Ok(Self::Episode),
            other => Err(SyncError::InvalidInput(format!("unknown media type: {other}"))),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.payload_key())
    }
}

/// Parameters exactly as the host hands them over; nothing is validated yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParameters {
    pub client_id: Option<String>,
    pub access_token: Option<String>,
    pub media_type: Option<String>,
    #[serde(alias = "tmdbId")]
    pub external_id: Option<String>,
}

/// Validated parameters of one history sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncParameters {
    pub client_id: String,
    pub access_token: String,
    pub media_type: MediaType,
    pub external_id: u64,
}
