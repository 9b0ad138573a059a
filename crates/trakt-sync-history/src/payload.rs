use serde::Serialize;
use trakt_sync_core::MediaType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalIds {
    pub tmdb: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub ids: ExternalIds,
}

/// Body of `POST /sync/history`. Serializes to a single top-level key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SyncPayload {
    #[serde(rename = "movies")]
    Movies(Vec<HistoryEntry>),
    #[serde(rename = "episodes")]
    Episodes(Vec<HistoryEntry>),
}

impl SyncPayload {
    pub fn single(media_type: MediaType, tmdb: u64) -> Self {
        let entries = vec![HistoryEntry {
            ids: ExternalIds { tmdb },
        }];
        match media_type {
            MediaType::Movie => Self::Movies(entries),
            MediaType::Episode => Self::Episodes(entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn movie_payload_shape() {
        let payload = SyncPayload::single(MediaType::Movie, 27205);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "movies": [{ "ids": { "tmdb": 27205 } }] })
        );
    }

    #[test]
    fn episode_payload_shape() {
        let payload = SyncPayload::single(MediaType::Episode, 27205);
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"episodes":[{"ids":{"tmdb":27205}}]}"#
        );
    }
}
