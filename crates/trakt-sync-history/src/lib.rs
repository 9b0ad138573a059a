pub mod api;
mod handler;
pub mod parsers;
mod payload;
mod response;

pub use api::trakt::{HistoryRequest, HistoryTransport, ReqwestTransport};
pub use handler::{HistorySync, card_for, missing_fields, parse_external_id, parse_parameters};
pub use payload::{ExternalIds, HistoryEntry, SyncPayload};
pub use response::{ResponseBody, interpret_response};
